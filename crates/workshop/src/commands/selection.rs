use std::io::Write;
use tracing::warn;
use workshop_core::conversation::{BranchPoint, ConversationView};
use workshop_core::transcript::load_messages;

use crate::cli::SelectionArgs;
use crate::error::Error;

/// Load the transcript and apply `--goto`, then `--root` and `--select`.
///
/// Hidden orphan messages are reported on `notices`.
pub fn open_view(
    args: &SelectionArgs,
    notices: &mut impl Write,
) -> Result<ConversationView, Error> {
    let mut view = ConversationView::new(load_messages(&args.file)?);

    let orphans = view.tree().orphans().len();
    if orphans > 0 {
        warn!(
            count = orphans,
            "Some messages reply to messages missing from the transcript and are hidden"
        );
        writeln!(
            notices,
            "warning: {orphans} message(s) reply to messages missing from {} and are hidden",
            args.file.display()
        )?;
    }

    if let Some(target) = &args.goto {
        if !view.navigate_to(target) {
            return Err(Error::MessageNotFound(target.clone()));
        }
    }

    if let Some(root) = &args.root {
        if view.tree().roots().iter().all(|&r| view.tree().message(r).id() != root.as_str()) {
            return Err(Error::NotARoot(root.clone()));
        }
        view.select_branch(&BranchPoint::Root, root);
    }

    for (parent, child) in &args.selections {
        let applies = view
            .tree()
            .get(child)
            .and_then(|c| view.tree().node(c).parent)
            .is_some_and(|p| view.tree().message(p).id() == parent.as_str());
        if !applies {
            return Err(Error::NotAChild {
                parent: parent.clone(),
                child: child.clone(),
            });
        }
        view.select_branch(&BranchPoint::message(parent.clone()), child);
    }

    Ok(view)
}
