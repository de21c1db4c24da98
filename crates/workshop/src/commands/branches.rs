use eyre::Result;
use std::io::Write;
use workshop_core::conversation::{BranchIndicator, BranchPoint};

use super::Command;
use super::selection::open_view;
use crate::cli::SelectionArgs;
use crate::error::Error;

const PREVIEW_CHARS: usize = 48;

pub struct BranchesCommand {
    pub selection: SelectionArgs,
}

impl Command for BranchesCommand {
    fn execute(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        let mut stderr = std::io::stderr().lock();
        self.write_to(&mut stdout, &mut stderr).map_err(Into::into)
    }
}

impl BranchesCommand {
    fn write_to(
        &self,
        out: &mut impl Write,
        notices: &mut impl Write,
    ) -> std::result::Result<(), Error> {
        let view = open_view(&self.selection, notices)?;
        let tree = view.tree();

        let mut any = false;
        for node in view.visible_path() {
            let Some(indicator) = BranchIndicator::for_node(tree, node) else {
                continue;
            };
            any = true;
            writeln!(out, "at {} ({indicator}):", BranchPoint::of(tree, node))?;
            for &sibling in tree.siblings(node) {
                let marker = if sibling == node { '*' } else { ' ' };
                let message = tree.message(sibling);
                writeln!(
                    out,
                    "  {marker} {}  {}",
                    message.id(),
                    message.preview(PREVIEW_CHARS)
                )?;
            }
        }

        if !any {
            writeln!(out, "No branches on the visible path")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{selection_args, write_chat};

    fn render(command: &BranchesCommand) -> String {
        let mut out = Vec::new();
        command.write_to(&mut out, &mut std::io::sink()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_alternatives_with_current_marked() {
        let dir = tempfile::tempdir().unwrap();
        let mut selection = selection_args(&write_chat(dir.path()));
        selection.selections = vec![("a".to_string(), "c".to_string())];

        let output = render(&BranchesCommand { selection });
        assert_eq!(
            output,
            "at a (2/2):\n    b  Two upgrades are planned.\n  * c  One upgrade, in spring.\n"
        );
    }

    #[test]
    fn reports_linear_transcripts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("linear.json");
        std::fs::write(
            &file,
            r#"[{"message_id": "x"}, {"message_id": "y", "parent_message_id": "x"}]"#,
        )
        .unwrap();

        let output = render(&BranchesCommand {
            selection: selection_args(&file),
        });
        assert_eq!(output, "No branches on the visible path\n");
    }
}
