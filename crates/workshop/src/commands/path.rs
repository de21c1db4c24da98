use eyre::Result;
use std::io::Write;
use workshop_core::conversation::BranchIndicator;
use workshop_core::preferences::TranscriptPreferences;

use super::Command;
use super::selection::open_view;
use crate::cli::SelectionArgs;
use crate::error::Error;

pub struct PathCommand {
    pub selection: SelectionArgs,
    pub preferences: TranscriptPreferences,
}

impl Command for PathCommand {
    fn execute(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        let mut stderr = std::io::stderr().lock();
        self.write_to(&mut stdout, &mut stderr).map_err(Into::into)
    }
}

impl PathCommand {
    fn write_to(
        &self,
        out: &mut impl Write,
        notices: &mut impl Write,
    ) -> std::result::Result<(), Error> {
        let view = open_view(&self.selection, notices)?;
        let tree = view.tree();

        for node in view.visible_path() {
            let message = tree.message(node);
            let indicator = if self.preferences.show_branch_indicators {
                BranchIndicator::for_node(tree, node)
                    .map(|i| format!(" ({i})"))
                    .unwrap_or_default()
            } else {
                String::new()
            };
            let role = message.sender_role.to_string();
            writeln!(
                out,
                "{role:<9} {}{}  {}",
                message.id(),
                indicator,
                message.preview(self.preferences.preview_chars)
            )?;
        }
        Ok(())
    }
}
