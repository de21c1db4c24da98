use eyre::Result;
use serde::Serialize;
use std::io::Write;
use workshop_core::conversation::{GraphEdge, GraphLayout};
use workshop_core::preferences::MinimapPreferences;

use super::Command;
use super::selection::open_view;
use crate::cli::{MinimapFormat, SelectionArgs};
use crate::error::Error;
use crate::minimap::{render_svg, render_text};

pub struct MinimapCommand {
    pub selection: SelectionArgs,
    pub format: MinimapFormat,
    pub style: MinimapPreferences,
}

/// JSON output: the layout plus its edges as row index pairs.
#[derive(Serialize)]
struct MinimapJson<'a> {
    #[serde(flatten)]
    layout: &'a GraphLayout,
    edges: Vec<GraphEdge>,
}

impl Command for MinimapCommand {
    fn execute(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        let mut stderr = std::io::stderr().lock();
        self.write_to(&mut stdout, &mut stderr).map_err(Into::into)
    }
}

impl MinimapCommand {
    fn write_to(
        &self,
        out: &mut impl Write,
        notices: &mut impl Write,
    ) -> std::result::Result<(), Error> {
        let layout = open_view(&self.selection, notices)?.layout();
        match self.format {
            MinimapFormat::Text => write!(out, "{}", render_text(&layout))?,
            MinimapFormat::Svg => write!(out, "{}", render_svg(&layout, &self.style))?,
            MinimapFormat::Json => {
                let json = MinimapJson {
                    edges: layout.edges(),
                    layout: &layout,
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
            }
        }
        Ok(())
    }
}
