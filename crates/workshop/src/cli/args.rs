use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strum_macros::Display;

/// Browse branching Workshop chat transcripts from the terminal.
#[derive(Parser)]
#[command(version, about, long_about = None, author)]
pub struct Cli {
    /// Preferences file to use instead of the user config file
    #[arg(long, env = "WORKSHOP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Print the visible transcript
    Path {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// List the branch points along the visible transcript
    Branches {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Draw the conversation tree
    Minimap {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = MinimapFormat::Text)]
        format: MinimapFormat,
    },
    /// Manage user preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesCommands,
    },
}

/// Which transcript to load and which branches to show.
#[derive(Args, Clone, Debug)]
pub struct SelectionArgs {
    /// JSON file with the chat's messages (array or {"messages": [...]})
    pub file: PathBuf,

    /// Root message to start from when the chat has several
    #[arg(long)]
    pub root: Option<String>,

    /// Choose CHILD at PARENT (repeatable)
    #[arg(long = "select", value_name = "PARENT=CHILD", value_parser = parse_selection)]
    pub selections: Vec<(String, String)>,

    /// Show the branch containing this message
    #[arg(long, value_name = "MESSAGE_ID")]
    pub goto: Option<String>,
}

#[derive(Subcommand, Clone, Copy, Debug)]
pub enum PreferencesCommands {
    /// Show current preferences
    Show,
    /// Write a preferences file with the default values
    Init,
    /// Reset preferences to defaults
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MinimapFormat {
    Text,
    Svg,
    Json,
}

fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (parent, child) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PARENT=CHILD, got '{raw}'"))?;
    let (parent, child) = (parent.trim(), child.trim());
    if parent.is_empty() || child.is_empty() {
        return Err(format!("expected PARENT=CHILD, got '{raw}'"));
    }
    Ok((parent.to_string(), child.to_string()))
}
