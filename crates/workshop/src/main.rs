use clap::Parser;
use eyre::Result;

use workshop::cli::{Cli, Commands, PreferencesCommands};
use workshop::commands::{
    Command,
    branches::BranchesCommand,
    minimap::MinimapCommand,
    path::PathCommand,
    preferences::{PreferencesAction, PreferencesCommand},
};

fn main() -> Result<()> {
    // Install color-eyre for better error reports
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load .env file if it exists
    workshop::cli::config::load_env()?;

    // Initialize tracing (level configured via RUST_LOG env var)
    workshop_core::utils::tracing::init_tracing()?;

    let preferences = workshop::cli::config::load_preferences(cli.config.as_deref());

    match cli.command {
        Commands::Path { selection } => PathCommand {
            selection,
            preferences: preferences.transcript,
        }
        .execute(),
        Commands::Branches { selection } => BranchesCommand { selection }.execute(),
        Commands::Minimap { selection, format } => MinimapCommand {
            selection,
            format,
            style: preferences.minimap,
        }
        .execute(),
        Commands::Preferences { action } => PreferencesCommand {
            action: match action {
                PreferencesCommands::Show => PreferencesAction::Show,
                PreferencesCommands::Init => PreferencesAction::Init,
                PreferencesCommands::Reset => PreferencesAction::Reset,
            },
            config: cli.config,
        }
        .execute(),
    }
}
