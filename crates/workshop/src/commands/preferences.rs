use super::Command;
use crate::error::Error;
use eyre::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use workshop_core::preferences::Preferences;

pub struct PreferencesCommand {
    pub action: PreferencesAction,
    /// Overrides the user config file location.
    pub config: Option<PathBuf>,
}

pub enum PreferencesAction {
    Show,
    Init,
    Reset,
}

impl Command for PreferencesCommand {
    fn execute(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        match &self.action {
            PreferencesAction::Show => self.show(&mut stdout).map_err(Into::into),
            PreferencesAction::Init => self.init(&mut stdout).map_err(Into::into),
            PreferencesAction::Reset => self.reset(&mut stdout).map_err(Into::into),
        }
    }
}

impl PreferencesCommand {
    fn path(&self) -> std::result::Result<PathBuf, Error> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Preferences::config_path()?),
        }
    }

    fn show(&self, out: &mut impl Write) -> std::result::Result<(), Error> {
        let path = self.path()?;
        let prefs = Preferences::load_from(&path)?;

        writeln!(out, "Preferences file: {}", path.display())?;
        writeln!(out, "\n{}", toml::to_string_pretty(&prefs)?)?;
        Ok(())
    }

    /// Write defaults, leaving an existing file alone.
    fn init(&self, out: &mut impl Write) -> std::result::Result<(), Error> {
        let path = self.path()?;
        if path.exists() {
            writeln!(out, "Preferences file already exists: {}", path.display())?;
            return Ok(());
        }
        Preferences::default().save_to(&path)?;
        writeln!(out, "Wrote default preferences to {}", path.display())?;
        Ok(())
    }

    fn reset(&self, out: &mut impl Write) -> std::result::Result<(), Error> {
        let path = self.path()?;
        Self::remove(&path, out)
    }

    fn remove(path: &Path, out: &mut impl Write) -> std::result::Result<(), Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
            writeln!(out, "Preferences reset to defaults")?;
        } else {
            writeln!(out, "No preferences file found")?;
        }
        Ok(())
    }
}
