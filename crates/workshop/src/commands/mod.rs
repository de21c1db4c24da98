use eyre::Result;

pub mod branches;
pub mod minimap;
pub mod path;
pub mod preferences;
pub mod selection;

pub trait Command {
    fn execute(&self) -> Result<()>;
}
