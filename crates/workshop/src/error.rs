use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Failed to serialize layout: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("Not a root message: {0}")]
    NotARoot(String),

    #[error("{child} is not a reply to {parent}")]
    NotAChild { parent: String, child: String },

    #[error(transparent)]
    Core(#[from] workshop_core::error::Error),
}
