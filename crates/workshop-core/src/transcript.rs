//! Loading chat message listings as returned by the messages endpoint.

use std::path::Path;
use tracing::debug;

use crate::conversation::{Message, MessageListing};
use crate::error::{Error, Result};

/// Read a listing: either a bare JSON array or `{ "messages": [...] }`.
pub fn load_messages(path: &Path) -> Result<Vec<Message>> {
    let raw = std::fs::read_to_string(path)?;
    let listing: MessageListing =
        serde_json::from_str(&raw).map_err(|source| Error::Transcript {
            path: path.to_path_buf(),
            source,
        })?;
    let messages = listing.into_messages();

    debug!(
        target: "transcript::load",
        path = %path.display(),
        count = messages.len(),
        "Loaded messages"
    );
    Ok(messages)
}
