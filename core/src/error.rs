//! Error type for dictionary acquisition, snapshots and configuration.
//!
//! Lookup misses are not errors: they are plain `None`s and end in passthrough.
//! Malformed dictionary lines are skipped and counted, never raised.

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dictionary source could not be acquired.
    #[error("dictionary source `{id}` unavailable: {reason}")]
    SourceUnavailable { id: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Dictionary snapshot could not be encoded or decoded.
    #[error("snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error(transparent)]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    ConfigWrite(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn unavailable(id: &str, reason: impl std::fmt::Display) -> Self {
        Self::SourceUnavailable {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}
