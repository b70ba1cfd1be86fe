//! Error type for secret lookups.

use std::process::ExitStatus;
use thiserror::Error;

/// A secret could not be retrieved from the store.
///
/// Every failure of the lookup path is reported through this one type so the
/// caller can abort the build without inspecting where it went wrong.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The identifier was refused before the store was queried.
    #[error("invalid secret identifier {identifier:?}: {reason}")]
    InvalidIdentifier {
        identifier: String,
        reason: &'static str,
    },

    /// The store program could not be started (not installed, not executable).
    #[error("failed to run secret store '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The store program ran but reported failure.
    #[error("secret lookup {collection}/{attribute} failed ({status}): {stderr}")]
    Failed {
        collection: String,
        attribute: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The store printed something that is not UTF-8.
    #[error("secret {collection}/{attribute} is not valid UTF-8")]
    NotUtf8 {
        collection: String,
        attribute: String,
    },

    /// The store has no entry for the reference.
    #[error("secret {collection}/{attribute} not found")]
    NotFound {
        collection: String,
        attribute: String,
    },
}
