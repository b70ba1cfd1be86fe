//! Secret injection into a build's definition set.
//!
//! # Guarantees
//!
//! - **Fail-fast**: The first failed lookup stops the pass; no further
//!   lookups are issued
//! - **No rollback**: Definitions appended before a failure stay in the sink
//! - **Explicit sink**: The build configuration is passed in, never global
//!
//! # Example
//!
//! ```
//! use secret_defines::injector::inject;
//! use secret_defines::mapping::SECRET_MAPPINGS;
//! use secret_defines::sink::DefinitionSet;
//! use secret_defines::store::MemoryStore;
//!
//! # fn main() -> Result<(), secret_defines::LookupError> {
//! let store = MemoryStore::new()
//!     .with("wifi", "ssid", "MyNetwork")
//!     .with("wifi", "password", "Sup3rSecret")
//!     .with("mqtt", "user", "device01")
//!     .with("mqtt", "password", "hunter2");
//!
//! let mut defines = DefinitionSet::new();
//! inject(&store, &SECRET_MAPPINGS, &mut defines)?;
//!
//! assert_eq!(defines.get("MQTT_USER"), Some("device01"));
//! # Ok(())
//! # }
//! ```

use crate::error::LookupError;
use crate::mapping::{SecretMapping, SecretRef};
use crate::sink::{BuildDefinition, DefinitionSink};
use crate::store::SecretStore;
use tracing::{debug, warn};

/// Look up one secret after checking its identifiers.
///
/// # Errors
///
/// Returns [`LookupError::InvalidIdentifier`] without touching the store if:
/// - An identifier is empty
/// - An identifier contains a NUL byte
/// - An identifier starts with `-` (it would be read as an option)
///
/// Any error from the store itself is passed through unchanged.
pub fn lookup_secret<S: SecretStore + ?Sized>(
    store: &S,
    collection: &str,
    attribute: &str,
) -> Result<String, LookupError> {
    validate_identifier(collection)?;
    validate_identifier(attribute)?;

    store.lookup(&SecretRef::new(collection, attribute))
}

/// Look up every mapping in order and append `name = value` to `sink`.
///
/// Stops at the first failure. Definitions appended before it are left in
/// the sink; callers that need all-or-nothing should inject into a scratch
/// [`DefinitionSet`](crate::sink::DefinitionSet) and only publish on success.
pub fn inject<S, K>(store: &S, mappings: &[SecretMapping], sink: &mut K) -> Result<(), LookupError>
where
    S: SecretStore + ?Sized,
    K: DefinitionSink + ?Sized,
{
    for (index, mapping) in mappings.iter().enumerate() {
        let value = match lookup_secret(store, mapping.collection, mapping.attribute) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    name = mapping.name,
                    appended = index,
                    "secret lookup failed, stopping injection"
                );
                return Err(e);
            }
        };

        debug!(name = mapping.name, len = value.len(), "injecting definition");
        sink.append(BuildDefinition::new(mapping.name, value));
    }

    Ok(())
}

fn validate_identifier(identifier: &str) -> Result<(), LookupError> {
    let reason = if identifier.is_empty() {
        "must not be empty"
    } else if identifier.contains('\0') {
        "must not contain NUL bytes"
    } else if identifier.starts_with('-') {
        "must not start with '-'"
    } else {
        return Ok(());
    };

    Err(LookupError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason,
    })
}
