//! Secret Defines - inject secret-store credentials into firmware builds.
//!
//! This library looks up WiFi and MQTT credentials in an external secret
//! store and appends them as preprocessor definitions to a build's
//! definition sink, without ever passing them through a shell.

pub mod config;
pub mod error;
pub mod injector;
pub mod mapping;
pub mod render;
pub mod sink;
pub mod store;

pub use error::LookupError;
pub use injector::{inject, lookup_secret};
pub use mapping::{SecretMapping, SecretRef, SECRET_MAPPINGS};
pub use sink::{BuildDefinition, DefinitionSet, DefinitionSink};
pub use store::{MemoryStore, SecretStore, SecretTool};
