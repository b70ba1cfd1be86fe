//! Secret store access.
//!
//! # Security Guarantees
//!
//! - **NO shell**: The store program is spawned with an argument vector, so
//!   identifiers containing quotes, spaces or `$(...)` reach it unchanged
//! - **NO temporary files**: Secret values go from the tool's stdout to memory
//! - **NO secret logging**: Only collection/attribute names are ever traced
//!
//! The default store is libsecret's `secret-tool`, queried as
//! `secret-tool lookup <collection> <attribute>`.

use crate::error::LookupError;
use crate::mapping::SecretRef;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Default store program.
pub const DEFAULT_PROGRAM: &str = "secret-tool";

/// Something that can resolve a [`SecretRef`] to its value.
pub trait SecretStore {
    fn lookup(&self, secret: &SecretRef<'_>) -> Result<String, LookupError>;
}

impl<S: SecretStore + ?Sized> SecretStore for &S {
    fn lookup(&self, secret: &SecretRef<'_>) -> Result<String, LookupError> {
        (**self).lookup(secret)
    }
}

/// An external command-line secret store.
#[derive(Debug, Clone)]
pub struct SecretTool {
    program: PathBuf,
    args: Vec<String>,
    trim_trailing_newline: bool,
}

impl Default for SecretTool {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            args: vec!["lookup".to_string()],
            trim_trailing_newline: true,
        }
    }
}

impl SecretTool {
    /// Build a store that runs `program args... <collection> <attribute>`.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            trim_trailing_newline: true,
        }
    }

    /// Keep or drop the single trailing newline many tools print.
    pub fn trim_trailing_newline(mut self, trim: bool) -> Self {
        self.trim_trailing_newline = trim;
        self
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    fn command(&self, secret: &SecretRef<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(secret.collection)
            .arg(secret.attribute);
        cmd
    }
}

impl SecretStore for SecretTool {
    fn lookup(&self, secret: &SecretRef<'_>) -> Result<String, LookupError> {
        debug!(
            program = %self.program.display(),
            collection = secret.collection,
            attribute = secret.attribute,
            "querying secret store"
        );

        let output = self
            .command(secret)
            .output()
            .map_err(|source| LookupError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(LookupError::Failed {
                collection: secret.collection.to_string(),
                attribute: secret.attribute.to_string(),
                status: output.status,
                stderr: if stderr.is_empty() {
                    "Unknown error".to_string()
                } else {
                    stderr.to_string()
                },
            });
        }

        decode_output(secret, output.stdout, self.trim_trailing_newline)
    }
}

/// Decode the tool's stdout into a secret value.
///
/// Only one trailing line break (`\n` or `\r\n`) is removed; any other
/// whitespace belongs to the secret.
pub fn decode_output(
    secret: &SecretRef<'_>,
    stdout: Vec<u8>,
    trim_trailing_newline: bool,
) -> Result<String, LookupError> {
    let mut value = String::from_utf8(stdout).map_err(|_| LookupError::NotUtf8 {
        collection: secret.collection.to_string(),
        attribute: secret.attribute.to_string(),
    })?;

    if trim_trailing_newline && value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }

    Ok(value)
}

/// Secrets held in memory, keyed by `(collection, attribute)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    secrets: HashMap<(String, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret, replacing any previous value.
    pub fn insert(
        &mut self,
        collection: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.secrets
            .insert((collection.into(), attribute.into()), value.into());
    }

    pub fn with(
        mut self,
        collection: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(collection, attribute, value);
        self
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl SecretStore for MemoryStore {
    fn lookup(&self, secret: &SecretRef<'_>) -> Result<String, LookupError> {
        self.secrets
            .get(&(secret.collection.to_string(), secret.attribute.to_string()))
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                collection: secret.collection.to_string(),
                attribute: secret.attribute.to_string(),
            })
    }
}
