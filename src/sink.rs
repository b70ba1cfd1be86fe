//! Build definitions and the sinks that collect them.

use serde::Serialize;

/// A preprocessor-level `name = value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDefinition {
    pub name: String,
    pub value: String,
}

impl BuildDefinition {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The build-configuration object that accumulates definitions.
pub trait DefinitionSink {
    fn append(&mut self, definition: BuildDefinition);
}

impl<K: DefinitionSink + ?Sized> DefinitionSink for &mut K {
    fn append(&mut self, definition: BuildDefinition) {
        (**self).append(definition)
    }
}

impl DefinitionSink for Vec<BuildDefinition> {
    fn append(&mut self, definition: BuildDefinition) {
        self.push(definition);
    }
}

/// Ordered, in-memory definition set.
///
/// Appending the same name twice keeps both entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSet {
    definitions: Vec<BuildDefinition>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the first definition named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.definitions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildDefinition> {
        self.definitions.iter()
    }

    pub fn as_slice(&self) -> &[BuildDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl DefinitionSink for DefinitionSet {
    fn append(&mut self, definition: BuildDefinition) {
        self.definitions.push(definition);
    }
}

impl<'a> IntoIterator for &'a DefinitionSet {
    type Item = &'a BuildDefinition;
    type IntoIter = std::slice::Iter<'a, BuildDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
