use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label overriding the application name as the event source.
pub const TYPE_LABEL: &str = "application-type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Registry key; matches the raw event source.
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ApplicationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// The `application-type` label if set, otherwise the name.
    pub fn canonical_name(&self) -> &str {
        match self.labels.get(TYPE_LABEL) {
            Some(ty) if !ty.trim().is_empty() => ty,
            _ => &self.name,
        }
    }
}
