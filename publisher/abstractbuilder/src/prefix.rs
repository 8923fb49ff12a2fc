use std::fmt;

use thiserror::Error;

use crate::segments::{has_empty_segment, split_segments, SEGMENT_SEPARATOR};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    #[error("event type prefix must not be empty")]
    Empty,
    #[error("event type prefix {0:?} contains an empty segment")]
    EmptySegment(String),
}

/// Prefix prepended to every composed event type, e.g. `sap.kyma.custom`.
///
/// Validated once at construction so that composing can never introduce an
/// empty segment on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePrefix(String);

impl TypePrefix {
    pub fn new(prefix: impl Into<String>) -> Result<Self, PrefixError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(PrefixError::Empty);
        }
        if has_empty_segment(&split_segments(&prefix)) {
            return Err(PrefixError::EmptySegment(prefix));
        }
        Ok(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{prefix}.{source}.{event_type}`
    pub fn compose(&self, source: &str, event_type: &str) -> String {
        let capacity = self.0.len() + source.len() + event_type.len() + 2;
        let mut composed = String::with_capacity(capacity);
        composed.push_str(&self.0);
        composed.push(SEGMENT_SEPARATOR);
        composed.push_str(source);
        composed.push(SEGMENT_SEPARATOR);
        composed.push_str(event_type);
        composed
    }
}

impl fmt::Display for TypePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TypePrefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
