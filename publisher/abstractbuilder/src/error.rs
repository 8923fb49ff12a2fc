use std::fmt;

use thiserror::Error;

use crate::application::ResolveError;
use crate::cleaner::CleanError;
use crate::unescape::UnescapeError;

/// Which of the two identifiers an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Source,
    Type,
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// Terminal failure of a single build. No partial event is ever returned.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("cannot unescape event {field} {raw:?}: {cause}")]
    Decoding {
        field: EventField,
        raw: String,
        #[source]
        cause: UnescapeError,
    },
    #[error("cannot clean event source {event_source:?} / type {event_type:?}: {cause}")]
    Cleaning {
        event_source: String,
        event_type: String,
        #[source]
        cause: CleanError,
    },
    #[error("event type cannot have empty segments after cleaning: {composed}")]
    Validation {
        composed: String,
        event_source: String,
        event_type: String,
    },
    #[error("cannot resolve application for source {event_source:?}: {cause}")]
    ResolverUnavailable {
        event_source: String,
        #[source]
        cause: ResolveError,
    },
}

impl BuildError {
    /// Only a registry outage may succeed on a later attempt; every other
    /// failure is a property of the event itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ResolverUnavailable { .. })
    }
}
