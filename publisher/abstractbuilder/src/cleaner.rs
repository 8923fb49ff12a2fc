//! Cleaner capability.
//!
//! A cleaner turns a source or an event type into a string that is legal for
//! one backend. Implementations must be idempotent: cleaning an already clean
//! value returns it unchanged. A value that reduces to empty is not a cleaner
//! failure; the builder's segment check rejects it.

use thiserror::Error;

use crate::error::EventField;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CleanError {
    #[error("{backend} cannot clean {field} {input:?}: {reason}")]
    Rejected {
        backend: &'static str,
        field: EventField,
        input: String,
        reason: String,
    },
}

pub trait Cleaner: Send + Sync {
    fn clean_source(&self, source: &str) -> Result<String, CleanError>;
    fn clean_event_type(&self, event_type: &str) -> Result<String, CleanError>;
}
