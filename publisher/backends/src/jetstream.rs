//! NATS JetStream cleaner.
//!
//! Subjects are `.`-separated tokens; tokens may not contain whitespace or
//! the wildcards `*` and `>`. A source becomes a single token, so it also
//! loses its dots. Case is preserved.

use abstractbuilder::{CleanError, Cleaner};
use regex::Regex;
use std::sync::LazyLock;

static INVALID_SOURCE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\p{Cc}.*>]").expect("invalid source pattern"));
static INVALID_TYPE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\p{Cc}*>]").expect("invalid event type pattern"));

#[derive(Debug, Clone, Copy, Default)]
pub struct JetStreamCleaner;

impl Cleaner for JetStreamCleaner {
    fn clean_source(&self, source: &str) -> Result<String, CleanError> {
        Ok(INVALID_SOURCE_CHARS.replace_all(source, "").into_owned())
    }

    fn clean_event_type(&self, event_type: &str) -> Result<String, CleanError> {
        Ok(INVALID_TYPE_CHARS.replace_all(event_type, "").into_owned())
    }
}
