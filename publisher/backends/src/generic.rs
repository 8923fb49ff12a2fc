use abstractbuilder::{CleanError, Cleaner};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));
static INVALID_SOURCE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_-]").expect("invalid source pattern"));
static INVALID_TYPE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_.-]").expect("invalid event type pattern"));

/// Lower-case, whitespace runs become `-`, everything else illegal is dropped.
///
/// `"Order Service"` cleans to `"order-service"`. Never rejects.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericCleaner;

fn clean(input: &str, invalid: &Regex) -> String {
    let lowered = input.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    invalid.replace_all(&hyphenated, "").into_owned()
}

impl Cleaner for GenericCleaner {
    fn clean_source(&self, source: &str) -> Result<String, CleanError> {
        Ok(clean(source, &INVALID_SOURCE_CHARS))
    }

    fn clean_event_type(&self, event_type: &str) -> Result<String, CleanError> {
        Ok(clean(event_type, &INVALID_TYPE_CHARS))
    }
}
