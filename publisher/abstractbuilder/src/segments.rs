//! Structural check on composed event types.

pub const SEGMENT_SEPARATOR: char = '.';

pub fn split_segments(event_type: &str) -> Vec<&str> {
    event_type.split(SEGMENT_SEPARATOR).collect()
}

/// True when any segment is the empty string.
pub fn has_empty_segment<S: AsRef<str>>(segments: &[S]) -> bool {
    segments.iter().any(|s| s.as_ref().is_empty())
}
