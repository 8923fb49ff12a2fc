//! Event publisher core library.
//!
//! Turns the raw, possibly URL-escaped `source` and `type` of an inbound
//! event into a canonical pair a backend accepts:
//!
//! ```text
//! unescape → resolve application → clean source/type → compose → validate
//! ```
//!
//! Concrete cleaners and backend-specific builders live in the `backends`
//! crate; this crate only holds the contracts and the generic builder.
pub mod application;
pub mod builder;
pub mod cleaner;
pub mod error;
pub mod event;
pub mod prefix;
pub mod segments;
pub mod unescape;

pub use application::{
    ApplicationLister, ApplicationRecord, ApplicationResolver, LoadError, NoopResolver,
    ResolveError, TYPE_LABEL,
};
pub use builder::{CloudEventBuilder, GenericBuilder, GENERIC_BUILDER_NAME};
pub use cleaner::{CleanError, Cleaner};
pub use error::{BuildError, EventField};
pub use event::Event;
pub use prefix::{PrefixError, TypePrefix};
pub use segments::{has_empty_segment, split_segments, SEGMENT_SEPARATOR};
pub use unescape::{query_unescape, UnescapeError};
