//! Application registry: maps a raw event source to a known application.
//!
//! The builder only reads through [`ApplicationResolver`]. How the registry is
//! filled and refreshed is up to whoever owns the [`ApplicationLister`].

pub mod lister;
pub mod record;
pub mod resolver;

pub use lister::{ApplicationLister, LoadError};
pub use record::{ApplicationRecord, TYPE_LABEL};
pub use resolver::{ApplicationResolver, NoopResolver, ResolveError};
