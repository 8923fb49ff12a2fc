//! Backend-specific cleaners and builders.
//!
//! | Backend | Builder | Cleaner |
//! |---------|---------|---------|
//! | `NATS` | [`GenericBuilder`](abstractbuilder::GenericBuilder) | [`JetStreamCleaner`] |
//! | `BEB` | [`EventMeshBuilder`] | [`EventMeshCleaner`] |
//! | `GENERIC` | [`GenericBuilder`](abstractbuilder::GenericBuilder) | [`GenericCleaner`] |
//!
//! Use [`new_builder`] to get the right combination for a [`BackendType`].

pub mod backend;
pub mod eventmesh;
pub mod factory;
pub mod generic;
pub mod jetstream;

pub use backend::{BackendType, ParseBackendError};
pub use eventmesh::{
    EventMeshBuilder, EventMeshCleaner, EVENT_MESH_MAX_TYPE_LENGTH, NAMESPACE_EXTENSION,
    ORIGINAL_TYPE_EXTENSION,
};
pub use factory::{new_builder, BuilderOptions, FactoryError};
pub use generic::GenericCleaner;
pub use jetstream::JetStreamCleaner;
