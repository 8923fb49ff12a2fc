use abstractbuilder::{
    ApplicationResolver, CloudEventBuilder, GenericBuilder, PrefixError, TypePrefix,
    GENERIC_BUILDER_NAME,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug_span, Span};

use crate::backend::BackendType;
use crate::eventmesh::{EventMeshBuilder, EventMeshCleaner};
use crate::generic::GenericCleaner;
use crate::jetstream::JetStreamCleaner;

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error(transparent)]
    Prefix(#[from] PrefixError),
    #[error("backend {0} requires an event mesh namespace")]
    MissingNamespace(BackendType),
}

#[derive(Debug, Clone, Default)]
pub struct BuilderOptions {
    pub type_prefix: String,
    /// Required for [`BackendType::Beb`], ignored otherwise.
    pub event_mesh_namespace: Option<String>,
}

/// Builder for `backend`. Every record it logs is a child of `logger`.
pub fn new_builder(
    backend: BackendType,
    options: &BuilderOptions,
    resolver: Arc<dyn ApplicationResolver>,
    logger: Span,
) -> Result<Arc<dyn CloudEventBuilder>, FactoryError> {
    let type_prefix = TypePrefix::new(options.type_prefix.clone())?;
    let generic_logger = debug_span!(parent: &logger, GENERIC_BUILDER_NAME, backend = %backend);

    let builder: Arc<dyn CloudEventBuilder> = match backend {
        BackendType::Nats => Arc::new(GenericBuilder::new(
            type_prefix,
            Arc::new(JetStreamCleaner),
            resolver,
            generic_logger,
        )),
        BackendType::Generic => Arc::new(GenericBuilder::new(
            type_prefix,
            Arc::new(GenericCleaner),
            resolver,
            generic_logger,
        )),
        BackendType::Beb => {
            let namespace = options
                .event_mesh_namespace
                .as_deref()
                .map(str::trim)
                .filter(|ns| !ns.is_empty())
                .ok_or(FactoryError::MissingNamespace(backend))?;
            let cleaner = Arc::new(EventMeshCleaner);
            let generic = GenericBuilder::new(type_prefix, cleaner, resolver, generic_logger);
            Arc::new(EventMeshBuilder::new(
                generic,
                namespace,
                debug_span!(parent: &logger, "event-mesh-type-builder"),
            ))
        }
    };
    Ok(builder)
}
