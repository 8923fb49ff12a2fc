use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, debug_span, Span};

use crate::application::ApplicationResolver;
use crate::cleaner::Cleaner;
use crate::error::{BuildError, EventField};
use crate::event::Event;
use crate::prefix::TypePrefix;
use crate::segments::{has_empty_segment, split_segments};
use crate::unescape::query_unescape;

/// Name of the logger span handed to the generic builder.
pub const GENERIC_BUILDER_NAME: &str = "generic-type-builder";

/// Produces a backend-compatible copy of an inbound event.
///
/// Every backend variant implements this, so callers can swap backends
/// without touching the call site.
#[async_trait]
pub trait CloudEventBuilder: Send + Sync {
    async fn build(&self, event: &Event) -> Result<Event, BuildError>;
}

/// Builder composing `{prefix}.{source}.{type}` with a pluggable cleaner.
///
/// Holds no mutable state; one instance can serve concurrent builds.
pub struct GenericBuilder {
    type_prefix: TypePrefix,
    cleaner: Arc<dyn Cleaner>,
    resolver: Arc<dyn ApplicationResolver>,
    logger: Span,
}

impl GenericBuilder {
    /// `logger` is the parent span of every record this builder emits.
    pub fn new(
        type_prefix: TypePrefix,
        cleaner: Arc<dyn Cleaner>,
        resolver: Arc<dyn ApplicationResolver>,
        logger: Span,
    ) -> Self {
        Self {
            type_prefix,
            cleaner,
            resolver,
            logger,
        }
    }

    pub fn type_prefix(&self) -> &TypePrefix {
        &self.type_prefix
    }

    /// Canonical application name when the registry knows `source`,
    /// otherwise `source` itself.
    pub async fn app_name_or_source(
        &self,
        source: &str,
        logger: &Span,
    ) -> Result<String, BuildError> {
        match self.resolver.resolve(source).await {
            Ok(Some(app)) => {
                let name = app.canonical_name().to_string();
                debug!(
                    parent: logger,
                    application = %source,
                    "using application name {name} as source"
                );
                Ok(name)
            }
            Ok(None) => {
                debug!(parent: logger, application = %source, "cannot find application");
                Ok(source.to_string())
            }
            Err(cause) => Err(BuildError::ResolverUnavailable {
                event_source: source.to_string(),
                cause,
            }),
        }
    }
}

#[async_trait]
impl CloudEventBuilder for GenericBuilder {
    async fn build(&self, event: &Event) -> Result<Event, BuildError> {
        let event_source = query_unescape(&event.source).map_err(|cause| BuildError::Decoding {
            field: EventField::Source,
            raw: event.source.clone(),
            cause,
        })?;
        let event_type = query_unescape(&event.ty).map_err(|cause| BuildError::Decoding {
            field: EventField::Type,
            raw: event.ty.clone(),
            cause,
        })?;

        let logger = debug_span!(
            parent: &self.logger,
            "build",
            source = %event_source,
            event_type = %event_type
        );

        let app_name = self.app_name_or_source(&event_source, &logger).await?;

        let cleaning_error = |cause| BuildError::Cleaning {
            event_source: event_source.clone(),
            event_type: event_type.clone(),
            cause,
        };
        let clean_source = self.cleaner.clean_source(&app_name).map_err(cleaning_error)?;
        let clean_type = self.cleaner.clean_event_type(&event_type).map_err(cleaning_error)?;

        let final_type = self.type_prefix.compose(&clean_source, &clean_type);
        if has_empty_segment(&split_segments(&final_type)) {
            return Err(BuildError::Validation {
                composed: final_type,
                event_source,
                event_type,
            });
        }
        debug!(parent: &logger, "using event type: {final_type}");

        Ok(event.with_source_and_type(clean_source, final_type))
    }
}
