//! SAP Event Mesh (BEB) cleaner and builder.

use abstractbuilder::{
    BuildError, CleanError, Cleaner, CloudEventBuilder, Event, EventField, GenericBuilder,
};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, Span};

/// Longest event type (after cleaning) Event Mesh accepts.
pub const EVENT_MESH_MAX_TYPE_LENGTH: usize = 100;

/// Extension attribute carrying the inbound type before cleaning.
pub const ORIGINAL_TYPE_EXTENSION: &str = "originaltype";

/// Extension attribute carrying the Event Mesh namespace to publish under.
pub const NAMESPACE_EXTENSION: &str = "eventmeshnamespace";

const BACKEND_NAME: &str = "BEB";

static INVALID_SOURCE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("invalid source pattern"));
static INVALID_TYPE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9.]").expect("invalid event type pattern"));

/// Keeps ASCII alphanumerics (and dots in event types) only.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventMeshCleaner;

impl Cleaner for EventMeshCleaner {
    fn clean_source(&self, source: &str) -> Result<String, CleanError> {
        Ok(INVALID_SOURCE_CHARS.replace_all(source, "").into_owned())
    }

    fn clean_event_type(&self, event_type: &str) -> Result<String, CleanError> {
        let cleaned = INVALID_TYPE_CHARS.replace_all(event_type, "");
        if cleaned.len() > EVENT_MESH_MAX_TYPE_LENGTH {
            return Err(CleanError::Rejected {
                backend: BACKEND_NAME,
                field: EventField::Type,
                input: event_type.to_string(),
                reason: format!(
                    "cleaned length {} exceeds the maximum of {EVENT_MESH_MAX_TYPE_LENGTH}",
                    cleaned.len()
                ),
            });
        }
        Ok(cleaned.into_owned())
    }
}

/// Generic build plus the attributes Event Mesh publishing needs: the
/// namespace in `eventmeshnamespace` and the inbound type in `originaltype`.
/// `source` stays the cleaned source; the publisher swaps in the namespace.
pub struct EventMeshBuilder {
    generic: GenericBuilder,
    namespace: String,
    logger: Span,
}

impl EventMeshBuilder {
    /// `generic` should be configured with an [`EventMeshCleaner`].
    pub fn new(generic: GenericBuilder, namespace: impl Into<String>, logger: Span) -> Self {
        Self {
            generic,
            namespace: namespace.into(),
            logger,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[async_trait]
impl CloudEventBuilder for EventMeshBuilder {
    async fn build(&self, event: &Event) -> Result<Event, BuildError> {
        let mut built = self.generic.build(event).await?;
        debug!(
            parent: &self.logger,
            namespace = %self.namespace,
            event_type = %built.ty,
            "attaching event mesh namespace"
        );
        built.set_extension(NAMESPACE_EXTENSION, self.namespace.clone());
        built.set_extension(ORIGINAL_TYPE_EXTENSION, event.ty.clone());
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abstractbuilder::{
        ApplicationLister, ApplicationRecord, NoopResolver, TypePrefix, TYPE_LABEL,
    };
    use proptest::prelude::*;
    use std::sync::Arc;

    const NAMESPACE: &str = "/default/sap.kyma/tunas-develop";

    fn builder(resolver: Arc<dyn abstractbuilder::ApplicationResolver>) -> EventMeshBuilder {
        let generic = GenericBuilder::new(
            TypePrefix::new("sap.kyma.custom").unwrap(),
            Arc::new(EventMeshCleaner),
            resolver,
            Span::none(),
        );
        EventMeshBuilder::new(generic, NAMESPACE, Span::none())
    }

    #[test]
    fn test_clean_source() {
        let c = EventMeshCleaner;
        assert_eq!(c.clean_source("my-app").unwrap(), "myapp");
        assert_eq!(c.clean_source("Order Service").unwrap(), "OrderService");
        assert_eq!(c.clean_source("-_-").unwrap(), "");
    }

    #[test]
    fn test_clean_event_type() {
        let c = EventMeshCleaner;
        assert_eq!(c.clean_event_type("order.created.v1").unwrap(), "order.created.v1");
        assert_eq!(c.clean_event_type("order_created-now.v1").unwrap(), "ordercreatednow.v1");
    }

    #[test]
    fn test_rejects_overlong_type() {
        let long = format!("order.{}.v1", "x".repeat(EVENT_MESH_MAX_TYPE_LENGTH));
        let err = EventMeshCleaner.clean_event_type(&long).unwrap_err();
        assert!(matches!(err, CleanError::Rejected { field: EventField::Type, .. }));

        // dropped characters do not count towards the limit
        let padded = format!("order.created.v1{}", "-".repeat(EVENT_MESH_MAX_TYPE_LENGTH));
        assert_eq!(EventMeshCleaner.clean_event_type(&padded).unwrap(), "order.created.v1");
    }

    #[tokio::test]
    async fn test_build_keeps_clean_source_and_attaches_namespace() {
        let b = builder(Arc::new(NoopResolver));
        let event = Event::new("my-app", "order.created.v1");

        let built = b.build(&event).await.unwrap();
        assert_eq!(built.ty, "sap.kyma.custom.myapp.order.created.v1");
        assert_eq!(built.source, "myapp");
        assert_eq!(
            built.extension(NAMESPACE_EXTENSION),
            Some(&serde_json::Value::from(NAMESPACE))
        );
        assert_eq!(
            built.extension(ORIGINAL_TYPE_EXTENSION),
            Some(&serde_json::Value::from("order.created.v1"))
        );
        assert!(event.extension(ORIGINAL_TYPE_EXTENSION).is_none());
    }

    #[tokio::test]
    async fn test_build_uses_application_type() {
        let lister = ApplicationLister::from_records(vec![
            ApplicationRecord::new("my-app").with_label(TYPE_LABEL, "Order Service"),
        ]);
        let b = builder(Arc::new(lister));

        let built = b.build(&Event::new("my-app", "order.created.v1")).await.unwrap();
        assert_eq!(built.ty, "sap.kyma.custom.OrderService.order.created.v1");
        assert_eq!(built.source, "OrderService");
    }

    #[tokio::test]
    async fn test_build_propagates_generic_errors() {
        let b = builder(Arc::new(NoopResolver));

        let err = b.build(&Event::new("-_-", "order.created.v1")).await.unwrap_err();
        assert!(matches!(err, BuildError::Validation { .. }));
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(s in "\\PC{0,120}") {
            let source = EventMeshCleaner.clean_source(&s).unwrap();
            prop_assert_eq!(EventMeshCleaner.clean_source(&source).unwrap(), source);

            if let Ok(ty) = EventMeshCleaner.clean_event_type(&s) {
                prop_assert_eq!(EventMeshCleaner.clean_event_type(&ty).unwrap(), ty);
            }
        }
    }
}
