use async_trait::async_trait;
use thiserror::Error;

use super::record::ApplicationRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("application registry unavailable: {0}")]
    Unavailable(String),
}

/// Read-only lookup from a raw event source to a known application.
///
/// `Ok(None)` means "not found" and is a normal outcome. `Err` is reserved
/// for a registry that cannot answer at all.
#[async_trait]
pub trait ApplicationResolver: Send + Sync {
    async fn resolve(&self, source: &str) -> Result<Option<ApplicationRecord>, ResolveError>;
}

/// Resolver for deployments without an application registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

#[async_trait]
impl ApplicationResolver for NoopResolver {
    async fn resolve(&self, _source: &str) -> Result<Option<ApplicationRecord>, ResolveError> {
        Ok(None)
    }
}
