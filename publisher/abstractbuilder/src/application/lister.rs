use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use super::record::ApplicationRecord;
use super::resolver::{ApplicationResolver, ResolveError};

/// Why [`ApplicationLister::load_json`] failed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read applications file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed applications file: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-memory application cache keyed by application name.
///
/// A lister created with [`ApplicationLister::new`] has not synced yet and
/// answers every lookup with [`ResolveError::Unavailable`] until the first
/// [`replace_all`](ApplicationLister::replace_all).
#[derive(Debug, Default)]
pub struct ApplicationLister {
    inner: RwLock<HashMap<String, ApplicationRecord>>,
    synced: AtomicBool,
}

impl ApplicationLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ApplicationRecord>) -> Self {
        let inner = records.into_iter().map(|r| (r.name.clone(), r)).collect();
        Self {
            inner: RwLock::new(inner),
            synced: AtomicBool::new(true),
        }
    }

    /// Reads a JSON array of records.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let raw = tokio::fs::read(path.as_ref()).await?;
        let records: Vec<ApplicationRecord> = serde_json::from_slice(&raw)?;
        debug!(path = %path.as_ref().display(), count = records.len(), "loaded applications");
        Ok(Self::from_records(records))
    }

    pub fn has_synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    pub async fn replace_all(&self, records: impl IntoIterator<Item = ApplicationRecord>) {
        let mut inner = self.inner.write().await;
        *inner = records.into_iter().map(|r| (r.name.clone(), r)).collect();
        self.synced.store(true, Ordering::Release);
    }

    pub async fn upsert(&self, record: ApplicationRecord) {
        self.inner.write().await.insert(record.name.clone(), record);
    }

    pub async fn remove(&self, name: &str) -> Option<ApplicationRecord> {
        self.inner.write().await.remove(name)
    }

    pub async fn get(&self, name: &str) -> Option<ApplicationRecord> {
        self.inner.read().await.get(name).cloned()
    }

    pub async fn list(&self) -> Vec<ApplicationRecord> {
        self.inner.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl ApplicationResolver for ApplicationLister {
    async fn resolve(&self, source: &str) -> Result<Option<ApplicationRecord>, ResolveError> {
        if !self.has_synced() {
            return Err(ResolveError::Unavailable("application cache has not synced".to_string()));
        }
        Ok(self.get(source).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::record::TYPE_LABEL;
    use std::io::Write;

    #[tokio::test]
    async fn test_unsynced_lister_is_unavailable() {
        let lister = ApplicationLister::new();
        assert!(!lister.has_synced());
        assert!(matches!(lister.resolve("my-app").await, Err(ResolveError::Unavailable(_))));

        lister.replace_all(vec![ApplicationRecord::new("my-app")]).await;
        assert!(lister.has_synced());
        assert_eq!(lister.resolve("my-app").await.unwrap(), Some(ApplicationRecord::new("my-app")));
    }

    #[tokio::test]
    async fn test_lookup_and_mutation() {
        let lister = ApplicationLister::from_records(vec![ApplicationRecord::new("a")]);
        assert_eq!(lister.resolve("missing").await.unwrap(), None);

        lister.upsert(ApplicationRecord::new("b").with_label(TYPE_LABEL, "Billing")).await;
        assert_eq!(lister.get("b").await.unwrap().canonical_name(), "Billing");
        assert_eq!(lister.list().await.len(), 2);

        assert!(lister.remove("a").await.is_some());
        assert_eq!(lister.resolve("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"my-app","labels":{{"application-type":"Order Service"}}}},"#
        )
        .unwrap();
        write!(file, r#"{{"name":"other"}}]"#).unwrap();

        let lister = ApplicationLister::load_json(file.path()).await.unwrap();
        let record = lister.resolve("my-app").await.unwrap().unwrap();
        assert_eq!(record.canonical_name(), "Order Service");
        assert!(lister.get("other").await.unwrap().labels.is_empty());
    }

    #[tokio::test]
    async fn test_load_json_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ApplicationLister::load_json(dir.path().join("absent.json")).await.unwrap_err();
        match err {
            LoadError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_json_malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name":"my-app""#).unwrap();

        let err = ApplicationLister::load_json(file.path()).await.unwrap_err();
        assert!(matches!(err, LoadError::Json(_)), "{err:?}");
        assert!(err.to_string().starts_with("malformed applications file"));
    }
}
