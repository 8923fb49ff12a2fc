use abstractbuilder::{PrefixError, TypePrefix};
use backends::{BackendType, BuilderOptions};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::logging::LogFormat;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid EVENT_TYPE_PREFIX: {0}")]
    Prefix(#[from] PrefixError),
    #[error("backend {0} requires EVENT_MESH_NAMESPACE")]
    MissingNamespace(BackendType),
    #[error("APP_LOG_LEVEL must not be empty")]
    EmptyLogLevel,
}

/// Publisher proxy settings, taken from flags or the environment.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "publisherproxy",
    version,
    about = "Cleans event sources and types before publishing"
)]
pub struct ProxyConfig {
    /// Backend the events are published to (NATS, BEB or GENERIC)
    #[arg(long, env = "BACKEND", default_value = "NATS")]
    pub backend: BackendType,

    /// Prefix of every composed event type
    #[arg(long, env = "EVENT_TYPE_PREFIX", default_value = "sap.kyma.custom")]
    pub event_type_prefix: String,

    /// Event Mesh namespace used as event source (BEB only)
    #[arg(long, env = "EVENT_MESH_NAMESPACE")]
    pub event_mesh_namespace: Option<String>,

    /// JSON array of applications known to the registry
    #[arg(long, env = "APPLICATIONS_FILE")]
    pub applications_file: Option<PathBuf>,

    #[arg(long, env = "APP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    #[arg(long, env = "APP_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl ProxyConfig {
    /// Cross-field checks clap cannot express. Fails fast.
    pub fn validate(&self) -> Result<(), ConfigError> {
        TypePrefix::new(self.event_type_prefix.as_str())?;

        let has_namespace = self
            .event_mesh_namespace
            .as_deref()
            .is_some_and(|ns| !ns.trim().is_empty());
        if self.backend == BackendType::Beb && !has_namespace {
            return Err(ConfigError::MissingNamespace(self.backend));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }
        Ok(())
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            type_prefix: self.event_type_prefix.clone(),
            event_mesh_namespace: self.event_mesh_namespace.clone(),
        }
    }
}
