use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Messaging backend the published events are cleaned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackendType {
    /// NATS JetStream.
    #[default]
    #[serde(rename = "NATS")]
    Nats,
    /// SAP Event Mesh (BEB).
    #[serde(rename = "BEB")]
    Beb,
    /// Any sink without backend-specific restrictions.
    #[serde(rename = "GENERIC")]
    Generic,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown backend {0:?}, expected one of NATS, BEB, GENERIC")]
pub struct ParseBackendError(String);

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nats => write!(f, "NATS"),
            Self::Beb => write!(f, "BEB"),
            Self::Generic => write!(f, "GENERIC"),
        }
    }
}

impl FromStr for BackendType {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NATS" => Ok(Self::Nats),
            "BEB" => Ok(Self::Beb),
            "GENERIC" => Ok(Self::Generic),
            _ => Err(ParseBackendError(s.to_string())),
        }
    }
}
