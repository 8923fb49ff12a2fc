use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

pub type Id = String;
pub type AnyValue = Value;

pub const SPEC_VERSION: &str = "1.0";

/// A CloudEvents-shaped envelope as received by the publisher.
///
/// Only `source` and `ty` are interpreted by the builders; everything else
/// (payload, extensions) travels through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "new_id")]
    pub id: Id,
    pub source: String,
    /// `type` on the wire (reserved keyword in Rust).
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default = "default_spec_version")]
    pub specversion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacontenttype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnyValue>,
    /// Extension attributes, e.g. `originaltype` or tracing headers.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, AnyValue>,
}

fn new_id() -> Id {
    Uuid::new_v4().to_string()
}

fn default_spec_version() -> String {
    SPEC_VERSION.to_string()
}

impl Event {
    pub fn new(source: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            source: source.into(),
            ty: ty.into(),
            specversion: default_spec_version(),
            time: Some(Utc::now()),
            datacontenttype: None,
            data: None,
            extensions: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, content_type: impl Into<String>, data: AnyValue) -> Self {
        self.datacontenttype = Some(content_type.into());
        self.data = Some(data);
        self
    }

    /// Returns a copy carrying the given source and type. `self` is left as is.
    pub fn with_source_and_type(&self, source: impl Into<String>, ty: impl Into<String>) -> Self {
        let mut event = self.clone();
        event.source = source.into();
        event.ty = ty.into();
        event
    }

    pub fn set_extension(&mut self, name: impl Into<String>, value: impl Into<AnyValue>) {
        self.extensions.insert(name.into(), value.into());
    }

    pub fn extension(&self, name: &str) -> Option<&AnyValue> {
        self.extensions.get(name)
    }
}
