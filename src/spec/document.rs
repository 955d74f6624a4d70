//! Spec document decoding.
//!
//! # Responsibilities
//! - Decode an OpenAPI document from JSON or YAML
//! - Enforce the 3.1+ version gate before anything else runs
//! - Flatten `paths` into an ordered endpoint list
//!
//! # Design Decisions
//! - Everything becomes a serde_json value internally; YAML is transcoded
//! - Fixed non-operation keys on a path item (`parameters`, `summary`, ...)
//!   are skipped; any other unrecognized key is an input error
//! - No schema validation beyond the version field: operation bodies are
//!   opaque definition metadata

use serde_json::Value;
use thiserror::Error;

use crate::spec::endpoint::{CompileError, Endpoint};

/// Path-item keys that are not operations and carry no route.
const NON_OPERATION_KEYS: [&str; 5] = ["parameters", "summary", "description", "servers", "$ref"];

/// Error raised while decoding a spec document.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to decode document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("document has no `openapi` version field")]
    MissingVersion,

    #[error("unsupported OpenAPI version `{0}`: 3.1 or newer required")]
    UnsupportedVersion(String),

    #[error("`paths` is missing or not an object")]
    MalformedPaths,

    #[error(transparent)]
    Invalid(#[from] CompileError),
}

/// A decoded, version-checked OpenAPI document.
#[derive(Debug, Clone)]
pub struct Document {
    raw: Value,
}

impl Document {
    /// Decode a JSON document.
    pub fn from_json(source: &str) -> Result<Self, SpecError> {
        let raw: Value = serde_json::from_str(source)?;
        Self::from_value(raw)
    }

    /// Decode a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, SpecError> {
        let raw: Value = serde_yaml::from_str(source)?;
        Self::from_value(raw)
    }

    /// Accept an already-decoded document value.
    pub fn from_value(raw: Value) -> Result<Self, SpecError> {
        let version = match raw.get("openapi") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(SpecError::MissingVersion),
        };
        if !version_supported(&version) {
            return Err(SpecError::UnsupportedVersion(version));
        }
        Ok(Self { raw })
    }

    /// The document as decoded, for publishing or inspection.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Flatten `paths` into endpoints, preserving document order.
    pub fn endpoints(&self) -> Result<Vec<Endpoint>, SpecError> {
        let paths = self
            .raw
            .get("paths")
            .and_then(Value::as_object)
            .ok_or(SpecError::MalformedPaths)?;

        let mut endpoints = Vec::new();
        for (url, item) in paths {
            let item = item.as_object().ok_or(SpecError::MalformedPaths)?;
            for (verb, definition) in item {
                if NON_OPERATION_KEYS.contains(&verb.as_str()) {
                    continue;
                }
                endpoints.push(Endpoint::new(verb, url.clone(), definition.clone())?);
            }
        }
        Ok(endpoints)
    }
}

/// True for version strings whose (major, minor) is at least (3, 1).
fn version_supported(version: &str) -> bool {
    let mut parts = version.split('.');
    let major: u32 = match parts.next().and_then(|p| p.parse().ok()) {
        Some(n) => n,
        None => return false,
    };
    let minor: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor) >= (3, 1)
}
