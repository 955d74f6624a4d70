//! Endpoint model.
//!
//! # Responsibilities
//! - Represent one (method, path) pair plus opaque definition metadata
//! - Restrict methods to the five verbs routing conventions cover
//! - Translate `{name}` path placeholders to `:name` parameter syntax
//!
//! # Design Decisions
//! - The translated path is computed once at construction and immutable;
//!   insertion works on borrowed remainders, never on scratch fields
//! - Definitions are opaque JSON values passed through untouched

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// Error raised for malformed compiler input.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// The HTTP verbs REST routing conventions are defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Lowercase name, as it appears as a key in spec documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
        }
    }
}

impl FromStr for Method {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "patch" => Ok(Method::Patch),
            "delete" => Ok(Method::Delete),
            other => Err(CompileError::InvalidInput(format!(
                "unsupported HTTP method `{other}`"
            ))),
        }
    }
}

impl fmt::Display for Method {
    /// Uppercase verb, used in dumps and diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// One API endpoint: a verb, a path template, and its definition metadata.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: Method,
    raw_path: String,
    path: String,
    definition: Value,
}

impl Endpoint {
    /// Build an endpoint from a verb name and a `{name}`-style path template.
    ///
    /// Fails with [`CompileError::InvalidInput`] when the verb is not one of
    /// get/post/put/patch/delete.
    pub fn new(
        method: &str,
        path: impl Into<String>,
        definition: Value,
    ) -> Result<Self, CompileError> {
        let method = method.parse()?;
        let raw_path = path.into();
        let path = translate_path(&raw_path);
        Ok(Self {
            method,
            raw_path,
            path,
            definition,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The template as written in the document, `{name}` placeholders intact.
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// The working path with placeholders rewritten to `:name` parameters.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn definition(&self) -> &Value {
        &self.definition
    }
}

/// Rewrite every `{name}` token to `:name`. Unbalanced braces are copied
/// through verbatim.
fn translate_path(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        match rest[open..].find('}') {
            Some(close) => {
                out.push(':');
                out.push_str(&rest[open + 1..open + close]);
                rest = &rest[open + close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_translation() {
        let ep = Endpoint::new("get", "/a/{foo}/b/{bar}", Value::Null).unwrap();
        assert_eq!(ep.path(), "/a/:foo/b/:bar");
        assert_eq!(ep.raw_path(), "/a/{foo}/b/{bar}");
    }

    #[test]
    fn test_plain_path_unchanged() {
        let ep = Endpoint::new("post", "/pet/findByStatus", Value::Null).unwrap();
        assert_eq!(ep.path(), "/pet/findByStatus");
    }

    #[test]
    fn test_unbalanced_brace_copied_through() {
        let ep = Endpoint::new("get", "/a/{foo", Value::Null).unwrap();
        assert_eq!(ep.path(), "/a/{foo");
    }

    #[test]
    fn test_method_parsing_is_case_insensitive() {
        let ep = Endpoint::new("GET", "/x", Value::Null).unwrap();
        assert_eq!(ep.method(), Method::Get);
    }

    #[test]
    fn test_unsupported_method_rejected() {
        let err = Endpoint::new("head", "/x", Value::Null).unwrap_err();
        assert!(matches!(err, CompileError::InvalidInput(_)));
    }

    #[test]
    fn test_method_display_is_uppercase() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
