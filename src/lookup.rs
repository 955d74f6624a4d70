//! Handler lookup artifact.
//!
//! # Responsibilities
//! - Map `controller#action` handler keys back to endpoint definitions
//! - Tolerate unresolvable routes: log, skip, keep compiling
//!
//! # Design Decisions
//! - Resolution is delegated to a collaborator behind a trait; the route
//!   table implements it, but any host dispatch table can
//! - One unmappable endpoint must not prevent the rest of the API from
//!   being served

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::spec::endpoint::{Endpoint, Method};

/// A controller/action pair naming a dispatch target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    pub controller: String,
    pub action: String,
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.controller, self.action)
    }
}

/// A route declaration could not be mapped back to a dispatch target.
#[derive(Debug, Error)]
#[error("no dispatch target for {method} {path}")]
pub struct UnresolvableRoute {
    pub method: Method,
    pub path: String,
}

/// Collaborator that maps a request shape to its dispatch target.
pub trait RouteResolver {
    fn resolve(&self, method: Method, path: &str) -> Result<HandlerKey, UnresolvableRoute>;
}

/// Definition metadata keyed by `controller#action`.
pub type Lookup = HashMap<String, Value>;

/// Resolve every endpoint through the collaborator and collect the
/// definitions of those that map. Failures are logged and skipped.
pub fn build_lookup<'a, R>(
    endpoints: impl IntoIterator<Item = &'a Endpoint>,
    resolver: &R,
) -> Lookup
where
    R: RouteResolver + ?Sized,
{
    let mut lookup = Lookup::new();
    for endpoint in endpoints {
        match resolver.resolve(endpoint.method(), endpoint.path()) {
            Ok(key) => {
                lookup.insert(key.to_string(), endpoint.definition().clone());
            }
            Err(err) => {
                tracing::warn!(%err, "excluding endpoint from lookup");
            }
        }
    }
    lookup
}
