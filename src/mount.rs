//! Mounting compiled routes into an Axum router.
//!
//! # Responsibilities
//! - Register one Axum route per table row
//! - Convert `:param` templates to Axum's `{param}` syntax
//! - Optionally publish the raw spec document at `/openapi.json`
//!
//! # Design Decisions
//! - The handler for each row comes from a caller-supplied factory; the
//!   stub router answers 501 with the row's handler key
//! - Duplicate (verb, path) pairs are registered once, first row wins

use std::collections::HashSet;

use axum::http::StatusCode;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::{Json, Router};
use serde_json::json;

use crate::emit::table::{RouteRow, RouteTable};
use crate::spec::document::Document;
use crate::spec::endpoint::Method;

/// Build a router by asking the factory for a handler per row.
pub fn router_with<F>(table: &RouteTable, mut handler_for: F) -> Router
where
    F: FnMut(&RouteRow) -> MethodRouter,
{
    let mut router = Router::new();
    let mut seen: HashSet<(Method, String)> = HashSet::new();
    for row in table.rows() {
        if !seen.insert((row.verb, row.path.clone())) {
            continue;
        }
        router = router.route(&axum_path(&row.path), handler_for(row));
    }
    router
}

/// Router whose every route answers 501 with its handler key. Used by the
/// CLI's serve mode and handy as a scaffold while controllers are written.
pub fn stub_router(table: &RouteTable) -> Router {
    router_with(table, |row| {
        let handler = row.handler();
        let verb = row.verb.to_string();
        let path = row.path.clone();
        on(method_filter(row.verb), move || {
            let body = json!({
                "handler": handler,
                "route": format!("{verb} {path}"),
            });
            async move { (StatusCode::NOT_IMPLEMENTED, Json(body)) }
        })
    })
}

/// Serve the raw document at `/openapi.json` alongside the routes.
pub fn with_schema(router: Router, document: &Document) -> Router {
    let doc = document.raw().clone();
    router.route(
        "/openapi.json",
        axum::routing::get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    )
}

/// `:name` segments to Axum 0.8 `{name}` capture syntax.
fn axum_path(path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect();
    segments.join("/")
}

fn method_filter(method: Method) -> MethodFilter {
    match method {
        Method::Get => MethodFilter::GET,
        Method::Post => MethodFilter::POST,
        Method::Put => MethodFilter::PUT,
        Method::Patch => MethodFilter::PATCH,
        Method::Delete => MethodFilter::DELETE,
    }
}
