//! Route declaration values and the sink interface.
//!
//! # Responsibilities
//! - Describe what the emitter produces, independent of any host router
//! - Carry enough scope context for a sink to build full paths and
//!   namespaced handler names
//!
//! # Design Decisions
//! - Two declaration shapes only: a whole resource, or one route entry
//! - Scope is explicit data on every declaration, not sink state

use crate::classify::{Action, ActionMode, ResourceKind};
use crate::spec::endpoint::Method;

/// Context a declaration is nested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// URL segments enclosing the declaration, `:param` segments included.
    pub url: Vec<String>,
    /// Controller namespace segments (underscored).
    pub modules: Vec<String>,
    /// Controller of the nearest enclosing resource, if any.
    pub controller: Option<String>,
}

impl Scope {
    /// Child scope for descending into a named grouping: the key joins both
    /// the URL and the controller namespace.
    pub(crate) fn nest(&self, url_key: &str, module: &str, controller: Option<String>) -> Scope {
        let mut child = self.clone();
        child.url.push(url_key.to_string());
        child.modules.push(module.to_string());
        child.controller = controller;
        child
    }

    /// Child scope that only extends the URL (param descent).
    pub(crate) fn nest_url(&self, url_key: &str) -> Scope {
        let mut child = self.clone();
        child.url.push(url_key.to_string());
        child
    }
}

/// A whole-resource declaration, singleton or collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDecl {
    pub kind: ResourceKind,
    /// The node's key as it appears in the URL (empty at the tree root).
    pub key: String,
    /// Underscored controller name, without namespace.
    pub controller: String,
    /// Allowed conventional actions, singleton remap already applied.
    pub actions: Vec<Action>,
    /// Route-name base (underscored key).
    pub name: String,
    pub scope: Scope,
}

/// One individual route entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub verb: Method,
    /// URL segment matched under the scope (a literal segment or `:param`).
    pub segment: String,
    pub action: Action,
    /// Fully namespaced controller, e.g. `pet/pet`.
    pub controller: String,
    /// Route name derived from the path prefix.
    pub route_name: String,
    pub on: ActionMode,
    pub scope: Scope,
}

impl RouteEntry {
    /// Full path template: scope segments plus the entry's own segment.
    pub fn path(&self) -> String {
        let mut segments = self.scope.url.clone();
        segments.push(self.segment.clone());
        format!("/{}", segments.join("/"))
    }

    /// `controller#action` handler name.
    pub fn handler(&self) -> String {
        format!("{}#{}", self.controller, self.action.name())
    }
}

/// What the emitter hands to a sink, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDeclaration {
    Resource(ResourceDecl),
    Route(RouteEntry),
}

/// External collaborator that registers declarations with a concrete
/// dispatch table.
pub trait RouteSink {
    fn declare(&mut self, declaration: RouteDeclaration);
}

/// Sink that records declarations verbatim. Useful in tests and for
/// inspecting emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub declarations: Vec<RouteDeclaration>,
}

impl RouteSink for RecordingSink {
    fn declare(&mut self, declaration: RouteDeclaration) {
        self.declarations.push(declaration);
    }
}
