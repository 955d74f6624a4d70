//! Route and action classification.
//!
//! # Responsibilities
//! - Derive a node's route mode from tree shape alone
//! - Derive an endpoint's action mode and conventional action name
//! - Decide resource plurality (collection vs. singleton)
//!
//! # Design Decisions
//! - Pure functions over the frozen tree; nothing is cached or stored
//! - Mode checks run in a fixed order, later checks override earlier ones
//! - Verb-table overrides always beat the bespoke-name fallback

use std::fmt;

use crate::spec::endpoint::{Endpoint, Method};
use crate::tree::{NodeId, RouteTree};

/// How a node participates in route emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// A RESTful resource, singleton or collection.
    Resource,
    /// Pure grouping: the node has no endpoints of its own.
    Namespace,
    /// The node's key is a `:name` path parameter.
    Param,
    /// A leaf action hanging off a resource.
    Action,
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteMode::Resource => "resource",
            RouteMode::Namespace => "namespace",
            RouteMode::Param => "param",
            RouteMode::Action => "action",
        })
    }
}

/// Whether an endpoint acts on one identified instance or the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMode {
    Member,
    Collection,
}

impl fmt::Display for ActionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionMode::Member => "member",
            ActionMode::Collection => "collection",
        })
    }
}

/// Singleton resource (no identifier child) vs. collection resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Singleton,
    Collection,
}

/// A synthesized action: one of the CRUD conventions, or a bespoke name
/// taken from a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Index,
    Show,
    Create,
    Update,
    Destroy,
    Custom(String),
}

impl Action {
    /// True for the CRUD conventions a resource declaration can carry.
    pub fn is_conventional(&self) -> bool {
        !matches!(self, Action::Custom(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Action::Index => "index",
            Action::Show => "show",
            Action::Create => "create",
            Action::Update => "update",
            Action::Destroy => "destroy",
            Action::Custom(name) => name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conventional actions for collection-level verbs.
fn collection_action(method: Method) -> Action {
    match method {
        Method::Get => Action::Index,
        Method::Post => Action::Create,
        Method::Put | Method::Patch => Action::Update,
        Method::Delete => Action::Destroy,
    }
}

/// Conventional actions for member-level verbs. POST maps to update here:
/// some APIs use it in place of PUT/PATCH.
fn member_action(method: Method) -> Action {
    match method {
        Method::Get => Action::Show,
        Method::Post | Method::Put | Method::Patch => Action::Update,
        Method::Delete => Action::Destroy,
    }
}

/// Classify a node. Checks run in order; later ones override earlier ones.
pub fn route_mode(tree: &RouteTree, id: NodeId) -> RouteMode {
    let node = tree.node(id);
    let mut mode = RouteMode::Resource;
    if node.endpoints().is_empty() {
        mode = RouteMode::Namespace;
    }
    if node.child_count() == 0 {
        if let Some(parent) = node.parent() {
            if route_mode(tree, parent) == RouteMode::Resource {
                mode = RouteMode::Action;
            }
        }
    }
    if node.is_param() {
        mode = RouteMode::Param;
    }
    mode
}

/// Member for param-keyed nodes, collection otherwise.
pub fn action_mode(tree: &RouteTree, id: NodeId) -> ActionMode {
    if tree.node(id).is_param() {
        ActionMode::Member
    } else {
        ActionMode::Collection
    }
}

/// Collection when the node has at least one param child.
pub fn resource_kind(tree: &RouteTree, id: NodeId) -> ResourceKind {
    if tree.param_children(id).is_empty() {
        ResourceKind::Singleton
    } else {
        ResourceKind::Collection
    }
}

/// Synthesize the action name for one endpoint at a node.
pub fn action_for(tree: &RouteTree, id: NodeId, endpoint: &Endpoint) -> Action {
    if action_mode(tree, id) == ActionMode::Member {
        return member_action(endpoint.method());
    }
    if route_mode(tree, id) == RouteMode::Resource {
        return collection_action(endpoint.method());
    }
    Action::Custom(
        tree.node(id)
            .key()
            .map(underscore)
            .unwrap_or_default(),
    )
}

/// camelCase / PascalCase / dashed segment to snake_case.
pub fn underscore(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let after_word = i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end = i > 0
                && chars[i - 1].is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if after_word || acronym_end {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

/// Diagnostic view of the whole tree: each node's path and mode, then each
/// endpoint's verb, synthesized action, and action mode.
pub fn describe(tree: &RouteTree) -> String {
    let mut out = String::new();
    describe_node(tree, tree.root(), &mut out);
    out
}

fn describe_node(tree: &RouteTree, id: NodeId, out: &mut String) {
    let node = tree.node(id);
    out.push_str(&format!("{} - {}\n", node.path(), route_mode(tree, id)));
    for endpoint in node.endpoints() {
        out.push_str(&format!(
            "\t{} to #{} ({})\n",
            endpoint.method(),
            action_for(tree, id, endpoint),
            action_mode(tree, id),
        ));
    }
    for (_, child) in node.children() {
        describe_node(tree, child, out);
    }
}
