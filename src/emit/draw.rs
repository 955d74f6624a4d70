//! Per-mode tree traversal.
//!
//! # Responsibilities
//! - Walk the frozen tree top-down and declare routes into a sink
//! - Keep URL and controller-namespace scope explicit while recursing
//! - Apply the singleton remap and the POST-for-update accommodation
//!
//! # Design Decisions
//! - Incoming scope never contains the node's own key; each arm appends
//!   it where the host table needs it
//! - Conventional actions are carried by the resource declaration;
//!   individual entries are emitted only for bespoke actions and the
//!   POST-for-update override

use crate::classify::{
    action_for, action_mode, resource_kind, route_mode, underscore, Action, ActionMode,
    ResourceKind, RouteMode,
};
use crate::emit::decl::{ResourceDecl, RouteDeclaration, RouteEntry, RouteSink, Scope};
use crate::spec::endpoint::Method;
use crate::tree::{NodeId, RouteTree};

/// Emit the whole tree into the sink, in deterministic order.
pub fn draw(tree: &RouteTree, sink: &mut dyn RouteSink) {
    draw_node(tree, tree.root(), &Scope::default(), sink);
}

fn draw_node(tree: &RouteTree, id: NodeId, scope: &Scope, sink: &mut dyn RouteSink) {
    match route_mode(tree, id) {
        RouteMode::Resource => draw_resource(tree, id, scope, sink),
        RouteMode::Namespace => draw_namespace(tree, id, scope, sink),
        RouteMode::Param => draw_param(tree, id, scope, sink),
        RouteMode::Action => draw_entries(tree, id, scope, sink),
    }
}

fn draw_resource(tree: &RouteTree, id: NodeId, scope: &Scope, sink: &mut dyn RouteSink) {
    let node = tree.node(id);
    let key = node.key().unwrap_or("").to_string();
    let controller = if key.is_empty() {
        "main".to_string()
    } else {
        underscore(&key)
    };

    // Conventional actions at this node and at its param children.
    let mut actions: Vec<Action> = Vec::new();
    let mut gather = |tree: &RouteTree, at: NodeId| {
        for endpoint in tree.node(at).endpoints() {
            let action = action_for(tree, at, endpoint);
            if action.is_conventional() && !actions.contains(&action) {
                actions.push(action);
            }
        }
    };
    gather(tree, id);
    let param_children = tree.param_children(id);
    for &child in &param_children {
        gather(tree, child);
    }

    let kind = resource_kind(tree, id);
    if kind == ResourceKind::Singleton {
        // GET on an unidentified path reads the one resource.
        if let Some(pos) = actions.iter().position(|a| *a == Action::Index) {
            actions.remove(pos);
            if !actions.contains(&Action::Show) {
                actions.push(Action::Show);
            }
        }
    }

    sink.declare(RouteDeclaration::Resource(ResourceDecl {
        kind,
        key: key.clone(),
        controller: controller.clone(),
        actions,
        name: controller.clone(),
        scope: scope.clone(),
    }));

    let child_scope = if key.is_empty() {
        let mut root = scope.clone();
        root.controller = Some(controller.clone());
        root
    } else {
        scope.nest(&key, &controller, Some(controller.clone()))
    };

    draw_entries(tree, id, &child_scope, sink);

    // Some APIs use POST instead of PUT/PATCH for updates. The resource
    // declaration only maps conventional verbs, so accept the POST on the
    // identified path under the same action.
    for &child in &param_children {
        let param_key = tree.node(child).key().unwrap_or_default().to_string();
        if tree
            .node(child)
            .endpoints()
            .iter()
            .any(|e| e.method() == Method::Post)
        {
            sink.declare(RouteDeclaration::Route(RouteEntry {
                verb: Method::Post,
                segment: param_key.clone(),
                action: Action::Update,
                controller: qualified(&scope.modules, &controller),
                route_name: entry_name(&child_scope.url, &param_key, &Action::Update),
                on: ActionMode::Member,
                scope: child_scope.clone(),
            }));
        }
    }

    for (_, child) in node.children() {
        draw_node(tree, child, &child_scope, sink);
    }
}

fn draw_namespace(tree: &RouteTree, id: NodeId, scope: &Scope, sink: &mut dyn RouteSink) {
    let node = tree.node(id);
    let child_scope = match node.key() {
        // No scope is opened at the tree root.
        None => scope.clone(),
        Some(key) => scope.nest(key, &underscore(key), None),
    };
    for (_, child) in node.children() {
        draw_node(tree, child, &child_scope, sink);
    }
}

fn draw_param(tree: &RouteTree, id: NodeId, scope: &Scope, sink: &mut dyn RouteSink) {
    let node = tree.node(id);
    let key = node.key().unwrap_or_default();
    let child_scope = scope.nest_url(key);
    for (_, child) in node.children() {
        draw_node(tree, child, &child_scope, sink);
    }
    // Member actions of the parent resource, no wrapping declaration.
    draw_entries(tree, id, scope, sink);
}

/// Emit this node's bespoke endpoints as individual entries. Conventional
/// actions are skipped: the enclosing resource declaration covers them.
fn draw_entries(tree: &RouteTree, id: NodeId, scope: &Scope, sink: &mut dyn RouteSink) {
    let node = tree.node(id);
    let key = node.key().unwrap_or_default();
    for endpoint in node.endpoints() {
        let action = action_for(tree, id, endpoint);
        if action.is_conventional() {
            continue;
        }
        sink.declare(RouteDeclaration::Route(RouteEntry {
            verb: endpoint.method(),
            segment: key.to_string(),
            controller: qualified(&scope.modules, scope.controller.as_deref().unwrap_or("main")),
            route_name: entry_name(&scope.url, key, &action),
            on: action_mode(tree, id),
            action,
            scope: scope.clone(),
        }));
    }
}

/// Join controller namespace segments with the leaf controller.
pub(crate) fn qualified(modules: &[String], controller: &str) -> String {
    if modules.is_empty() {
        controller.to_string()
    } else {
        format!("{}/{}", modules.join("/"), controller)
    }
}

/// Route name from the non-param path prefix plus the entry's own segment
/// (or its action, when the segment is a parameter).
fn entry_name(scope_url: &[String], segment: &str, action: &Action) -> String {
    let mut parts: Vec<String> = scope_url
        .iter()
        .filter(|s| !s.starts_with(':'))
        .map(|s| underscore(s))
        .collect();
    if segment.starts_with(':') {
        parts.push(action.name().to_string());
    } else {
        parts.push(underscore(segment));
    }
    parts.join("_")
}
