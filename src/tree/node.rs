//! Route tree storage and insertion.
//!
//! # Responsibilities
//! - Store nodes keyed by path segment, one root with an empty prefix
//! - Place each endpoint in exactly one node by peeling path segments
//! - Preserve insertion order of endpoints and children
//!
//! # Design Decisions
//! - Arena storage: the tree owns a Vec of nodes, ids index into it
//! - A node's prefix equals its parent's prefix plus its own key
//! - The leading empty segment from the path's leading slash is discarded

use indexmap::IndexMap;

use crate::spec::endpoint::Endpoint;

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One node of the route tree.
#[derive(Debug)]
pub struct RouteNode {
    prefix: Vec<String>,
    parent: Option<NodeId>,
    endpoints: Vec<Endpoint>,
    children: IndexMap<String, NodeId>,
}

impl RouteNode {
    fn new(prefix: Vec<String>, parent: Option<NodeId>) -> Self {
        Self {
            prefix,
            parent,
            endpoints: Vec::new(),
            children: IndexMap::new(),
        }
    }

    /// Path segments from the root down to this node.
    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// This node's own segment; `None` at the root.
    pub fn key(&self) -> Option<&str> {
        self.prefix.last().map(String::as_str)
    }

    /// The node's full path, `/`-joined.
    pub fn path(&self) -> String {
        format!("/{}", self.prefix.join("/"))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Endpoints terminating exactly at this node, in insertion order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(k, &id)| (k.as_str(), id))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// True when this node's own segment is a `:name` parameter.
    pub fn is_param(&self) -> bool {
        self.key().is_some_and(|k| k.starts_with(':'))
    }
}

/// The compiled route tree: an arena of nodes with a single root.
#[derive(Debug)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
}

impl RouteTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![RouteNode::new(Vec::new(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.0]
    }

    /// Place an endpoint in the node its path terminates at, creating
    /// intermediate nodes on the way down.
    pub fn insert(&mut self, endpoint: Endpoint) {
        let mut id = self.root();
        let path = endpoint.path().to_owned();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            id = self.child_or_create(id, segment);
        }
        self.nodes[id.0].endpoints.push(endpoint);
    }

    /// Build a tree from an ordered endpoint list.
    pub fn from_endpoints(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        let mut tree = Self::new();
        for endpoint in endpoints {
            tree.insert(endpoint);
        }
        tree
    }

    fn child_or_create(&mut self, parent: NodeId, key: &str) -> NodeId {
        if let Some(&child) = self.nodes[parent.0].children.get(key) {
            return child;
        }
        let mut prefix = self.nodes[parent.0].prefix.clone();
        prefix.push(key.to_string());
        let child = NodeId(self.nodes.len());
        self.nodes.push(RouteNode::new(prefix, Some(parent)));
        self.nodes[parent.0].children.insert(key.to_string(), child);
        child
    }

    /// Children of a param kind (`:name` keys), in insertion order.
    pub fn param_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .children()
            .filter(|(k, _)| k.starts_with(':'))
            .map(|(_, c)| c)
            .collect()
    }

    /// All endpoints, grouped depth-first by node.
    pub fn endpoints(&self) -> Vec<(NodeId, &Endpoint)> {
        let mut out = Vec::new();
        self.collect_endpoints(self.root(), &mut out);
        out
    }

    fn collect_endpoints<'a>(&'a self, id: NodeId, out: &mut Vec<(NodeId, &'a Endpoint)>) {
        let node = self.node(id);
        out.extend(node.endpoints().iter().map(|e| (id, e)));
        for (_, child) in node.children() {
            self.collect_endpoints(child, out);
        }
    }

    /// Diagnostic dump: one `VERB /path` line per endpoint, grouped
    /// depth-first by node. Reproducible from the tree alone.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (id, endpoint) in self.endpoints() {
            out.push_str(&format!("{} {}\n", endpoint.method(), self.node(id).path()));
        }
        out
    }
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::endpoint::Method;
    use serde_json::Value;

    fn ep(method: &str, path: &str) -> Endpoint {
        Endpoint::new(method, path, Value::Null).unwrap()
    }

    fn find(tree: &RouteTree, segments: &[&str]) -> NodeId {
        let mut id = tree.root();
        for segment in segments {
            id = tree
                .node(id)
                .children()
                .find(|(k, _)| k == segment)
                .map(|(_, c)| c)
                .unwrap_or_else(|| panic!("no node for segment {segment}"));
        }
        id
    }

    #[test]
    fn test_insertion_creates_one_node_per_segment() {
        let tree = RouteTree::from_endpoints([ep("get", "/a/{foo}/b/{bar}")]);
        let leaf = find(&tree, &["a", ":foo", "b", ":bar"]);
        assert_eq!(tree.node(leaf).endpoints().len(), 1);
        assert_eq!(tree.node(leaf).path(), "/a/:foo/b/:bar");
    }

    #[test]
    fn test_prefix_matches_parent_plus_key() {
        let tree = RouteTree::from_endpoints([ep("get", "/accounts/{id}")]);
        let child = find(&tree, &["accounts", ":id"]);
        let node = tree.node(child);
        let parent = tree.node(node.parent().unwrap());
        assert_eq!(parent.prefix(), &["accounts".to_string()]);
        assert_eq!(node.prefix(), &["accounts".to_string(), ":id".to_string()]);
        assert_eq!(node.key(), Some(":id"));
    }

    #[test]
    fn test_every_endpoint_lands_in_exactly_one_node() {
        let tree = RouteTree::from_endpoints([
            ep("get", "/accounts"),
            ep("post", "/accounts"),
            ep("get", "/accounts/{id}"),
        ]);
        let all = tree.endpoints();
        assert_eq!(all.len(), 3);
        // Node path reconstructs the endpoint's translated path.
        for (id, endpoint) in all {
            assert_eq!(tree.node(id).path(), endpoint.path());
        }
    }

    #[test]
    fn test_shared_prefixes_share_nodes() {
        let tree = RouteTree::from_endpoints([
            ep("get", "/pet/findByStatus"),
            ep("get", "/pet/findByTags"),
            ep("get", "/pet/{id}"),
        ]);
        let pet = find(&tree, &["pet"]);
        assert_eq!(tree.node(pet).child_count(), 3);
        assert!(tree.node(pet).endpoints().is_empty());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let tree = RouteTree::from_endpoints([
            ep("get", "/b"),
            ep("get", "/a"),
            ep("get", "/c"),
        ]);
        let keys: Vec<_> = tree
            .node(tree.root())
            .children()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_root_endpoint() {
        let tree = RouteTree::from_endpoints([ep("get", "/")]);
        let root = tree.node(tree.root());
        assert_eq!(root.endpoints().len(), 1);
        assert_eq!(root.endpoints()[0].method(), Method::Get);
        assert_eq!(root.path(), "/");
    }

    #[test]
    fn test_dump_lists_endpoints_depth_first() {
        let tree = RouteTree::from_endpoints([
            ep("get", "/accounts"),
            ep("get", "/accounts/{id}"),
            ep("get", "/health"),
        ]);
        assert_eq!(
            tree.dump(),
            "GET /accounts\nGET /accounts/:id\nGET /health\n"
        );
    }
}
