//! Concrete route table.
//!
//! # Responsibilities
//! - Expand declarations into concrete `(verb, path, handler)` rows the
//!   way a host dispatch table would
//! - Resolve a request shape back to its handler key
//!
//! # Design Decisions
//! - Immutable after emission; resolution never mutates
//! - Static segments take precedence over `:param` segments, ties go to
//!   the earliest row (emission order)
//! - Member rows of a collection use the canonical `:id` parameter; path
//!   parameters match any single segment during resolution anyway

use crate::classify::{underscore, Action, ResourceKind};
use crate::emit::decl::{ResourceDecl, RouteDeclaration, RouteEntry, RouteSink};
use crate::emit::draw::{self, qualified};
use crate::lookup::{HandlerKey, RouteResolver, UnresolvableRoute};
use crate::spec::endpoint::Method;
use crate::tree::RouteTree;

/// One concrete dispatch row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow {
    pub verb: Method,
    /// Full path template with `:param` segments.
    pub path: String,
    /// Fully namespaced controller.
    pub controller: String,
    pub action: Action,
    /// Route name, unique-ish, derived from the path prefix.
    pub name: String,
}

impl RouteRow {
    /// `controller#action` handler name.
    pub fn handler(&self) -> String {
        format!("{}#{}", self.controller, self.action.name())
    }
}

/// An ordered, frozen table of dispatch rows.
#[derive(Debug, Default)]
pub struct RouteTable {
    rows: Vec<RouteRow>,
}

impl RouteTable {
    /// Compile a tree straight into a table.
    pub fn from_tree(tree: &RouteTree) -> Self {
        let mut table = Self::default();
        draw::draw(tree, &mut table);
        table
    }

    pub fn rows(&self) -> &[RouteRow] {
        &self.rows
    }

    fn expand_resource(&mut self, decl: &ResourceDecl) {
        let mut base_segments = decl.scope.url.clone();
        if !decl.key.is_empty() {
            base_segments.push(decl.key.clone());
        }
        let base = format!("/{}", base_segments.join("/"));
        let member = format!("{}/:id", base.trim_end_matches('/'));
        let controller = qualified(&decl.scope.modules, &decl.controller);
        let name_base = {
            let mut parts: Vec<String> = decl
                .scope
                .url
                .iter()
                .filter(|s| !s.starts_with(':'))
                .map(|s| underscore(s))
                .collect();
            parts.push(decl.name.clone());
            parts.join("_")
        };

        // Canonical expansion order, independent of gathering order.
        for action in [
            Action::Index,
            Action::Create,
            Action::Show,
            Action::Update,
            Action::Destroy,
        ] {
            if !decl.actions.contains(&action) {
                continue;
            }
            let verbs: &[(Method, bool)] = match action {
                Action::Index => &[(Method::Get, false)],
                Action::Create => &[(Method::Post, false)],
                Action::Show => &[(Method::Get, true)],
                Action::Update => &[(Method::Put, true), (Method::Patch, true)],
                Action::Destroy => &[(Method::Delete, true)],
                Action::Custom(_) => unreachable!("resource declarations carry conventional actions"),
            };
            for &(verb, on_member) in verbs {
                let path = if on_member && decl.kind == ResourceKind::Collection {
                    member.clone()
                } else {
                    base.clone()
                };
                self.rows.push(RouteRow {
                    verb,
                    path,
                    controller: controller.clone(),
                    action: action.clone(),
                    name: format!("{}_{}", name_base, action.name()),
                });
            }
        }
    }

    fn push_entry(&mut self, entry: &RouteEntry) {
        self.rows.push(RouteRow {
            verb: entry.verb,
            path: entry.path(),
            controller: entry.controller.clone(),
            action: entry.action.clone(),
            name: entry.route_name.clone(),
        });
    }
}

impl RouteSink for RouteTable {
    fn declare(&mut self, declaration: RouteDeclaration) {
        match declaration {
            RouteDeclaration::Resource(decl) => self.expand_resource(&decl),
            RouteDeclaration::Route(entry) => self.push_entry(&entry),
        }
    }
}

impl RouteResolver for RouteTable {
    /// Match a request shape against the rows. Fewer parameter segments
    /// win; ties go to the earliest row.
    fn resolve(&self, method: Method, path: &str) -> Result<HandlerKey, UnresolvableRoute> {
        let request: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut best: Option<(usize, &RouteRow)> = None;
        for row in &self.rows {
            if row.verb != method {
                continue;
            }
            let Some(params) = match_segments(&row.path, &request) else {
                continue;
            };
            if best.map_or(true, |(b, _)| params < b) {
                best = Some((params, row));
            }
        }
        match best {
            Some((_, row)) => Ok(HandlerKey {
                controller: row.controller.clone(),
                action: row.action.name().to_string(),
            }),
            None => Err(UnresolvableRoute {
                method,
                path: path.to_string(),
            }),
        }
    }
}

/// Segment-wise match; returns the number of parameter segments consumed.
fn match_segments(template: &str, request: &[&str]) -> Option<usize> {
    let template: Vec<&str> = template.split('/').filter(|s| !s.is_empty()).collect();
    if template.len() != request.len() {
        return None;
    }
    let mut params = 0;
    for (t, r) in template.iter().zip(request) {
        if t.starts_with(':') {
            params += 1;
        } else if t != r {
            return None;
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::endpoint::Endpoint;
    use serde_json::Value;

    fn table(specs: &[(&str, &str)]) -> RouteTable {
        let tree = RouteTree::from_endpoints(
            specs
                .iter()
                .map(|(m, p)| Endpoint::new(m, *p, Value::Null).unwrap()),
        );
        RouteTable::from_tree(&tree)
    }

    fn row_tuples(table: &RouteTable) -> Vec<(String, String, String)> {
        table
            .rows()
            .iter()
            .map(|r| (r.verb.to_string(), r.path.clone(), r.handler()))
            .collect()
    }

    #[test]
    fn test_collection_expansion() {
        let t = table(&[
            ("get", "/accounts"),
            ("post", "/accounts"),
            ("get", "/accounts/{id}"),
            ("put", "/accounts/{id}"),
            ("delete", "/accounts/{id}"),
        ]);
        assert_eq!(
            row_tuples(&t),
            vec![
                ("GET".into(), "/accounts".into(), "accounts#index".into()),
                ("POST".into(), "/accounts".into(), "accounts#create".into()),
                ("GET".into(), "/accounts/:id".into(), "accounts#show".into()),
                ("PUT".into(), "/accounts/:id".into(), "accounts#update".into()),
                ("PATCH".into(), "/accounts/:id".into(), "accounts#update".into()),
                ("DELETE".into(), "/accounts/:id".into(), "accounts#destroy".into()),
            ]
        );
    }

    #[test]
    fn test_singleton_expansion() {
        let t = table(&[("get", "/account"), ("post", "/account"), ("delete", "/account")]);
        assert_eq!(
            row_tuples(&t),
            vec![
                ("POST".into(), "/account".into(), "account#create".into()),
                ("GET".into(), "/account".into(), "account#show".into()),
                ("DELETE".into(), "/account".into(), "account#destroy".into()),
            ]
        );
    }

    #[test]
    fn test_resolution_prefers_static_over_param() {
        let t = table(&[
            ("post", "/pet"),
            ("get", "/pet/{id}"),
            ("get", "/pet/findByStatus"),
        ]);
        let key = t.resolve(Method::Get, "/pet/findByStatus").unwrap();
        assert_eq!(key.to_string(), "pet/pet#find_by_status");
        let key = t.resolve(Method::Get, "/pet/123").unwrap();
        assert_eq!(key.to_string(), "pet#show");
    }

    #[test]
    fn test_resolution_failure() {
        let t = table(&[("get", "/pet/{id}")]);
        let err = t.resolve(Method::Put, "/pet").unwrap_err();
        assert_eq!(err.method, Method::Put);
        assert_eq!(err.path, "/pet");
    }

    #[test]
    fn test_param_segments_match_any_request_segment() {
        let t = table(&[("get", "/accounts"), ("get", "/accounts/{account_id}")]);
        // The row uses the canonical :id; the endpoint's own template
        // still resolves through the wildcard.
        let key = t.resolve(Method::Get, "/accounts/:account_id").unwrap();
        assert_eq!(key.to_string(), "accounts#show");
    }

    #[test]
    fn test_route_names_carry_the_prefix() {
        let t = table(&[("get", "/v1/accounts"), ("get", "/v1/accounts/{id}")]);
        let names: Vec<_> = t.rows().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["v1_accounts_index", "v1_accounts_show"]);
    }
}
