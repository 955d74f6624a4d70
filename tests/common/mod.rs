//! Shared builders for the routing integration tests.

use openapi_routegen::emit::RouteTable;
use openapi_routegen::spec::Endpoint;
use openapi_routegen::tree::RouteTree;
use serde_json::{json, Value};

/// Endpoints from (verb, path) pairs; definitions carry the pair so tests
/// can tell them apart in the lookup.
#[allow(dead_code)]
pub fn endpoints(specs: &[(&str, &str)]) -> Vec<Endpoint> {
    specs
        .iter()
        .map(|(verb, path)| {
            Endpoint::new(verb, *path, json!({"operationId": format!("{verb} {path}")})).unwrap()
        })
        .collect()
}

#[allow(dead_code)]
pub fn tree(specs: &[(&str, &str)]) -> RouteTree {
    RouteTree::from_endpoints(endpoints(specs))
}

#[allow(dead_code)]
pub fn table(specs: &[(&str, &str)]) -> RouteTable {
    RouteTable::from_tree(&tree(specs))
}

/// (VERB, path, controller#action) triples for the whole table.
#[allow(dead_code)]
pub fn row_tuples(table: &RouteTable) -> Vec<(String, String, String)> {
    table
        .rows()
        .iter()
        .map(|r| (r.verb.to_string(), r.path.clone(), r.handler()))
        .collect()
}

/// A trimmed-down petstore spec exercising every classification the
/// compiler knows: collection and singleton resources, namespaces,
/// bespoke actions, member actions, and a convention-breaking PUT.
#[allow(dead_code)]
pub fn petstore() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {"title": "Swagger Petstore", "version": "1.0.0"},
        "paths": {
            "/pet": {
                "post": {"operationId": "addPet"},
                "put": {"operationId": "updatePet"}
            },
            "/pet/findByStatus": {
                "get": {"operationId": "findPetsByStatus"}
            },
            "/pet/findByTags": {
                "get": {"operationId": "findPetsByTags"}
            },
            "/pet/{petId}": {
                "parameters": [{"name": "petId", "in": "path"}],
                "get": {"operationId": "getPetById"},
                "post": {"operationId": "updatePetWithForm"},
                "delete": {"operationId": "deletePet"}
            },
            "/pet/{petId}/uploadImage": {
                "post": {"operationId": "uploadFile"}
            },
            "/store/inventory": {
                "get": {"operationId": "getInventory"}
            },
            "/store/order": {
                "post": {"operationId": "placeOrder"}
            },
            "/store/order/{orderId}": {
                "get": {"operationId": "getOrderById"},
                "delete": {"operationId": "deleteOrder"}
            },
            "/user": {
                "post": {"operationId": "createUser"}
            },
            "/user/createWithList": {
                "post": {"operationId": "createUsersWithListInput"}
            },
            "/user/login": {
                "get": {"operationId": "loginUser"}
            },
            "/user/logout": {
                "get": {"operationId": "logoutUser"}
            },
            "/user/{username}": {
                "get": {"operationId": "getUserByName"},
                "put": {"operationId": "updateUser"},
                "delete": {"operationId": "deleteUser"}
            }
        }
    })
}
