//! Route table module
//!
//! Declares the application routes and resolves `(method, path)` pairs to
//! a route with its captured path parameters.

use super::matcher::{compile, decode_path, match_path, PathParams, Segment};
use hyper::Method;

/// Application endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteId {
    Predict,
    CreateItem,
    UpdateItem,
    UpdateModel,
    Root,
    GetItem,
    GetModel,
    ReadFile,
    ListItems,
}

/// A declared route
#[derive(Debug, Clone)]
pub struct Route {
    pub id: RouteId,
    pub method: Method,
    pub pattern: &'static str,
    segments: Vec<Segment>,
}

impl Route {
    fn new(id: RouteId, method: Method, pattern: &'static str) -> Self {
        Self {
            id,
            method,
            pattern,
            segments: compile(pattern),
        }
    }

    /// HEAD is served by GET routes
    fn accepts(&self, method: &Method) -> bool {
        self.method == *method || (*method == Method::HEAD && self.method == Method::GET)
    }
}

/// Outcome of resolving a request against the table
#[derive(Debug)]
pub enum Resolution<'a> {
    Found { route: &'a Route, params: PathParams },
    MethodNotAllowed { allow: Vec<Method> },
    /// The path only matches with its trailing slash toggled
    Redirect { path: String },
    NotFound,
}

/// Ordered list of routes; the first match wins
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn application() -> Self {
        Self {
            routes: vec![
                Route::new(RouteId::Predict, Method::POST, "/predict/"),
                Route::new(RouteId::CreateItem, Method::POST, "/item"),
                Route::new(RouteId::UpdateItem, Method::PUT, "/items/{item_id}"),
                Route::new(RouteId::UpdateModel, Method::PUT, "/models/{model_id}"),
                Route::new(RouteId::Root, Method::GET, "/"),
                Route::new(RouteId::GetItem, Method::GET, "/item/{item_id}"),
                Route::new(RouteId::GetModel, Method::GET, "/model/{model_name}"),
                Route::new(RouteId::ReadFile, Method::GET, "/readfile/{file_path:path}"),
                Route::new(RouteId::ListItems, Method::GET, "/items/"),
            ],
        }
    }

    /// `raw_path` is the path as sent; the redirect target keeps its encoding
    pub fn resolve(&self, method: &Method, raw_path: &str) -> Resolution<'_> {
        let path = decode_path(raw_path);
        let mut allow = Vec::new();

        for route in &self.routes {
            if let Some(params) = match_path(&route.segments, &path) {
                if route.accepts(method) {
                    return Resolution::Found { route, params };
                }
                if !allow.contains(&route.method) {
                    allow.push(route.method.clone());
                }
            }
        }

        if !allow.is_empty() {
            return Resolution::MethodNotAllowed { allow };
        }

        if let Some(toggled) = toggle_trailing_slash(raw_path) {
            if self.matches_any(&decode_path(&toggled)) {
                return Resolution::Redirect { path: toggled };
            }
        }

        Resolution::NotFound
    }

    /// Methods served on a path, used for `OPTIONS` and `Allow`
    pub fn allowed_methods(&self, raw_path: &str) -> Vec<Method> {
        let path = decode_path(raw_path);
        let mut allow = Vec::new();
        for route in &self.routes {
            if match_path(&route.segments, &path).is_some() && !allow.contains(&route.method) {
                allow.push(route.method.clone());
            }
        }
        allow
    }

    fn matches_any(&self, path: &str) -> bool {
        self.routes
            .iter()
            .any(|route| match_path(&route.segments, path).is_some())
    }
}

fn toggle_trailing_slash(path: &str) -> Option<String> {
    if path == "/" {
        return None;
    }
    match path.strip_suffix('/') {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(format!("{path}/")),
    }
}

/// Render an `Allow` header value
pub fn allow_header(methods: &[Method]) -> String {
    let mut names: Vec<&str> = methods.iter().map(Method::as_str).collect();
    if names.contains(&"GET") {
        names.push("HEAD");
    }
    names.push("OPTIONS");
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found_id(resolution: Resolution<'_>) -> Option<RouteId> {
        match resolution {
            Resolution::Found { route, .. } => Some(route.id),
            _ => None,
        }
    }

    #[test]
    fn test_resolve_each_route() {
        let table = RouteTable::application();
        let cases = [
            (Method::POST, "/predict/", RouteId::Predict),
            (Method::POST, "/item", RouteId::CreateItem),
            (Method::PUT, "/items/3", RouteId::UpdateItem),
            (Method::PUT, "/models/5", RouteId::UpdateModel),
            (Method::GET, "/", RouteId::Root),
            (Method::GET, "/item/42", RouteId::GetItem),
            (Method::GET, "/model/alexnet", RouteId::GetModel),
            (Method::GET, "/readfile/files/models.json", RouteId::ReadFile),
            (Method::GET, "/items/", RouteId::ListItems),
        ];
        for (method, path, expected) in cases {
            assert_eq!(found_id(table.resolve(&method, path)), Some(expected), "{path}");
        }
    }

    #[test]
    fn test_resolve_captures_params() {
        let table = RouteTable::application();
        match table.resolve(&Method::PUT, "/items/77") {
            Resolution::Found { params, .. } => assert_eq!(params.get("item_id"), Some("77")),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_decodes_literal_segments() {
        let table = RouteTable::application();
        assert_eq!(
            found_id(table.resolve(&Method::GET, "/it%65m/42")),
            Some(RouteId::GetItem)
        );
        match table.resolve(&Method::GET, "/it%65ms") {
            Resolution::Redirect { path } => assert_eq!(path, "/it%65ms/"),
            other => panic!("unexpected resolution: {other:?}"),
        }
        assert_eq!(table.allowed_methods("/%69tem"), vec![Method::POST]);
    }

    #[test]
    fn test_head_uses_get_route() {
        let table = RouteTable::application();
        assert_eq!(found_id(table.resolve(&Method::HEAD, "/")), Some(RouteId::Root));
    }

    #[test]
    fn test_method_not_allowed() {
        let table = RouteTable::application();
        match table.resolve(&Method::DELETE, "/item") {
            Resolution::MethodNotAllowed { allow } => assert_eq!(allow, vec![Method::POST]),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_slash_redirect() {
        let table = RouteTable::application();
        match table.resolve(&Method::GET, "/items") {
            Resolution::Redirect { path } => assert_eq!(path, "/items/"),
            other => panic!("unexpected resolution: {other:?}"),
        }
        match table.resolve(&Method::POST, "/item/") {
            Resolution::Redirect { path } => assert_eq!(path, "/item"),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_not_found() {
        let table = RouteTable::application();
        assert!(matches!(
            table.resolve(&Method::GET, "/nothing/here"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn test_allow_header() {
        assert_eq!(allow_header(&[Method::GET]), "GET, HEAD, OPTIONS");
        assert_eq!(allow_header(&[Method::PUT]), "PUT, OPTIONS");
    }
}
