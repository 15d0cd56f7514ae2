//! Method-indexed route table with first-match-wins dispatch.
//!
//! Routes are grouped by lowercased method once, in [`Router::new`]. At
//! request time the bucket for the request's method is scanned in
//! declaration order and the first route whose template matches wins, even
//! when a later route would match more specifically. Duplicate or
//! overlapping routes are kept as given and never reported.

pub use matcher::{compile, CompiledPath, Dynamic, Exact, Params};

use std::{collections::HashMap, fmt};

use tracing::{debug, info};

use crate::{
    request::Request, response_writer::ResponseWriter, server::Handler,
    status_code_registry::ReasonPhrase,
};

mod matcher;

pub struct Route {
    method: String,
    path: String,
    compiled: CompiledPath,
    handler: Box<dyn Handler + Send + Sync>,
    summary: Option<String>,
}

impl Route {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        handler: impl Handler + Send + Sync + 'static,
    ) -> Self {
        let path = path.into();
        Self {
            method: method.into(),
            compiled: compile(&path),
            path,
            handler: Box::new(handler),
            summary: None,
        }
    }

    pub fn get(path: impl Into<String>, handler: impl Handler + Send + Sync + 'static) -> Self {
        Self::new("GET", path, handler)
    }

    pub fn post(path: impl Into<String>, handler: impl Handler + Send + Sync + 'static) -> Self {
        Self::new("POST", path, handler)
    }

    pub fn put(path: impl Into<String>, handler: impl Handler + Send + Sync + 'static) -> Self {
        Self::new("PUT", path, handler)
    }

    pub fn patch(path: impl Into<String>, handler: impl Handler + Send + Sync + 'static) -> Self {
        Self::new("PATCH", path, handler)
    }

    pub fn delete(path: impl Into<String>, handler: impl Handler + Send + Sync + 'static) -> Self {
        Self::new("DELETE", path, handler)
    }

    /// Attaches free-form documentation. Dispatch never looks at it.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn param_names(&self) -> &[String] {
        self.compiled.param_names()
    }

    pub fn matches(&self, request_path: &str) -> Option<Params> {
        self.compiled.matches(request_path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("compiled", &self.compiled)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Router {
    buckets: HashMap<String, Vec<Route>>,
}

impl Router {
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut buckets: HashMap<String, Vec<Route>> = HashMap::new();
        for route in routes {
            buckets
                .entry(route.method.to_lowercase())
                .or_default()
                .push(route);
        }
        Self { buckets }
    }

    /// Every route, grouped by method, in declaration order within a method.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.buckets.values().flatten()
    }

    pub fn find(&self, http_method: &str, request_path: &str) -> Option<(&Route, Params)> {
        self.buckets
            .get(&http_method.to_lowercase())?
            .iter()
            .find_map(|route| route.matches(request_path).map(|params| (route, params)))
    }

    pub fn handle(&self, w: &mut ResponseWriter, r: &mut Request) {
        let Some((route, params)) = self.find(r.get_http_method(), r.get_path()) else {
            info!("no route: {} {}", r.get_http_method(), r.get_path());
            w.set_reason_phrase(ReasonPhrase::NotFound);
            w.end();
            return;
        };

        debug!("match: {} {}", route.method, route.path);
        r.merge_params(params);
        route.handler.handle(w, r);
    }
}

impl Handler for Router {
    fn handle(&self, w: &mut ResponseWriter, r: &mut Request) {
        self.handle(w, r);
    }
}
