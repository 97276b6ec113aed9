//! Navigation targets.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// A named route with string parameters, e.g.
/// `admin-users {context: info, id: u1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub params: BTreeMap<String, String>,
}

impl Route {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// A navigator that records every route pushed.
#[derive(Debug, Clone, Default)]
pub struct RouteLog {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RouteLog {
    fn push(&self, route: Route) {
        tracing::debug!(route = route.name, params = ?route.params, "Navigate");
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
