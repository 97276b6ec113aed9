//! Collaborators injected into every admin view.

use crate::lifecycle::config::UiSettings;
use std::sync::Arc;
use view_framework::{Catalog, Navigator, RouteLog, Toast, ToastLog, ToastSink, Translate};

/// The `Context` of every admin view.
#[derive(Clone)]
pub struct ViewContext {
    pub translator: Arc<dyn Translate>,
    pub navigator: Arc<dyn Navigator>,
    pub toasts: Arc<dyn ToastSink>,
    pub settings: UiSettings,
}

impl ViewContext {
    pub fn new(
        translator: Arc<dyn Translate>,
        navigator: Arc<dyn Navigator>,
        toasts: Arc<dyn ToastSink>,
        settings: UiSettings,
    ) -> Self {
        Self {
            translator,
            navigator,
            toasts,
            settings,
        }
    }

    /// A context over recording collaborators, returned alongside so tests
    /// and the demo can inspect what the views did.
    pub fn recording(catalog: Catalog, settings: UiSettings) -> (Self, RouteLog, ToastLog) {
        let routes = RouteLog::new();
        let toasts = ToastLog::new();
        let context = Self::new(
            Arc::new(catalog),
            Arc::new(routes.clone()),
            Arc::new(toasts.clone()),
            settings,
        );
        (context, routes, toasts)
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    pub fn toast_success(&self, key: &str) {
        self.toasts.dispatch(Toast::success(self.t(key)));
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.toasts.dispatch(Toast::error(message));
    }
}
