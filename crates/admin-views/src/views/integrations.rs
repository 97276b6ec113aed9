//! Edit page of one webhook integration.

use crate::model::IntegrationKind;
use view_framework::{Navigator, Route, Translate};

pub const INTEGRATIONS_ROUTE: &str = "admin-integrations";

/// Which editor the page body hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationEditor {
    Incoming { integration_id: String },
    Outgoing { integration_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditIntegrationsPage {
    kind: Option<IntegrationKind>,
    integration_id: String,
}

impl EditIntegrationsPage {
    pub fn new(kind: Option<IntegrationKind>, integration_id: impl Into<String>) -> Self {
        Self {
            kind,
            integration_id: integration_id.into(),
        }
    }

    /// Reads the `type` and `id` parameters of the current route.
    pub fn from_route(route: &Route) -> Self {
        Self::new(
            route.get("type").and_then(IntegrationKind::parse),
            route.get("id").unwrap_or_default(),
        )
    }

    pub fn title(&self, translator: &dyn Translate) -> String {
        match self.kind {
            Some(IntegrationKind::Incoming) => translator.t("Integration_Incoming_WebHook"),
            _ => translator.t("Integration_Outgoing_WebHook"),
        }
    }

    pub fn show_history(&self) -> bool {
        self.kind == Some(IntegrationKind::Outgoing)
    }

    /// `None` when the route carries no known type.
    pub fn editor(&self) -> Option<IntegrationEditor> {
        let integration_id = self.integration_id.clone();
        match self.kind? {
            IntegrationKind::Incoming => Some(IntegrationEditor::Incoming { integration_id }),
            IntegrationKind::Outgoing => Some(IntegrationEditor::Outgoing { integration_id }),
        }
    }

    pub fn back(&self, navigator: &dyn Navigator) {
        navigator.push(Route::new(INTEGRATIONS_ROUTE));
    }

    pub fn history(&self, navigator: &dyn Navigator) {
        navigator.push(
            Route::new(INTEGRATIONS_ROUTE)
                .param("context", "history")
                .param("type", IntegrationKind::Outgoing.as_str())
                .param("id", self.integration_id.as_str()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_framework::{Catalog, RouteLog};

    #[test]
    fn test_outgoing_page() {
        let route = Route::new(INTEGRATIONS_ROUTE)
            .param("context", "edit")
            .param("type", "outgoing")
            .param("id", "int1");
        let page = EditIntegrationsPage::from_route(&route);
        let routes = RouteLog::new();

        assert_eq!(page.title(&Catalog::new()), "Integration_Outgoing_WebHook");
        assert!(page.show_history());
        assert_eq!(
            page.editor(),
            Some(IntegrationEditor::Outgoing {
                integration_id: "int1".into()
            })
        );

        page.history(&routes);
        let last = routes.last().unwrap();
        assert_eq!(last.get("context"), Some("history"));
        assert_eq!(last.get("id"), Some("int1"));

        page.back(&routes);
        assert!(routes.last().unwrap().params.is_empty());
    }

    #[test]
    fn test_incoming_and_unknown() {
        let incoming = EditIntegrationsPage::new(Some(IntegrationKind::Incoming), "int2");
        assert_eq!(incoming.title(&Catalog::new()), "Integration_Incoming_WebHook");
        assert!(!incoming.show_history());

        let unknown = EditIntegrationsPage::new(None, "int3");
        assert_eq!(unknown.editor(), None);
        assert!(!unknown.show_history());
    }
}
