use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    Incoming,
    Outgoing,
}

impl IntegrationKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "incoming" => Some(IntegrationKind::Incoming),
            "outgoing" => Some(IntegrationKind::Outgoing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationKind::Incoming => "incoming",
            IntegrationKind::Outgoing => "outgoing",
        }
    }
}
