use serde::{Deserialize, Serialize};

/// Agent counts per presence, as reported by the dashboard endpoint.
/// Missing counts are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentStatusCounts {
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub away: u32,
    #[serde(default)]
    pub busy: u32,
    #[serde(default)]
    pub offline: u32,
}

/// Date range of the real-time monitoring dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DashboardRange {
    pub start: String,
    pub end: String,
}

impl DashboardRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}
