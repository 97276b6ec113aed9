//! Doughnut chart of agents per presence on the real-time monitoring page.

use crate::api::AgentsStatus;
use crate::context::ViewContext;
use crate::model::{AgentStatusCounts, DashboardRange};
use async_trait::async_trait;
use view_framework::{AsyncPhase, Endpoint, EndpointData, Settled, View, ViewError};

pub const SEGMENT_LABELS: [&str; 4] = ["Available", "Away", "Busy", "Offline"];

#[derive(Debug)]
pub enum AgentStatusEvent {
    SetRange(DashboardRange),
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStatusSnapshot {
    pub title: String,
    pub segments: Vec<(String, u32)>,
    /// False until the first fetch resolved.
    pub resolved: bool,
}

pub struct AgentStatusChart<E = AgentsStatus>
where
    E: Endpoint<Params = DashboardRange, Output = AgentStatusCounts>,
{
    source: EndpointData<E>,
    range: DashboardRange,
    shown: AgentStatusCounts,
    resolved: bool,
}

impl<E> AgentStatusChart<E>
where
    E: Endpoint<Params = DashboardRange, Output = AgentStatusCounts>,
{
    pub fn new(endpoint: E, range: DashboardRange) -> Self {
        Self {
            source: EndpointData::new(endpoint),
            range,
            shown: AgentStatusCounts::default(),
            resolved: false,
        }
    }
}

#[async_trait]
impl<E> View for AgentStatusChart<E>
where
    E: Endpoint<Params = DashboardRange, Output = AgentStatusCounts>,
{
    type Event = AgentStatusEvent;
    type Snapshot = AgentStatusSnapshot;
    type Context = ViewContext;

    async fn on_mount(&mut self, _ctx: &ViewContext) -> Result<(), ViewError> {
        self.source.fetch(self.range.clone());
        Ok(())
    }

    async fn handle_event(&mut self, event: AgentStatusEvent, _ctx: &ViewContext) -> Result<(), ViewError> {
        match event {
            AgentStatusEvent::SetRange(range) => {
                self.range = range.clone();
                self.source.set_params(range);
            }
            AgentStatusEvent::Reload => {
                self.source.reload();
            }
        }
        Ok(())
    }

    fn has_pending(&self) -> bool {
        self.source.has_pending()
    }

    async fn settle(&mut self, _ctx: &ViewContext) -> bool {
        match self.source.next_completion().await {
            Some(Settled::Applied(AsyncPhase::Resolved)) => {
                if let Some(counts) = self.source.value() {
                    self.shown = *counts;
                    self.resolved = true;
                }
                true
            }
            // A failed fetch leaves the chart as it was.
            _ => false,
        }
    }

    fn snapshot(&self, ctx: &ViewContext) -> AgentStatusSnapshot {
        let counts = [
            self.shown.available,
            self.shown.away,
            self.shown.busy,
            self.shown.offline,
        ];
        AgentStatusSnapshot {
            title: ctx.t("Agents"),
            segments: SEGMENT_LABELS
                .iter()
                .zip(counts)
                .map(|(label, count)| (ctx.t(label), count))
                .collect(),
            resolved: self.resolved,
        }
    }

    fn on_unmount(&mut self) {
        self.source.unmount();
    }
}
