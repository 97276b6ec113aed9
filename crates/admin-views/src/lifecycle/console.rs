use crate::api::{
    AgentsStatus, BusinessHoursList, RemoveBusinessHour, RolesList, SharedApi, UsersInfo,
};
use crate::clients::{
    AddUserClient, AgentStatusClient, BusinessHoursClient, EditUserClient, UserInfoClient,
};
use crate::context::ViewContext;
use crate::error::AdminError;
use crate::lifecycle::config::{ConsoleConfig, ViewsConfig};
use crate::message_types::{system_message_types, SystemMessageType};
use crate::model::{DashboardRange, UserLookup};
use crate::views::{
    AddUserView, AgentStatusChart, AgentStatusSnapshot, BusinessHoursTableView, DesktopPermission,
    EditUserView, NotificationPreferences, NotificationPrefs, UserInfoView,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use view_framework::{Registry, View, ViewActor, ViewError, ViewHandle};

/// A mounted view the console can stop.
#[async_trait]
trait Closable: Send + Sync {
    async fn close(&self) -> Result<(), ViewError>;
}

#[async_trait]
impl<V: View> Closable for ViewHandle<V> {
    async fn close(&self) -> Result<(), ViewError> {
        self.unmount().await
    }
}

/// A view task together with the handle that stops it.
struct Mounted {
    view: Box<dyn Closable>,
    task: JoinHandle<()>,
}

/// The runtime orchestrator of the admin console.
///
/// # Architecture
///
/// - **Business hours table** and **agent status chart**: mounted at start-up
///   and reachable through the public clients.
/// - **User screens**: mounted by the `open_*` methods, one actor each.
/// - **System message types**: a registry built once and shared.
pub struct AdminConsole {
    /// Client of the business hours table.
    pub business_hours: BusinessHoursClient,

    /// Client of the agent status chart on the monitoring dashboard.
    pub agent_status: AgentStatusClient,

    pub message_types: Arc<Registry<SystemMessageType>>,

    api: SharedApi,
    context: ViewContext,
    views: ViewsConfig,
    /// Running views; finished ones are pruned on the next mount.
    mounted: Vec<Mounted>,
}

impl AdminConsole {
    /// Validates `config`, builds the registries and mounts the always-on views.
    pub fn new(
        api: SharedApi,
        context: ViewContext,
        config: &ConsoleConfig,
        range: DashboardRange,
    ) -> Result<Self, AdminError> {
        config.validate()?;
        let message_types = Arc::new(system_message_types()?);

        let mut mounted = Vec::new();

        let table = BusinessHoursTableView::new(
            BusinessHoursList(api.clone()),
            Arc::new(RemoveBusinessHour(api.clone())),
            config.views.page_size,
        )?;
        let business_hours =
            BusinessHoursClient::new(mount(table, &context, &config.views, &mut mounted));

        let chart = AgentStatusChart::new(AgentsStatus(api.clone()), range);
        let agent_status =
            AgentStatusClient::new(mount(chart, &context, &config.views, &mut mounted));

        info!(views = mounted.len(), "Console started");
        Ok(Self {
            business_hours,
            agent_status,
            message_types,
            api,
            context,
            views: config.views.clone(),
            mounted,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn open_user_info(&mut self, lookup: UserLookup) -> UserInfoClient {
        let view = UserInfoView::new(UsersInfo(self.api.clone()), lookup);
        UserInfoClient::new(self.mount(view))
    }

    #[tracing::instrument(skip(self, user_id))]
    pub fn open_edit_user(&mut self, user_id: impl Into<String>) -> EditUserClient {
        let view = EditUserView::new(
            self.api.clone(),
            user_id,
            UsersInfo(self.api.clone()),
            RolesList(self.api.clone()),
        );
        EditUserClient::new(self.mount(view))
    }

    #[tracing::instrument(skip(self))]
    pub fn open_add_user(&mut self) -> AddUserClient {
        let view = AddUserView::new(self.api.clone(), RolesList(self.api.clone()));
        AddUserClient::new(self.mount(view))
    }

    /// The notification section of the preferences page, over the console settings.
    pub fn notification_preferences(
        &self,
        current: NotificationPrefs,
        permission: DesktopPermission,
        on_change: impl Fn(&NotificationPrefs) + Send + Sync + 'static,
    ) -> NotificationPreferences {
        NotificationPreferences::new(current, self.context.settings.clone(), permission, on_change)
    }

    /// Refetches the dashboard charts.
    pub async fn reload_dashboard(&self) -> Result<AgentStatusSnapshot, AdminError> {
        self.agent_status.reload().await
    }

    pub fn context(&self) -> &ViewContext {
        &self.context
    }

    /// Number of views whose task is still running.
    pub fn mounted_views(&self) -> usize {
        self.mounted
            .iter()
            .filter(|mounted| !mounted.task.is_finished())
            .count()
    }

    fn mount<V>(&mut self, view: V) -> ViewHandle<V>
    where
        V: View<Context = ViewContext>,
    {
        mount(view, &self.context, &self.views, &mut self.mounted)
    }

    /// Unmounts every view and waits for their tasks.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all views stopped cleanly
    /// - `Err(AdminError)` if a view task panicked
    pub async fn shutdown(self) -> Result<(), AdminError> {
        info!(views = self.mounted.len(), "Shutting down console...");

        for mounted in &self.mounted {
            if let Err(e) = mounted.view.close().await {
                // Already unmounted through a client.
                debug!(error = %e, "View already closed");
            }
        }
        drop(self.business_hours);
        drop(self.agent_status);

        for mounted in self.mounted {
            if let Err(e) = mounted.task.await {
                error!("View task failed: {:?}", e);
                return Err(AdminError::ViewCommunicationError(format!(
                    "View task failed: {e:?}"
                )));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}

fn mount<V>(
    view: V,
    context: &ViewContext,
    views: &ViewsConfig,
    mounted: &mut Vec<Mounted>,
) -> ViewHandle<V>
where
    V: View<Context = ViewContext>,
{
    mounted.retain(|mounted| !mounted.task.is_finished());
    let (actor, handle) = ViewActor::new(view, views.mailbox_capacity);
    mounted.push(Mounted {
        view: Box::new(handle.clone()),
        task: tokio::spawn(actor.run(context.clone())),
    });
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryAdmin;
    use crate::lifecycle::config::UiSettings;
    use std::time::Duration;
    use view_framework::{Catalog, ViewClient};

    async fn wait_for_views(console: &AdminConsole, expected: usize) {
        for _ in 0..200 {
            if console.mounted_views() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("expected {expected} running views, got {}", console.mounted_views());
    }

    #[tokio::test]
    async fn test_closed_views_are_pruned_on_mount() {
        let api: SharedApi = Arc::new(InMemoryAdmin::new());
        let (context, _, _) = ViewContext::recording(Catalog::new(), UiSettings::default());
        let mut console = AdminConsole::new(
            api,
            context,
            &ConsoleConfig::default(),
            DashboardRange::new("2026-10-01", "2026-10-18"),
        )
        .unwrap();

        for _ in 0..3 {
            let form = console.open_add_user();
            form.settled().await.unwrap();
            form.unmount().await.unwrap();
        }
        wait_for_views(&console, 2).await;

        let info = console.open_user_info(UserLookup::Id("u1".into()));
        assert_eq!(console.mounted.len(), 3);
        assert_eq!(console.mounted_views(), 3);

        info.unmount().await.unwrap();
        console.shutdown().await.unwrap();
    }
}
