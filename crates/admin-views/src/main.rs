//! # Admin Views Demo
//!
//! Boots the console over the in-memory API and walks through the screens:
//! 1.  Filtering and removing a business hour.
//! 2.  Creating a user, then editing it with an avatar change.
//! 3.  Reloading the agent status chart.
//!
//! Set `ADMIN_VIEWS_CONFIG` to a TOML file to override the defaults and
//! `RUST_LOG=debug` to see every fetch.

use admin_views::api::SharedApi;
use admin_views::context::ViewContext;
use admin_views::in_memory::InMemoryAdmin;
use admin_views::lifecycle::{AdminConsole, ConsoleConfig};
use admin_views::model::{
    AgentStatusCounts, BusinessHour, BusinessHourType, DashboardRange, Role, Timezone, WorkDay,
};
use admin_views::views::edit_user::AvatarChange;
use admin_views::views::{AddUserSnapshot, BusinessHoursSnapshot, EditUserSnapshot, UserFormValuesField};
use std::sync::Arc;
use tracing::{error, info, Instrument};
use view_framework::tracing::setup_tracing;
use view_framework::{Catalog, ViewClient};

fn seed() -> InMemoryAdmin {
    let week = |days: &[&str]| {
        days.iter()
            .map(|day| WorkDay {
                day: day.to_string(),
                open: true,
            })
            .collect::<Vec<_>>()
    };
    InMemoryAdmin::new()
        .with_role(Role::new("admin", Some("Administrator")))
        .with_role(Role::new("user", None))
        .with_business_hour(BusinessHour {
            id: "default".to_string(),
            name: String::new(),
            timezone: Timezone {
                name: "UTC".to_string(),
            },
            work_hours: week(&["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
            active: true,
            kind: BusinessHourType::Default,
        })
        .with_business_hour(BusinessHour {
            id: "weekend".to_string(),
            name: "Weekend support".to_string(),
            timezone: Timezone {
                name: "America/Sao_Paulo".to_string(),
            },
            work_hours: week(&["Saturday", "Sunday"]),
            active: false,
            kind: BusinessHourType::Custom,
        })
        .with_agents(AgentStatusCounts {
            available: 3,
            away: 1,
            busy: 2,
            offline: 4,
        })
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ConsoleConfig::from_env().map_err(|e| e.to_string())?;
    info!(page_size = config.views.page_size, "Starting admin console");

    let api: SharedApi = Arc::new(seed());
    let catalog = Catalog::new()
        .with("Yes", "Yes")
        .with("No", "No")
        .with("Business_Hour_Removed", "Business hour removed");
    let (context, routes, toasts) = ViewContext::recording(catalog, config.settings.clone());
    let range = DashboardRange::new("2026-10-01", "2026-10-18");
    let mut console =
        AdminConsole::new(api, context, &config, range).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("business_hours");
    async {
        let hours = &console.business_hours;
        hours.filter("weekend".to_string()).await?;
        if let BusinessHoursSnapshot::Ready { table, .. } = hours.settled().await? {
            info!(rows = table.rows.len(), total = table.total, "Filtered business hours");
        }
        hours.remove("weekend".to_string()).await?;
        hours.confirm_remove().await?;
        if let BusinessHoursSnapshot::Ready { table, .. } = hours.settled().await? {
            info!(rows = table.rows.len(), "Business hours after removal");
        }
        Ok::<_, admin_views::error::AdminError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("user_creation");
    let created = async {
        let form = console.open_add_user();
        form.settled().await?;
        form.edit(UserFormValuesField::Username, "alice").await?;
        form.edit(UserFormValuesField::Name, "Alice").await?;
        form.edit(UserFormValuesField::Email, "alice@example.com")
            .await?;
        let snapshot: AddUserSnapshot = form.save().await?;
        form.unmount().await?;
        Ok::<_, admin_views::error::AdminError>(snapshot)
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(can_save = created.can_save, "User form submitted");

    let Some(user_id) = routes.last().and_then(|route| route.get("id").map(str::to_string)) else {
        error!("User creation did not navigate to the new user");
        return Err("user creation failed".to_string());
    };
    info!(user_id = %user_id, "User created successfully");

    let span = tracing::info_span!("user_edit");
    async {
        let editor = console.open_edit_user(user_id.clone());
        if let EditUserSnapshot::Ready(props) = editor.settled().await? {
            info!(username = %props.username, roles = props.available_roles.len(), "Editing user");
        }
        editor
            .edit(UserFormValuesField::Roles, vec!["admin".to_string()])
            .await?;
        editor
            .set_avatar(AvatarChange::Url("https://example.com/alice.png".to_string()))
            .await?;
        editor.save().await?;
        Ok::<_, admin_views::error::AdminError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    match console.reload_dashboard().await {
        Ok(_) => {
            let chart = console.agent_status.settled().await.map_err(|e| e.to_string())?;
            info!(segments = ?chart.segments, "Agent status");
        }
        Err(e) => error!(error = %e, "Dashboard reload failed"),
    }

    for toast in toasts.entries() {
        info!(kind = ?toast.kind, message = %toast.message, "Toast");
    }

    // Shutdown console gracefully
    console.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
