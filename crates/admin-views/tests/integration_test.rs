use admin_views::api::SharedApi;
use admin_views::context::ViewContext;
use admin_views::error::AdminError;
use admin_views::in_memory::{AvatarSource, InMemoryAdmin, Operation};
use admin_views::lifecycle::{AdminConsole, ConsoleConfig, UiSettings};
use admin_views::model::{
    AgentStatusCounts, AvatarFile, BusinessHour, BusinessHourType, DashboardRange, Role, Timezone,
    UserLookup, UserRecord,
};
use admin_views::views::{
    AddUserSnapshot, AvatarChange, BusinessHoursSnapshot, DesktopPermission, EditUserProps,
    EditUserSnapshot, NotificationPrefs, UserFormValuesField, UserInfoSnapshot,
};
use std::sync::Arc;
use view_framework::{Catalog, RouteLog, Toast, ToastKind, ToastLog, ViewClient, ViewError};

fn hour(id: &str, name: &str) -> BusinessHour {
    BusinessHour {
        id: id.to_string(),
        name: name.to_string(),
        timezone: Timezone {
            name: "UTC".to_string(),
        },
        work_hours: Vec::new(),
        active: true,
        kind: if name.is_empty() {
            BusinessHourType::Default
        } else {
            BusinessHourType::Custom
        },
    }
}

fn seed() -> InMemoryAdmin {
    let mut pending = UserRecord::new("u2", "carol");
    pending.active = false;
    pending.reason = Some("New hire".to_string());

    InMemoryAdmin::new()
        .with_role(Role::new("admin", Some("Administrator")))
        .with_role(Role::new("user", None))
        .with_user(UserRecord::new("u1", "bob"))
        .with_user(pending)
        .with_business_hour(hour("bh0", ""))
        .with_business_hour(hour("bh1", "Support"))
        .with_business_hour(hour("bh2", "Sales"))
        .with_agents(AgentStatusCounts {
            available: 2,
            away: 1,
            busy: 0,
            offline: 5,
        })
}

struct Setup {
    admin: Arc<InMemoryAdmin>,
    console: AdminConsole,
    routes: RouteLog,
    toasts: ToastLog,
}

fn start(settings: UiSettings) -> Setup {
    let admin = Arc::new(seed());
    let api: SharedApi = admin.clone();
    let (context, routes, toasts) = ViewContext::recording(Catalog::new(), settings);
    let console = AdminConsole::new(
        api,
        context,
        &ConsoleConfig::default(),
        DashboardRange::new("2026-10-01", "2026-10-18"),
    )
    .unwrap();
    Setup {
        admin,
        console,
        routes,
        toasts,
    }
}

fn ready_props(snapshot: EditUserSnapshot) -> EditUserProps {
    match snapshot {
        EditUserSnapshot::Ready(props) => *props,
        other => panic!("expected the edit form, got {other:?}"),
    }
}

fn png() -> AvatarFile {
    AvatarFile {
        file_name: "bob.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

#[tokio::test]
async fn test_business_hours_filter_and_remove() {
    let s = start(UiSettings::default());
    let hours = s.console.business_hours.clone();

    hours.filter("s".to_string()).await.unwrap();
    let BusinessHoursSnapshot::Ready { table, .. } = hours.settled().await.unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(table.total, 2);

    hours.remove("bh2".to_string()).await.unwrap();
    hours.confirm_remove().await.unwrap();
    let BusinessHoursSnapshot::Ready { table, .. } = hours.settled().await.unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].id, "bh1");
    assert_eq!(s.admin.business_hour_ids(), vec!["bh0", "bh1"]);
    assert_eq!(s.toasts.last(), Some(Toast::success("Business_Hour_Removed")));

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_add_user_then_edit_with_avatar() {
    let mut s = start(UiSettings::default());

    let form = s.console.open_add_user();
    let snapshot: AddUserSnapshot = form.settled().await.unwrap();
    assert!(snapshot.values.send_welcome_email);
    assert!(snapshot.values.join_default_channels);
    assert!(!snapshot.can_save);
    assert_eq!(
        snapshot.available_roles,
        vec![
            ("admin".to_string(), "Administrator".to_string()),
            ("user".to_string(), "user".to_string())
        ]
    );

    form.edit(UserFormValuesField::Username, "dave").await.unwrap();
    form.edit(UserFormValuesField::Email, "dave@example.com")
        .await
        .unwrap();
    let snapshot = form.save().await.unwrap();
    assert!(!snapshot.can_save);
    assert_eq!(s.toasts.last(), Some(Toast::success("User_created_successfully")));

    let route = s.routes.last().unwrap();
    assert_eq!(route.name, "admin-users");
    assert_eq!(route.get("context"), Some("info"));
    let user_id = route.get("id").unwrap().to_string();
    assert_eq!(s.admin.user(&user_id).unwrap().username, "dave");

    let editor = s.console.open_edit_user(user_id.clone());
    let props = ready_props(editor.settled().await.unwrap());
    assert_eq!(props.values.email, "dave@example.com");
    assert!(!props.can_save);

    editor
        .edit(UserFormValuesField::Roles, vec!["admin".to_string()])
        .await
        .unwrap();
    let props = ready_props(editor.set_avatar(AvatarChange::Upload(png())).await.unwrap());
    assert!(props.can_save);
    assert!(props.avatar_queued);

    let props = ready_props(editor.save().await.unwrap());
    assert!(!props.can_save);
    assert!(!props.avatar_queued);

    assert_eq!(s.admin.user(&user_id).unwrap().roles, vec!["admin".to_string()]);
    assert_eq!(
        s.admin.avatar(&user_id),
        Some(AvatarSource::Upload {
            file_name: "bob.png".to_string(),
            size: 4
        })
    );
    let messages: Vec<String> = s.toasts.entries().into_iter().map(|t| t.message).collect();
    assert!(messages.ends_with(&[
        "User_updated_successfully".to_string(),
        "Avatar_changed_successfully".to_string()
    ]));
    assert_eq!(s.routes.last().unwrap().get("id"), Some(user_id.as_str()));

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_avatar_failure_keeps_user_update() {
    let mut s = start(UiSettings::default());
    s.admin.fail_next(Operation::SetAvatar, "error-avatar");

    let editor = s.console.open_edit_user("u1");
    editor.settled().await.unwrap();
    editor
        .edit(UserFormValuesField::Nickname, "bobby")
        .await
        .unwrap();
    editor
        .set_avatar(AvatarChange::Url("https://example.com/b.png".to_string()))
        .await
        .unwrap();
    editor.save().await.unwrap();

    assert_eq!(s.admin.user("u1").unwrap().nickname.as_deref(), Some("bobby"));
    assert_eq!(s.admin.avatar("u1"), None);

    let toasts = s.toasts.entries();
    assert_eq!(toasts[toasts.len() - 2], Toast::success("User_updated_successfully"));
    assert_eq!(toasts[toasts.len() - 1].kind, ToastKind::Error);
    assert!(toasts[toasts.len() - 1].message.contains("error-avatar"));
    assert_eq!(s.routes.last().unwrap().get("id"), Some("u1"));

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_update_keeps_draft_and_upload() {
    let mut s = start(UiSettings::default());
    s.admin.fail_next(Operation::UpdateUser, "error-update");

    let editor = s.console.open_edit_user("u1");
    editor.settled().await.unwrap();
    editor.edit(UserFormValuesField::Bio, "hello").await.unwrap();
    editor.set_avatar(AvatarChange::Reset).await.unwrap();

    let props = ready_props(editor.save().await.unwrap());
    assert!(props.can_save);
    assert!(props.avatar_queued);
    assert_eq!(props.values.bio, "hello");
    assert_eq!(s.toasts.last(), Some(Toast::error("Remote error: error-update")));
    assert!(s.routes.routes().is_empty());
    assert_eq!(s.admin.user("u1").unwrap().bio, None);

    // The retry goes through.
    let props = ready_props(editor.save().await.unwrap());
    assert!(!props.can_save);
    assert_eq!(s.admin.user("u1").unwrap().bio.as_deref(), Some("hello"));

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reset_discards_draft_and_avatar() {
    let mut s = start(UiSettings::default());

    let editor = s.console.open_edit_user("u1");
    let initial = ready_props(editor.settled().await.unwrap()).values;
    editor.edit(UserFormValuesField::Name, "Robert").await.unwrap();
    editor.set_avatar(AvatarChange::Reset).await.unwrap();

    let props = ready_props(editor.reset().await.unwrap());
    assert_eq!(props.values, initial);
    assert!(!props.can_save);
    assert!(!props.can_reset);
    assert!(!props.avatar_queued);

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_edit_unknown_user_or_roles_failure() {
    let mut s = start(UiSettings::default());

    let editor = s.console.open_edit_user("missing");
    assert_eq!(
        editor.settled().await.unwrap(),
        EditUserSnapshot::NotFound("User_not_found".to_string())
    );

    s.admin.fail_next(Operation::RolesList, "error-not-allowed");
    let editor = s.console.open_edit_user("u1");
    assert_eq!(
        editor.settled().await.unwrap(),
        EditUserSnapshot::NotFound("User_not_found".to_string())
    );

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_user_info_shows_pending_reason() {
    let settings = UiSettings {
        manually_approve_new_users: true,
        use_real_name: true,
        ..UiSettings::default()
    };
    let mut s = start(settings);

    let info = s.console.open_user_info(UserLookup::Username("carol".to_string()));
    let UserInfoSnapshot::Ready(props) = info.settled().await.unwrap() else {
        panic!("expected the profile");
    };
    assert!(props.show_real_names);
    assert_eq!(props.custom_fields.get("Reason").map(String::as_str), Some("New hire"));
    assert!(!props.actions.is_active);
    assert_eq!(props.actions.id, "u2");

    let missing = s.console.open_user_info(UserLookup::Id("nobody".to_string()));
    assert_eq!(
        missing.settled().await.unwrap(),
        UserInfoSnapshot::NotFound("User_not_found".to_string())
    );

    // A reload shows the skeleton until it lands.
    assert_eq!(info.changed().await.unwrap(), UserInfoSnapshot::Loading);
    assert!(matches!(info.settled().await.unwrap(), UserInfoSnapshot::Ready(_)));

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_agent_status_updates_only_when_resolved() {
    let s = start(UiSettings::default());

    let chart = s.console.agent_status.settled().await.unwrap();
    assert!(chart.resolved);
    assert_eq!(chart.title, "Agents");
    assert_eq!(
        chart.segments,
        vec![
            ("Available".to_string(), 2),
            ("Away".to_string(), 1),
            ("Busy".to_string(), 0),
            ("Offline".to_string(), 5)
        ]
    );

    s.admin.set_agents(AgentStatusCounts {
        available: 4,
        ..AgentStatusCounts::default()
    });
    s.console.reload_dashboard().await.unwrap();
    let chart = s.console.agent_status.settled().await.unwrap();
    assert_eq!(chart.segments[0].1, 4);
    assert_eq!(chart.segments[3].1, 0);

    s.admin.fail_next(Operation::AgentsStatus, "error-down");
    s.console.reload_dashboard().await.unwrap();
    let chart = s.console.agent_status.settled().await.unwrap();
    assert_eq!(chart.segments[0].1, 4);

    s.console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_after_client_unmount() {
    let mut s = start(UiSettings::default());
    let hours = s.console.business_hours.clone();
    let form = s.console.open_add_user();
    form.settled().await.unwrap();
    assert_eq!(s.console.mounted_views(), 3);
    form.unmount().await.unwrap();

    assert_eq!(s.console.message_types.len(), 5);
    s.console.shutdown().await.unwrap();
    assert_eq!(
        form.snapshot().await,
        Err(AdminError::View(ViewError::ViewClosed))
    );
    assert_eq!(
        hours.settled().await,
        Err(AdminError::View(ViewError::ViewClosed))
    );
}

#[tokio::test]
async fn test_notification_preferences_use_console_settings() {
    let settings = UiSettings {
        allow_email_notifications: false,
        default_desktop_notifications: "mentions".to_string(),
        ..UiSettings::default()
    };
    let s = start(settings);
    let prefs = NotificationPrefs {
        desktop_notification_require_interaction: true,
        desktop_notifications: "default".to_string(),
        mobile_notifications: "all".to_string(),
        email_notification_mode: "nothing".to_string(),
        audio_notifications: "default".to_string(),
    };

    let section = s
        .console
        .notification_preferences(prefs, DesktopPermission::Granted, |_| {});
    let translator = s.console.context().translator.clone();

    assert_eq!(
        section.desktop_options(translator.as_ref())[0].1,
        "Default (Mentions)"
    );
    let email = section.email_select(translator.as_ref());
    assert!(email.disabled);
    assert_eq!(email.options[0].1, "Default (Email_Notification_Mode_Disabled)");

    section.send_test_notification(s.console.context());
    assert_eq!(s.toasts.last().unwrap().kind, ToastKind::Info);

    s.console.shutdown().await.unwrap();
}
