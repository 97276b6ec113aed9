//! The form shared by the add-user and edit-user screens.

use crate::api::SharedApi;
use crate::model::{NewUser, Role, UserRecord, UserStatus, UserUpdate};
use async_trait::async_trait;
use std::collections::BTreeMap;
use view_framework::{form_values, EndpointError, SaveReceipt, Submit};

form_values! {
    pub struct UserFormValues {
        pub roles: Vec<String>,
        pub name: String,
        pub username: String,
        pub status: String,
        pub status_text: String,
        pub bio: String,
        pub nickname: String,
        pub email: String,
        pub password: String,
        pub verified: bool,
        pub require_password_change: bool,
        pub set_random_password: bool,
        pub send_welcome_email: bool,
        pub join_default_channels: bool,
        pub custom_fields: BTreeMap<String, String>,
    }
}

impl UserFormValues {
    /// Blank form of the add-user screen.
    pub fn for_new_user() -> Self {
        Self {
            roles: Vec::new(),
            name: String::new(),
            username: String::new(),
            status: String::new(),
            status_text: String::new(),
            bio: String::new(),
            nickname: String::new(),
            email: String::new(),
            password: String::new(),
            verified: false,
            require_password_change: false,
            set_random_password: false,
            send_welcome_email: true,
            join_default_channels: true,
            custom_fields: BTreeMap::new(),
        }
    }

    /// Form values hydrated from a fetched user.
    pub fn from_record(user: &UserRecord) -> Self {
        let email = user.primary_email();
        Self {
            roles: user.roles.clone(),
            name: user.name.clone().unwrap_or_default(),
            username: user.username.clone(),
            status: user.status.as_str().to_string(),
            status_text: user.status_text.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
            nickname: user.nickname.clone().unwrap_or_default(),
            email: email.map(|e| e.address.clone()).unwrap_or_default(),
            password: String::new(),
            verified: email.is_some_and(|e| e.verified),
            require_password_change: user.require_password_change,
            set_random_password: false,
            send_welcome_email: false,
            join_default_channels: false,
            custom_fields: user.custom_fields.clone(),
        }
    }

    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            roles: self.roles.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            status_text: self.status_text.clone(),
            bio: self.bio.clone(),
            nickname: self.nickname.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            verified: self.verified,
            require_password_change: self.require_password_change,
            set_random_password: self.set_random_password,
            send_welcome_email: self.send_welcome_email,
            join_default_channels: self.join_default_channels,
            custom_fields: self.custom_fields.clone(),
        }
    }

    pub fn to_update(&self) -> UserUpdate {
        UserUpdate {
            roles: self.roles.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            status: UserStatus::parse(&self.status).unwrap_or_default(),
            status_text: self.status_text.clone(),
            bio: self.bio.clone(),
            nickname: self.nickname.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            verified: self.verified,
            require_password_change: self.require_password_change,
            set_random_password: self.set_random_password,
            custom_fields: self.custom_fields.clone(),
        }
    }
}

/// `(id, label)` pairs for the roles multi-select.
pub fn available_roles(roles: &[Role]) -> Vec<(String, String)> {
    roles
        .iter()
        .map(|role| (role.id.clone(), role.label().to_string()))
        .collect()
}

pub fn validate_new_user(values: &UserFormValues) -> Result<(), String> {
    if values.username.trim().is_empty() {
        return Err("username is required".into());
    }
    Ok(())
}

pub fn validate_existing_user(values: &UserFormValues) -> Result<(), String> {
    validate_new_user(values)?;
    if UserStatus::parse(&values.status).is_none() {
        return Err(format!("unknown status `{}`", values.status));
    }
    Ok(())
}

/// `users.create`
pub struct CreateUser {
    pub api: SharedApi,
}

#[async_trait]
impl Submit<UserFormValues> for CreateUser {
    async fn submit(&self, values: &UserFormValues) -> Result<SaveReceipt, EndpointError> {
        let user = self.api.create_user(&values.to_new_user()).await?;
        Ok(SaveReceipt::new(user.id))
    }
}

/// `users.update`
pub struct UpdateUser {
    pub api: SharedApi,
    pub user_id: String,
}

#[async_trait]
impl Submit<UserFormValues> for UpdateUser {
    async fn submit(&self, values: &UserFormValues) -> Result<SaveReceipt, EndpointError> {
        let user = self.api.update_user(&self.user_id, &values.to_update()).await?;
        Ok(SaveReceipt::new(user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EmailEntry;
    use view_framework::FormDraft;

    #[test]
    fn test_from_record() {
        let mut user = UserRecord::new("u1", "alice");
        user.status = UserStatus::Busy;
        user.emails = vec![EmailEntry {
            address: "alice@example.com".into(),
            verified: true,
        }];
        user.require_password_change = true;

        let values = UserFormValues::from_record(&user);
        assert_eq!(values.status, "busy");
        assert_eq!(values.email, "alice@example.com");
        assert!(values.verified);
        assert!(values.require_password_change);
        assert!(values.password.is_empty());
        assert_eq!(values.to_update().status, UserStatus::Busy);
    }

    #[test]
    fn test_validation() {
        let mut values = UserFormValues::for_new_user();
        assert!(validate_new_user(&values).is_err());
        values.username = "bob".into();
        assert!(validate_new_user(&values).is_ok());
        assert!(validate_existing_user(&values).is_err());
        values.status = "online".into();
        assert!(validate_existing_user(&values).is_ok());
    }

    #[test]
    fn test_typed_handlers_mark_fields_dirty() {
        let mut draft = FormDraft::new(UserFormValues::for_new_user());
        draft.handle_username("bob".into());
        draft.handle_roles(vec!["admin".into()]);
        assert_eq!(
            draft.dirty_fields(),
            vec![UserFormValuesField::Roles, UserFormValuesField::Username]
        );
    }
}
