//! # System Message Types
//!
//! Room setting changes are posted as system messages. Each type has an id,
//! a translation key for its text and a builder that extracts the values the
//! text interpolates (`__user_by__`, `__room_topic__`, ...).

use crate::model::Message;
use std::collections::BTreeMap;
use view_framework::{Registry, RegistryBuilder, Translate, ViewError};

pub type MessageData = BTreeMap<String, String>;

pub type DataBuilder = fn(&Message, &dyn Translate) -> MessageData;

#[derive(Clone, Copy)]
pub struct SystemMessageType {
    pub id: &'static str,
    pub system: bool,
    /// Translation key of the message text.
    pub message: &'static str,
    pub data: DataBuilder,
}

impl SystemMessageType {
    const fn system(id: &'static str, data: DataBuilder) -> Self {
        Self {
            id,
            system: true,
            message: id,
            data,
        }
    }

    /// The translated text with every `__key__` placeholder filled in.
    pub fn render(&self, message: &Message, translator: &dyn Translate) -> String {
        let data = (self.data)(message, translator);
        format_placeholders(&translator.t(self.message), &data)
    }
}

impl std::fmt::Debug for SystemMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemMessageType")
            .field("id", &self.id)
            .field("system", &self.system)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

const ROOM_CHANGE_TYPES: [SystemMessageType; 5] = [
    SystemMessageType::system("room_changed_privacy", privacy_data),
    SystemMessageType::system("room_changed_topic", topic_data),
    SystemMessageType::system("room_changed_avatar", avatar_data),
    SystemMessageType::system("room_changed_announcement", announcement_data),
    SystemMessageType::system("room_changed_description", description_data),
];

/// Registers the room change message types.
pub fn register_room_change_types(
    builder: &mut RegistryBuilder<SystemMessageType>,
) -> Result<(), ViewError> {
    for message_type in ROOM_CHANGE_TYPES {
        builder.register(message_type.id, message_type)?;
    }
    Ok(())
}

pub fn system_message_types() -> Result<Registry<SystemMessageType>, ViewError> {
    let mut builder = RegistryBuilder::new();
    register_room_change_types(&mut builder)?;
    Ok(builder.build())
}

/// Escapes text for interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '¢' => escaped.push_str("&cent;"),
            '£' => escaped.push_str("&pound;"),
            '¥' => escaped.push_str("&yen;"),
            '€' => escaped.push_str("&euro;"),
            '©' => escaped.push_str("&copy;"),
            '®' => escaped.push_str("&reg;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn format_placeholders(text: &str, data: &MessageData) -> String {
    data.iter().fold(text.to_string(), |text, (key, value)| {
        text.replace(&format!("__{key}__"), value)
    })
}

fn with_author(message: &Message) -> MessageData {
    let mut data = MessageData::new();
    if let Some(author) = &message.u {
        data.insert("user_by".to_string(), author.username.clone());
    }
    data
}

/// The message text escaped, or `(none)` when empty.
fn text_or_none(message: &Message, translator: &dyn Translate) -> String {
    if message.msg.is_empty() {
        escape_html(&format!("({})", translator.t("None").to_lowercase()))
    } else {
        escape_html(&message.msg)
    }
}

fn privacy_data(message: &Message, translator: &dyn Translate) -> MessageData {
    let mut data = with_author(message);
    data.insert("room_type".to_string(), translator.t(&message.msg));
    data
}

fn topic_data(message: &Message, translator: &dyn Translate) -> MessageData {
    let mut data = with_author(message);
    data.insert("room_topic".to_string(), text_or_none(message, translator));
    data
}

fn avatar_data(message: &Message, _translator: &dyn Translate) -> MessageData {
    with_author(message)
}

fn announcement_data(message: &Message, translator: &dyn Translate) -> MessageData {
    let mut data = with_author(message);
    data.insert(
        "room_announcement".to_string(),
        text_or_none(message, translator),
    );
    data
}

fn description_data(message: &Message, translator: &dyn Translate) -> MessageData {
    let mut data = with_author(message);
    data.insert(
        "room_description".to_string(),
        text_or_none(message, translator),
    );
    data
}
