use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub username: String,
}

/// The parts of a chat message the system message builders read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub u: Option<MessageAuthor>,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            u: None,
        }
    }

    pub fn by(mut self, username: impl Into<String>) -> Self {
        self.u = Some(MessageAuthor {
            username: username.into(),
        });
        self
    }
}
