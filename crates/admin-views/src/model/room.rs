use super::user::UserStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOwner {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    pub status: UserStatus,
}

/// A room, discriminated by its `t` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Room {
    #[serde(rename = "p")]
    Private,
    #[serde(rename = "c")]
    Public,
    #[serde(rename = "l")]
    Omnichannel { v: Visitor },
    #[serde(rename = "d")]
    Direct {
        #[serde(default)]
        uids: Vec<String>,
        u: RoomOwner,
    },
    #[serde(other)]
    Unknown,
}
