//! Icon shown next to a room name.

use crate::model::Room;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomIcon {
    Icon {
        name: &'static str,
        color: Option<&'static str>,
    },
    /// Live presence bullet of a user.
    Presence { uid: String },
}

impl RoomIcon {
    fn named(name: &'static str) -> Self {
        RoomIcon::Icon { name, color: None }
    }
}

/// `None` for room types without an icon.
pub fn room_icon(room: &Room) -> Option<RoomIcon> {
    match room {
        Room::Private => Some(RoomIcon::named("lock")),
        Room::Public => Some(RoomIcon::named("hash")),
        Room::Omnichannel { v } => Some(RoomIcon::Icon {
            name: "headset",
            color: Some(v.status.color()),
        }),
        Room::Direct { uids, u } => {
            if uids.len() > 2 {
                return Some(RoomIcon::named("team"));
            }
            if uids.is_empty() {
                return Some(RoomIcon::named("at"));
            }
            // The peer of a one-to-one room; the owner in a self-chat.
            let uid = uids
                .iter()
                .find(|uid| **uid != u.id)
                .unwrap_or(&u.id)
                .clone();
            Some(RoomIcon::Presence { uid })
        }
        Room::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoomOwner, UserStatus, Visitor};

    fn direct(uids: &[&str], owner: &str) -> Room {
        Room::Direct {
            uids: uids.iter().map(|uid| uid.to_string()).collect(),
            u: RoomOwner {
                id: owner.to_string(),
            },
        }
    }

    #[test]
    fn test_channel_icons() {
        assert_eq!(room_icon(&Room::Private), Some(RoomIcon::named("lock")));
        assert_eq!(room_icon(&Room::Public), Some(RoomIcon::named("hash")));
        assert_eq!(
            room_icon(&Room::Omnichannel {
                v: Visitor {
                    status: UserStatus::Away
                }
            }),
            Some(RoomIcon::Icon {
                name: "headset",
                color: Some("warning-600")
            })
        );
        assert_eq!(room_icon(&Room::Unknown), None);
    }

    #[test]
    fn test_direct_rooms() {
        assert_eq!(
            room_icon(&direct(&["a", "b", "c"], "a")),
            Some(RoomIcon::named("team"))
        );
        assert_eq!(
            room_icon(&direct(&["a", "b"], "a")),
            Some(RoomIcon::Presence { uid: "b".into() })
        );
        assert_eq!(
            room_icon(&direct(&["a"], "a")),
            Some(RoomIcon::Presence { uid: "a".into() })
        );
        assert_eq!(room_icon(&direct(&[], "a")), Some(RoomIcon::named("at")));
    }

    #[test]
    fn test_room_wire_format() {
        let room: Room = serde_json::from_str(r#"{"t": "d", "uids": ["x", "y"], "u": {"_id": "x"}}"#).unwrap();
        assert_eq!(room_icon(&room), Some(RoomIcon::Presence { uid: "y".into() }));

        let room: Room = serde_json::from_str(r#"{"t": "v"}"#).unwrap();
        assert_eq!(room, Room::Unknown);
    }
}
