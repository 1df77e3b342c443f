//! Users, chats and the outbound addressing trait.

use serde::Deserialize;

/// A user or bot account on the platform.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// A conversation: private chat, group, supergroup or channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Platform chat type (`private`, `group`, `supergroup`, `channel`).
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Anything an outgoing message can be addressed to: a user, a group
/// or a channel.
pub trait Recipient {
    /// The chat identifier messages to this recipient are sent to.
    fn chat_id(&self) -> i64;
}

impl Recipient for User {
    fn chat_id(&self) -> i64 {
        self.id
    }
}

impl Recipient for Chat {
    fn chat_id(&self) -> i64 {
        self.id
    }
}

impl Recipient for i64 {
    fn chat_id(&self) -> i64 {
        *self
    }
}
