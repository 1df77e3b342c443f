//! The inbound update: one event from the platform.

use crate::message::Message;
use crate::query::{Callback, PreCheckoutQuery, ShippingQuery};

/// One inbound event.
///
/// Exactly one event variant is populated — the tagged union holds that
/// invariant by construction. `id` is used only for offset advancement,
/// never for deduplication beyond "greater than last seen".
#[derive(Debug, Clone)]
pub struct Update {
    /// Monotonically increasing platform-assigned identifier.
    pub id: i64,
    pub kind: UpdateKind,
    /// Filled in by the router: command arguments or the decoded callback
    /// payload. Empty for every other route.
    pub payload: String,
}

/// The event carried by an update.
#[derive(Debug, Clone)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    CallbackQuery(Callback),
    ShippingQuery(ShippingQuery),
    PreCheckoutQuery(PreCheckoutQuery),
}

impl Update {
    pub fn new(id: i64, kind: UpdateKind) -> Self {
        Self {
            id,
            kind,
            payload: String::new(),
        }
    }
}

impl UpdateKind {
    /// Stable event name, used in tracing fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::EditedMessage(_) => "edited_message",
            Self::ChannelPost(_) => "channel_post",
            Self::EditedChannelPost(_) => "edited_channel_post",
            Self::CallbackQuery(_) => "callback_query",
            Self::ShippingQuery(_) => "shipping_query",
            Self::PreCheckoutQuery(_) => "pre_checkout_query",
        }
    }
}
