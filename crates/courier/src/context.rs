//! The per-update execution context handed to handlers.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use courier_core::{
    Callback, Chat, Error, Message, Recipient, Result, SendOptions, Update, UpdateKind, User,
};

use crate::bot::Bot;
use crate::sendable::Sendable;

/// Read-only view of one update plus a typed scratch store.
///
/// Contexts are cheap to clone and share: the update is fixed for the
/// handler's lifetime, only the scratch store is mutable. All projections
/// (`message`, `sender`, `chat`, ...) answer `None` rather than panic when
/// the update does not carry the requested shape.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    bot: Bot,
    update: Update,
    store: RwLock<HashMap<String, Box<dyn Any + Send + Sync>>>,
}

impl Context {
    pub(crate) fn new(bot: Bot, update: Update) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                bot,
                update,
                store: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The gateway this update arrived through.
    pub fn bot(&self) -> &Bot {
        &self.inner.bot
    }

    /// The raw update.
    pub fn update(&self) -> &Update {
        &self.inner.update
    }

    // ========================================================================
    // Projections
    // ========================================================================

    /// The message behind this update, if it carries one.
    ///
    /// For callback queries this is the message the pressed button was
    /// attached to; for channel-post pin events it is the pinned message.
    pub fn message(&self) -> Option<&Message> {
        match &self.inner.update.kind {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::EditedChannelPost(m) => Some(m),
            UpdateKind::ChannelPost(m) => Some(m.pinned_message.as_deref().unwrap_or(m)),
            UpdateKind::CallbackQuery(c) => c.message.as_deref(),
            _ => None,
        }
    }

    pub fn callback(&self) -> Option<&Callback> {
        match &self.inner.update.kind {
            UpdateKind::CallbackQuery(c) => Some(c),
            _ => None,
        }
    }

    /// Whoever produced this update. Channel posts have no sender.
    pub fn sender(&self) -> Option<&User> {
        match &self.inner.update.kind {
            UpdateKind::CallbackQuery(c) => Some(&c.from),
            UpdateKind::ShippingQuery(q) => Some(&q.from),
            UpdateKind::PreCheckoutQuery(q) => Some(&q.from),
            _ => self.message().and_then(|m| m.from.as_ref()),
        }
    }

    /// The chat the update happened in, if any.
    pub fn chat(&self) -> Option<&Chat> {
        self.message().map(|m| &m.chat)
    }

    /// Where replies should go: the chat when there is one, otherwise the
    /// sender's private chat.
    pub fn recipient(&self) -> Option<&dyn Recipient> {
        if let Some(chat) = self.chat() {
            Some(chat)
        } else if let Some(sender) = self.sender() {
            Some(sender)
        } else {
            None
        }
    }

    /// Text or caption of the underlying message, or `""`.
    pub fn text(&self) -> &str {
        self.message().map(Message::text_or_caption).unwrap_or("")
    }

    /// The routed payload: command arguments for messages, decoded callback
    /// data for callback queries, `""` otherwise.
    pub fn data(&self) -> &str {
        match &self.inner.update.kind {
            UpdateKind::Message(_) => &self.inner.update.payload,
            UpdateKind::CallbackQuery(c) => &c.data,
            _ => "",
        }
    }

    /// The payload split into arguments: whitespace-separated words for
    /// command payloads, `|`-separated fields for callback data.
    pub fn args(&self) -> Vec<String> {
        match &self.inner.update.kind {
            UpdateKind::CallbackQuery(c) => c.data.split('|').map(str::to_owned).collect(),
            _ => self
                .inner
                .update
                .payload
                .trim()
                .split(' ')
                .map(str::to_owned)
                .collect(),
        }
    }

    // ========================================================================
    // Scratch store
    // ========================================================================

    /// Stores a value under `key`, shared by every clone of this context.
    pub fn set<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
        self.inner.store.write().insert(key.into(), Box::new(value));
    }

    /// Retrieves a previously stored value of type `T`.
    pub fn get<T: Any + Send + Sync + Clone>(&self, key: &str) -> Option<T> {
        self.inner
            .store
            .read()
            .get(key)
            .and_then(|v| v.downcast_ref::<T>())
            .cloned()
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Sends `what` to this update's recipient.
    pub async fn send(&self, what: impl Sendable) -> Result<Message> {
        self.send_with(what, SendOptions::new()).await
    }

    pub async fn send_with(&self, what: impl Sendable, options: SendOptions) -> Result<Message> {
        let chat_id = self.recipient().ok_or(Error::BadRecipient)?.chat_id();
        what.send_to(&self.inner.bot, chat_id, options).await
    }

    /// Sends `what` as a reply to this update's message.
    pub async fn reply(&self, what: impl Sendable) -> Result<Message> {
        self.reply_with(what, SendOptions::new()).await
    }

    pub async fn reply_with(&self, what: impl Sendable, options: SendOptions) -> Result<Message> {
        let message = self.message().ok_or(Error::BadContext)?;
        let options = options.reply_to(message.id);
        what.send_to(&self.inner.bot, message.chat.id, options).await
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("update_id", &self.inner.update.id)
            .field("kind", &self.inner.update.kind.name())
            .finish()
    }
}
