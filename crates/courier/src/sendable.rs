//! The `Sendable` seam: anything `Context::send` and `Bot::send` accept.

use async_trait::async_trait;

use courier_core::{InputDocument, Message, Result, SendOptions};

use crate::bot::Bot;

/// An outgoing payload that knows which API method delivers it.
#[async_trait]
pub trait Sendable: Send + Sync {
    async fn send_to(&self, bot: &Bot, chat_id: i64, options: SendOptions) -> Result<Message>;
}

#[async_trait]
impl Sendable for &str {
    async fn send_to(&self, bot: &Bot, chat_id: i64, options: SendOptions) -> Result<Message> {
        bot.deliver_text(chat_id, self, options).await
    }
}

#[async_trait]
impl Sendable for String {
    async fn send_to(&self, bot: &Bot, chat_id: i64, options: SendOptions) -> Result<Message> {
        bot.deliver_text(chat_id, self, options).await
    }
}

#[async_trait]
impl Sendable for InputDocument {
    async fn send_to(&self, bot: &Bot, chat_id: i64, options: SendOptions) -> Result<Message> {
        bot.deliver_document(chat_id, self, options).await
    }
}
