//! The boundary to the remote messaging platform.

use std::time::Duration;

use async_trait::async_trait;

use crate::chat::User;
use crate::error::ApiResult;
use crate::message::Message;
use crate::options::{InputDocument, SendOptions};
use crate::update::Update;

/// The authenticated platform client the gateway polls and sends through.
///
/// The gateway depends only on these shapes; the wire format and HTTP
/// plumbing live behind the implementation (see `courier-api`). Tests
/// substitute in-memory transports.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Identifies the authenticated bot account.
    async fn get_me(&self) -> ApiResult<User>;

    /// Fetches updates with ids at or above `offset`, long-polling for up
    /// to `timeout` when none are immediately available.
    async fn get_updates(
        &self,
        offset: i64,
        limit: usize,
        timeout: Duration,
    ) -> ApiResult<Vec<Update>>;

    /// Sends a text message to `chat_id`.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> ApiResult<Message>;

    /// Uploads a document to `chat_id`.
    async fn send_document(
        &self,
        chat_id: i64,
        document: &InputDocument,
        options: &SendOptions,
    ) -> ApiResult<Message>;
}
