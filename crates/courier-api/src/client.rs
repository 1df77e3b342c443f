//! The HTTP client behind the [`Transport`] boundary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use courier_core::{
    ApiError, ApiResult, InputDocument, Message, SendOptions, Transport, Update, User,
};

use crate::wire::{ApiResponse, GetUpdatesRequest, SendMessageRequest, UpdateWire};

/// Production endpoint of the Bot API.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Baseline timeout for plain method calls; long polls get their own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack added on top of the long-poll timeout so the HTTP layer never
/// cuts off a poll the server is still allowed to hold open.
const POLL_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

/// An authenticated Bot API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    token: String,
    base: String,
}

impl ApiClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Points the client at a non-default API server, e.g. a local
    /// Bot API instance.
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            token: token.into(),
            base: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base, self.token, method)
    }

    /// Posts a JSON-bodied method call and unwraps the response envelope.
    async fn call<R>(
        &self,
        method: &str,
        body: &impl Serialize,
        timeout: Option<Duration>,
    ) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let mut request = self.http.post(self.method_url(method)).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let envelope: ApiResponse<R> = response
            .json()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        envelope.into_result()
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn get_me(&self) -> ApiResult<User> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    async fn get_updates(
        &self,
        offset: i64,
        limit: usize,
        timeout: Duration,
    ) -> ApiResult<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            limit,
            timeout: timeout.as_secs(),
        };
        let wires: Vec<UpdateWire> = self
            .call("getUpdates", &request, Some(timeout + POLL_TIMEOUT_SLACK))
            .await?;
        // Malformed or unsupported updates are skipped, not fatal: the
        // batch around them still has to reach the gateway.
        let updates = wires
            .into_iter()
            .filter_map(|wire| match Update::try_from(wire) {
                Ok(update) => Some(update),
                Err(err) => {
                    debug!(error = %err, "skipping undecodable update");
                    None
                }
            })
            .collect();
        Ok(updates)
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> ApiResult<Message> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: options.parse_mode.as_str(),
            disable_web_page_preview: options.disable_web_page_preview,
            disable_notification: options.disable_notification,
            reply_to_message_id: options.reply_to,
            reply_markup: options.reply_markup.as_ref(),
        };
        self.call("sendMessage", &request, None).await
    }

    async fn send_document(
        &self,
        chat_id: i64,
        document: &InputDocument,
        options: &SendOptions,
    ) -> ApiResult<Message> {
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part(
                "document",
                Part::bytes(document.bytes.clone()).file_name(document.file_name.clone()),
            );
        if !document.caption.is_empty() {
            form = form.text("caption", document.caption.clone());
        }
        if let Some(mode) = options.parse_mode.as_str() {
            form = form.text("parse_mode", mode);
        }
        if options.disable_notification {
            form = form.text("disable_notification", "true");
        }
        if let Some(reply_to) = options.reply_to {
            form = form.text("reply_to_message_id", reply_to.to_string());
        }
        if let Some(markup) = &options.reply_markup {
            let markup = serde_json::to_string(markup).map_err(ApiError::from)?;
            form = form.text("reply_markup", markup);
        }
        let response = self
            .http
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let envelope: ApiResponse<Message> = response
            .json()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        envelope.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_includes_token() {
        let client = ApiClient::new("123:abc");
        assert_eq!(
            client.method_url("getMe"),
            "https://api.telegram.org/bot123:abc/getMe"
        );
    }

    #[test]
    fn custom_api_url_drops_trailing_slash() {
        let client = ApiClient::with_api_url("123:abc", "http://localhost:8081/");
        assert_eq!(
            client.method_url("getUpdates"),
            "http://localhost:8081/bot123:abc/getUpdates"
        );
    }
}
