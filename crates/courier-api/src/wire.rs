//! Wire-format shapes for the Bot API.
//!
//! The platform wraps every response in an `ok`/`result` envelope and
//! delivers updates as an object with one populated event field. These
//! types mirror that layout and convert into the crate-internal model.

use serde::{Deserialize, Serialize};

use courier_core::message::Message;
use courier_core::query::{Callback, PreCheckoutQuery, ShippingQuery};
use courier_core::{ApiError, ApiResult, ReplyMarkup, Update, UpdateKind};

// ============================================================================
// Response envelope
// ============================================================================

/// The standard Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the envelope into the carried result or a platform error.
    pub fn into_result(self) -> ApiResult<T> {
        if self.ok {
            self.result
                .ok_or_else(|| ApiError::Decode("missing result in ok response".into()))
        } else {
            Err(ApiError::Telegram {
                code: self.error_code.unwrap_or(0),
                description: self
                    .description
                    .unwrap_or_else(|| "unknown error".into()),
            })
        }
    }
}

// ============================================================================
// Inbound updates
// ============================================================================

/// An update as it appears on the wire: one event field populated.
#[derive(Debug, Deserialize)]
pub struct UpdateWire {
    pub update_id: i64,
    pub message: Option<Message>,
    pub edited_message: Option<Message>,
    pub channel_post: Option<Message>,
    pub edited_channel_post: Option<Message>,
    pub callback_query: Option<Callback>,
    pub shipping_query: Option<ShippingQuery>,
    pub pre_checkout_query: Option<PreCheckoutQuery>,
}

impl TryFrom<UpdateWire> for Update {
    type Error = ApiError;

    fn try_from(wire: UpdateWire) -> Result<Self, Self::Error> {
        let kind = if let Some(m) = wire.message {
            UpdateKind::Message(m)
        } else if let Some(m) = wire.edited_message {
            UpdateKind::EditedMessage(m)
        } else if let Some(m) = wire.channel_post {
            UpdateKind::ChannelPost(m)
        } else if let Some(m) = wire.edited_channel_post {
            UpdateKind::EditedChannelPost(m)
        } else if let Some(c) = wire.callback_query {
            UpdateKind::CallbackQuery(c)
        } else if let Some(q) = wire.shipping_query {
            UpdateKind::ShippingQuery(q)
        } else if let Some(q) = wire.pre_checkout_query {
            UpdateKind::PreCheckoutQuery(q)
        } else {
            return Err(ApiError::Decode(format!(
                "update {} carries no supported event",
                wire.update_id
            )));
        };
        Ok(Update::new(wire.update_id, kind))
    }
}

// ============================================================================
// Outbound requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: i64,
    pub limit: usize,
    /// Long-poll timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<&'a ReplyMarkup>,
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_unwraps_ok_result() {
        let raw = r#"{"ok":true,"result":{"id":42,"is_bot":true,"first_name":"Courier","username":"CourierBot"}}"#;
        let resp: ApiResponse<courier_core::User> = serde_json::from_str(raw).unwrap();
        let me = resp.into_result().unwrap();
        assert_eq!(me.id, 42);
        assert_eq!(me.username.as_deref(), Some("CourierBot"));
    }

    #[test]
    fn envelope_surfaces_platform_error() {
        let raw = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
        let resp: ApiResponse<courier_core::User> = serde_json::from_str(raw).unwrap();
        match resp.into_result() {
            Err(ApiError::Telegram { code, description }) => {
                assert_eq!(code, 401);
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("expected platform error, got {other:?}"),
        }
    }

    #[test]
    fn update_wire_converts_message() {
        let raw = r#"{
            "update_id": 7,
            "message": {
                "message_id": 1,
                "date": 0,
                "chat": {"id": 10, "type": "private"},
                "from": {"id": 20, "is_bot": false, "first_name": "Ada"},
                "text": "/start"
            }
        }"#;
        let wire: UpdateWire = serde_json::from_str(raw).unwrap();
        let update = Update::try_from(wire).unwrap();
        assert_eq!(update.id, 7);
        match update.kind {
            UpdateKind::Message(m) => assert_eq!(m.text, "/start"),
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn update_wire_converts_callback() {
        let raw = r#"{
            "update_id": 8,
            "callback_query": {
                "id": "cb1",
                "from": {"id": 20, "is_bot": false, "first_name": "Ada"},
                "data": "\fconfirm|yes"
            }
        }"#;
        let wire: UpdateWire = serde_json::from_str(raw).unwrap();
        let update = Update::try_from(wire).unwrap();
        match update.kind {
            UpdateKind::CallbackQuery(c) => {
                assert_eq!(c.id, "cb1");
                assert_eq!(c.data, "\u{C}confirm|yes");
            }
            other => panic!("expected callback, got {other:?}"),
        }
    }

    #[test]
    fn update_wire_rejects_empty_event() {
        let wire: UpdateWire = serde_json::from_str(r#"{"update_id": 9}"#).unwrap();
        assert!(Update::try_from(wire).is_err());
    }

    #[test]
    fn send_message_request_omits_defaults() {
        let req = SendMessageRequest {
            chat_id: 1,
            text: "hi",
            parse_mode: None,
            disable_web_page_preview: false,
            disable_notification: false,
            reply_to_message_id: None,
            reply_markup: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"chat_id": 1, "text": "hi"}));
    }
}
