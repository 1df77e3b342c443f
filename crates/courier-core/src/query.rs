//! Inbound query events: button callbacks, shipping and pre-checkout.

use serde::Deserialize;

use crate::chat::User;
use crate::message::Message;

/// A button-press callback query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Callback {
    pub id: String,
    #[serde(default)]
    pub from: User,
    /// The message the pressed button was attached to, if still available.
    #[serde(default)]
    pub message: Option<Box<Message>>,
    /// Raw callback data. When the data carries a callback address the
    /// router rewrites this to the decoded payload before the handler runs.
    #[serde(default)]
    pub data: String,
    /// The unique token of the pressed button. Empty until the router
    /// decodes a callback address; plain callbacks never set it.
    #[serde(skip)]
    pub unique: String,
}

/// A shipping query raised during a payment flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingQuery {
    pub id: String,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub invoice_payload: String,
}

/// The final confirmation query before a payment is charged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: String,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_amount: i64,
    #[serde(default)]
    pub invoice_payload: String,
}
