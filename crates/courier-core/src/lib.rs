//! # Courier Core
//!
//! Data model and contracts for the courier bot gateway.
//!
//! This crate holds everything the gateway and its transport client share:
//!
//! - the inbound event model ([`Update`], [`Message`], [`Callback`], ...)
//! - the endpoint key namespace and registration type ([`endpoint`],
//!   [`Endpoint`])
//! - the callback address codec ([`address`])
//! - outgoing markup and send options ([`ReplyMarkup`], [`SendOptions`])
//! - the [`Transport`] boundary to the platform
//! - the error types ([`Error`], [`ApiError`])
//!
//! The gateway itself lives in the `courier` crate; the HTTP client in
//! `courier-api`.

pub mod address;
pub mod chat;
pub mod endpoint;
pub mod error;
pub mod markup;
pub mod message;
pub mod options;
pub mod query;
pub mod transport;
pub mod update;

pub use chat::{Chat, Recipient, User};
pub use endpoint::Endpoint;
pub use error::{ApiError, ApiResult, Error, Result};
pub use markup::{Btn, InlineButton, ReplyButton, ReplyMarkup};
pub use message::{MediaKind, Message};
pub use options::{InputDocument, ParseMode, SendOptions};
pub use query::{Callback, PreCheckoutQuery, ShippingQuery};
pub use transport::Transport;
pub use update::{Update, UpdateKind};
