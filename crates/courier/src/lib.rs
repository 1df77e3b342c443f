//! # Courier
//!
//! An update dispatch engine for Telegram-style bots: register async
//! handlers against endpoints, then let the gateway long-poll for updates,
//! classify each one and route it to the single best-matching handler.
//!
//! ```no_run
//! use courier::{Bot, GatewayConfig, endpoint};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GatewayConfig::load()?;
//!     courier::logging::init(&config.logging);
//!
//!     let bot = Bot::new(config.settings()).await?;
//!     bot.handle("/start", |ctx| async move {
//!         ctx.send("hello!").await?;
//!         Ok(())
//!     });
//!     bot.handle(endpoint::TEXT, |ctx| async move {
//!         ctx.reply(format!("you said: {}", ctx.text())).await?;
//!         Ok(())
//!     });
//!
//!     bot.start().await;
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod logging;
pub mod poller;
pub mod registry;
pub mod sendable;

pub use bot::{Bot, OnError, Settings};
pub use config::{ConfigError, GatewayConfig, LoggingConfig, PollConfig};
pub use context::Context;
pub use poller::LongPoller;
pub use registry::{BoxedHandler, HandlerRegistry};
pub use sendable::Sendable;

pub use courier_api::ApiClient;
pub use courier_core::*;
