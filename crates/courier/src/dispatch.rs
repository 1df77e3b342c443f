//! Update classification and routing.
//!
//! One inbound update resolves to at most one endpoint key, walked in a
//! fixed precedence order. Classification consults the registry so that
//! fallback routes (exact text, `endpoint::TEXT`, `endpoint::MEDIA`,
//! `endpoint::CALLBACK`) only fire when the more specific route has no
//! handler. An update that resolves to no registered endpoint is dropped
//! silently.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use courier_core::endpoint::{self, CALLBACK_SENTINEL};
use courier_core::{Update, UpdateKind, address};

use crate::bot::Bot;
use crate::context::Context;
use crate::registry::BoxedHandler;

/// `/command@BotName payload` — group 1 the command, group 3 the bot name,
/// group 5 the payload.
static COMMAND_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(/\w+)(@(\w+))?(\s|$)(.+)?").expect("command pattern")
});

impl Bot {
    /// Routes one update and runs its handler, if any.
    pub async fn process_update(&self, mut update: Update) {
        let Some(key) = self.route(&mut update) else {
            if self.is_verbose() {
                debug!(
                    update_id = update.id,
                    kind = update.kind.name(),
                    "no route for update"
                );
            }
            return;
        };
        let Some(handler) = self.lookup(&key) else {
            if self.is_verbose() {
                debug!(
                    update_id = update.id,
                    kind = update.kind.name(),
                    "no handler for route"
                );
            }
            return;
        };
        debug!(
            update_id = update.id,
            kind = update.kind.name(),
            "dispatching update"
        );
        let ctx = Context::new(self.clone(), update);
        self.run_handler(handler, ctx).await;
    }

    /// Resolves the update to its endpoint key and fills in the payload.
    fn route(&self, update: &mut Update) -> Option<String> {
        let (key, payload) = self.classify(&mut update.kind)?;
        if let Some(payload) = payload {
            update.payload = payload;
        }
        Some(key)
    }

    /// The precedence walk. Mutates callback queries in place: a decoded
    /// callback address replaces the raw data with its payload.
    fn classify(&self, kind: &mut UpdateKind) -> Option<(String, Option<String>)> {
        match kind {
            UpdateKind::Message(m) => {
                // Pin events outrank everything the message also carries.
                if m.pinned_message.is_some() {
                    return Some((endpoint::PINNED.into(), None));
                }

                if !m.text.is_empty() {
                    // Inbound text can never address a framework route.
                    if m.text.starts_with(endpoint::SENTINEL) {
                        return None;
                    }
                    let mut payload = None;
                    if let Some(caps) = COMMAND_RX.captures(&m.text) {
                        // A command addressed to another bot is not ours.
                        if let Some(bot_name) = caps.get(3) {
                            let me = self.me().username.as_deref().unwrap_or("");
                            if !bot_name.as_str().eq_ignore_ascii_case(me) {
                                return None;
                            }
                        }
                        let command = &caps[1];
                        payload =
                            Some(caps.get(5).map_or(String::new(), |p| p.as_str().to_owned()));
                        if self.registry().contains(command) {
                            return Some((command.to_owned(), payload));
                        }
                    }
                    if self.registry().contains(&m.text) {
                        return Some((m.text.clone(), payload));
                    }
                    // The text branch always terminates, registered or not.
                    return Some((endpoint::TEXT.into(), payload));
                }

                if let Some(media) = m.media_kind() {
                    if self.registry().contains(media.endpoint()) {
                        return Some((media.endpoint().into(), None));
                    }
                    if self.registry().contains(endpoint::MEDIA) {
                        return Some((endpoint::MEDIA.into(), None));
                    }
                    // Unhandled media falls through to the attachment walk.
                }

                if m.contact.is_some() {
                    return Some((endpoint::CONTACT.into(), None));
                }
                if m.location.is_some() {
                    return Some((endpoint::LOCATION.into(), None));
                }
                if m.venue.is_some() {
                    return Some((endpoint::VENUE.into(), None));
                }
                if m.game.is_some() {
                    return Some((endpoint::GAME.into(), None));
                }
                if m.invoice.is_some() {
                    return Some((endpoint::INVOICE.into(), None));
                }
                None
            }

            UpdateKind::EditedMessage(_) => Some((endpoint::EDITED.into(), None)),

            UpdateKind::ChannelPost(m) => {
                if m.pinned_message.is_some() {
                    Some((endpoint::PINNED.into(), None))
                } else {
                    Some((endpoint::CHANNEL_POST.into(), None))
                }
            }

            UpdateKind::EditedChannelPost(_) => {
                Some((endpoint::EDITED_CHANNEL_POST.into(), None))
            }

            UpdateKind::CallbackQuery(c) => {
                if let Some((unique, data)) = address::decode(&c.data) {
                    let key = format!("{CALLBACK_SENTINEL}{unique}");
                    if self.registry().contains(&key) {
                        c.unique = unique;
                        c.data = data;
                        return Some((key, None));
                    }
                }
                // Unaddressed (or unregistered) presses keep their raw data.
                Some((endpoint::CALLBACK.into(), None))
            }

            UpdateKind::ShippingQuery(_) => Some((endpoint::SHIPPING.into(), None)),

            UpdateKind::PreCheckoutQuery(_) => Some((endpoint::CHECKOUT.into(), None)),
        }
    }

    /// Runs a handler, feeding any failure to the sink. Synchronous
    /// gateways run it inline on the dispatch loop; otherwise it gets its
    /// own task and dispatch moves on.
    pub(crate) async fn run_handler(&self, handler: BoxedHandler, ctx: Context) {
        let sink = self.on_error_sink().clone();
        let fut = async move {
            if let Err(err) = handler(ctx.clone()).await {
                sink(&err, Some(&ctx));
            }
        };
        if self.is_synchronous() {
            fut.await;
        } else {
            tokio::spawn(fut);
        }
    }
}

// ============================================================================
// Unit tests
// ============================================================================
