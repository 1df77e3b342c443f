//! Endpoint keys and the registration-time endpoint type.
//!
//! Framework-provided routes live in a key namespace ordinary chat text can
//! never collide with: every key starts with the `\x07` control character,
//! and the router drops any inbound text that itself starts with it. Encoded
//! callback addresses use a second control character, `\x0C`, shared with
//! [`crate::address`].

use crate::markup::{Btn, InlineButton, ReplyButton};

/// Marks framework-provided endpoint keys.
pub const SENTINEL: char = '\u{7}';

/// Marks encoded callback addresses.
pub const CALLBACK_SENTINEL: char = '\u{C}';

// Message routes.
pub const TEXT: &str = "\u{7}text";
pub const EDITED: &str = "\u{7}edited";
pub const PINNED: &str = "\u{7}pinned";
pub const CHANNEL_POST: &str = "\u{7}channel_post";
pub const EDITED_CHANNEL_POST: &str = "\u{7}edited_channel_post";

// Media routes.
pub const PHOTO: &str = "\u{7}photo";
pub const VOICE: &str = "\u{7}voice";
pub const AUDIO: &str = "\u{7}audio";
pub const ANIMATION: &str = "\u{7}animation";
pub const DOCUMENT: &str = "\u{7}document";
pub const STICKER: &str = "\u{7}sticker";
pub const VIDEO: &str = "\u{7}video";
pub const VIDEO_NOTE: &str = "\u{7}video_note";
/// Fallback when no dedicated media route is registered.
pub const MEDIA: &str = "\u{7}media";

// Attachment routes.
pub const CONTACT: &str = "\u{7}contact";
pub const LOCATION: &str = "\u{7}location";
pub const VENUE: &str = "\u{7}venue";
pub const GAME: &str = "\u{7}game";
pub const INVOICE: &str = "\u{7}invoice";

// Query routes.
/// Fallback for callback queries that carry no registered callback address.
pub const CALLBACK: &str = "\u{7}callback";
pub const SHIPPING: &str = "\u{7}shipping_query";
pub const CHECKOUT: &str = "\u{7}pre_checkout_query";

/// A registration target, resolved to a single string key at registration
/// time.
///
/// Registration accepts either a plain key (a command, an `endpoint::*`
/// constant, or literal message text) or a button identity, which is
/// normalized into the callback-address key space. Anything else is not
/// registrable — the closed set of variants is the whole contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// A plain command or text key.
    Key(String),
    /// A button identity, already normalized to its registry key.
    Button(String),
}

impl Endpoint {
    /// The normalized registry key.
    pub fn into_key(self) -> String {
        match self {
            Self::Key(key) | Self::Button(key) => key,
        }
    }
}

impl From<&str> for Endpoint {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for Endpoint {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&InlineButton> for Endpoint {
    /// A button without a unique token cannot carry a callback address, so
    /// it registers under its literal text like a reply button would.
    fn from(button: &InlineButton) -> Self {
        if button.unique.is_empty() {
            Self::Key(button.text.clone())
        } else {
            Self::Button(format!("{CALLBACK_SENTINEL}{}", button.unique))
        }
    }
}

impl From<&ReplyButton> for Endpoint {
    /// Pressing a reply-keyboard button sends its literal text.
    fn from(button: &ReplyButton) -> Self {
        Self::Key(button.text.clone())
    }
}

impl From<&Btn> for Endpoint {
    fn from(button: &Btn) -> Self {
        if button.unique.is_empty() {
            Self::Key(button.text.clone())
        } else {
            Self::Button(format!("{CALLBACK_SENTINEL}{}", button.unique))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_keys_pass_through() {
        assert_eq!(Endpoint::from("/start").into_key(), "/start");
        assert_eq!(Endpoint::from(TEXT).into_key(), TEXT);
    }

    #[test]
    fn inline_button_normalizes_to_callback_space() {
        let button = InlineButton::new("confirm", "Confirm");
        assert_eq!(Endpoint::from(&button).into_key(), "\u{C}confirm");
    }

    #[test]
    fn inline_button_without_unique_registers_under_text() {
        // A bare callback sentinel can never come back from the decoder.
        let button = InlineButton::url("Docs", "https://example.com");
        assert_eq!(Endpoint::from(&button).into_key(), "Docs");
    }

    #[test]
    fn btn_without_unique_registers_under_text() {
        let btn = Btn {
            text: "Help".into(),
            unique: String::new(),
        };
        assert_eq!(Endpoint::from(&btn).into_key(), "Help");

        let btn = Btn {
            text: "Buy".into(),
            unique: "buy".into(),
        };
        assert_eq!(Endpoint::from(&btn).into_key(), "\u{C}buy");
    }
}
