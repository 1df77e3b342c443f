//! Reply markup and button descriptors for outgoing messages.

use serde::Serialize;

use crate::address;

/// An inline keyboard attached to an outgoing message.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplyMarkup {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

impl ReplyMarkup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of buttons.
    pub fn row(mut self, buttons: Vec<InlineButton>) -> Self {
        self.inline_keyboard.push(buttons);
        self
    }

    /// Rewrites every button that carries a unique token so its callback
    /// data holds the encoded callback address. Buttons without a unique
    /// token pass through unmodified.
    ///
    /// The gateway applies this to every outgoing markup; the router
    /// performs the inverse when the press comes back in.
    pub fn encode_callbacks(&mut self) {
        for row in &mut self.inline_keyboard {
            for button in row {
                if !button.unique.is_empty() {
                    button.callback_data = address::encode(&button.unique, &button.callback_data);
                }
            }
        }
    }
}

/// A button of an inline keyboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InlineButton {
    pub text: String,
    /// Routing identity; never serialized, it travels encoded inside
    /// `callback_data` instead.
    #[serde(skip)]
    pub unique: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub callback_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineButton {
    pub fn new(unique: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            unique: unique.into(),
            ..Self::default()
        }
    }

    /// Sets the payload carried back when the button is pressed.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.callback_data = data.into();
        self
    }

    /// A plain URL button with no routing identity.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// A button of a custom reply keyboard; pressing it sends its literal text.
#[derive(Debug, Clone, Default)]
pub struct ReplyButton {
    pub text: String,
}

/// A universal button descriptor: with a unique token it behaves as an
/// inline callback button, without one as a reply-keyboard button.
#[derive(Debug, Clone, Default)]
pub struct Btn {
    pub text: String,
    pub unique: String,
}
