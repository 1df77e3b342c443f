//! Per-send delivery options and outgoing file payloads.

use serde::{Deserialize, Serialize};

use crate::markup::ReplyMarkup;

/// Determines how client applications render outgoing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// No formatting directives.
    #[default]
    Default,
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

impl ParseMode {
    /// The wire value, or `None` for the default mode (field omitted).
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Markdown => Some("Markdown"),
            Self::MarkdownV2 => Some("MarkdownV2"),
            Self::Html => Some("HTML"),
        }
    }
}

/// Controls how an outgoing message is delivered.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Id of the message this one replies to.
    pub reply_to: Option<i64>,
    /// Inline keyboard attached to the message.
    pub reply_markup: Option<ReplyMarkup>,
    /// Disables link previews for text messages.
    pub disable_web_page_preview: bool,
    /// Delivers without a notification sound.
    pub disable_notification: bool,
    /// Overrides the gateway's default parse mode.
    pub parse_mode: ParseMode,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn markup(mut self, markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }

    pub fn no_preview(mut self) -> Self {
        self.disable_web_page_preview = true;
        self
    }

    pub fn silent(mut self) -> Self {
        self.disable_notification = true;
        self
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }
}

/// An outgoing file, uploaded by content.
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub caption: String,
}

impl InputDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            caption: String::new(),
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}
