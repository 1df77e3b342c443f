//! The inbound message model.
//!
//! `Message` keeps the platform's optional-field shape: at most one media
//! payload and at most one attachment is populated per message.
//! [`Message::media_kind`] projects the optional media fields onto the closed
//! set of kinds the router knows how to route.

use serde::Deserialize;

use crate::chat::{Chat, User};
use crate::endpoint;

/// One message in a chat or channel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: i64,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    /// Message text; empty for media-only messages.
    #[serde(default)]
    pub text: String,
    /// Caption of a media message, if any.
    #[serde(default)]
    pub caption: String,
    /// For service messages: the message that was pinned.
    #[serde(default)]
    pub pinned_message: Option<Box<Message>>,

    // Media payloads — at most one is set.
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default)]
    pub voice: Option<Voice>,
    #[serde(default)]
    pub audio: Option<Audio>,
    #[serde(default)]
    pub animation: Option<Animation>,
    #[serde(default)]
    pub document: Option<Document>,
    #[serde(default)]
    pub sticker: Option<Sticker>,
    #[serde(default)]
    pub video: Option<Video>,
    #[serde(default)]
    pub video_note: Option<VideoNote>,

    // Attachments — at most one is set.
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub game: Option<Game>,
    #[serde(default)]
    pub invoice: Option<Invoice>,
}

impl Message {
    /// The caption when present, else the text.
    pub fn text_or_caption(&self) -> &str {
        if !self.caption.is_empty() {
            &self.caption
        } else {
            &self.text
        }
    }

    /// The media payload carried by this message, if any.
    pub fn media_kind(&self) -> Option<MediaKind> {
        if self.photo.is_some() {
            Some(MediaKind::Photo)
        } else if self.voice.is_some() {
            Some(MediaKind::Voice)
        } else if self.audio.is_some() {
            Some(MediaKind::Audio)
        } else if self.animation.is_some() {
            Some(MediaKind::Animation)
        } else if self.document.is_some() {
            Some(MediaKind::Document)
        } else if self.sticker.is_some() {
            Some(MediaKind::Sticker)
        } else if self.video.is_some() {
            Some(MediaKind::Video)
        } else if self.video_note.is_some() {
            Some(MediaKind::VideoNote)
        } else {
            None
        }
    }
}

/// The closed set of media payloads the router dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Voice,
    Audio,
    Animation,
    Document,
    Sticker,
    Video,
    VideoNote,
}

impl MediaKind {
    /// The dedicated endpoint key for this media kind.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Photo => endpoint::PHOTO,
            Self::Voice => endpoint::VOICE,
            Self::Audio => endpoint::AUDIO,
            Self::Animation => endpoint::ANIMATION,
            Self::Document => endpoint::DOCUMENT,
            Self::Sticker => endpoint::STICKER,
            Self::Video => endpoint::VIDEO,
            Self::VideoNote => endpoint::VIDEO_NOTE,
        }
    }
}

/// One resolution of a photo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Voice {
    pub file_id: String,
    #[serde(default)]
    pub duration: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Audio {
    pub file_id: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Animation {
    pub file_id: String,
}

/// A general file, as opposed to photos and audio.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sticker {
    pub file_id: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    pub file_id: String,
    #[serde(default)]
    pub duration: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoNote {
    pub file_id: String,
    #[serde(default)]
    pub duration: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_amount: i64,
    #[serde(default)]
    pub start_parameter: String,
}
