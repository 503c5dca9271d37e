//! # Domain Types
//!
//! Common data structures shared by the router, the submission workflow and the troll scheduler.

use matrix_sdk::ruma::OwnedMxcUri;
use matrix_sdk::ruma::events::room::MediaSource;
use serde::{Deserialize, Serialize};

/// Media uploaded to the homeserver, possibly end-to-end encrypted.
/// Two references are equal when they point at the same upload.
#[derive(Debug, Clone)]
pub struct MediaRef(pub MediaSource);

impl MediaRef {
    pub fn uri(&self) -> &OwnedMxcUri {
        match &self.0 {
            MediaSource::Plain(uri) => uri,
            MediaSource::Encrypted(file) => &file.url,
        }
    }
}

impl PartialEq for MediaRef {
    fn eq(&self, other: &Self) -> bool {
        self.uri() == other.uri()
    }
}

impl Eq for MediaRef {}

/// A file attached to an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub media: MediaRef,
}

/// A chat message as seen by the router, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender: String,
    pub room_id: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
impl InboundMessage {
    pub fn text(sender: &str, room_id: &str, body: &str) -> Self {
        Self {
            sender: sender.to_string(),
            room_id: room_id.to_string(),
            body: body.to_string(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, file_name: &str, mxc: &str) -> Self {
        self.attachments.push(Attachment {
            file_name: file_name.to_string(),
            media: MediaRef(MediaSource::Plain(mxc.into())),
        });
        self
    }
}

/// A sound known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sound {
    pub filename: String,
    pub text: String,
    pub tags: String,
}

/// A voice channel and how many members are currently in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChannel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub occupants: usize,
}

impl VoiceChannel {
    pub fn is_occupied(&self) -> bool {
        self.occupants > 0
    }
}

/// Audio collected by the first step of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRef {
    pub media: MediaRef,
    pub file_name: String,
}

/// Everything the catalog needs to store a new sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSubmission {
    pub audio: AudioRef,
    pub description: String,
    pub tags: String,
}
