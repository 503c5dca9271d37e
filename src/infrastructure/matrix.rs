//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! Also converts Matrix room messages into the transport-independent `InboundMessage`
//! consumed by the router.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{Attachment, InboundMessage, MediaRef};
use async_trait::async_trait;
use matrix_sdk::media::{MediaFormat, MediaRequestParameters};
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::room::MediaSource;
use matrix_sdk::ruma::events::room::message::{
    MessageType, OriginalSyncRoomMessageEvent, RoomMessageEventContent,
};

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        // Notifications are also markdown messages for now
        self.send_message(content).await.map(|_| ())
    }

    async fn fetch_media(&self, media: &MediaRef) -> Result<Vec<u8>, String> {
        let request = MediaRequestParameters {
            source: media.0.clone(),
            format: MediaFormat::File,
        };
        self.room
            .client()
            .media()
            .get_media_content(&request, false)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Converts a room message into an `InboundMessage`. Returns `None` for message types the bot
/// does not handle (notices, emotes, images, ...).
pub fn to_inbound(event: &OriginalSyncRoomMessageEvent, room_id: &str) -> Option<InboundMessage> {
    let (body, attachments) = match &event.content.msgtype {
        MessageType::Text(text) => (text.body.clone(), Vec::new()),
        MessageType::Audio(audio) => {
            attachment_message(&audio.body, audio.filename.as_deref(), &audio.source)
        }
        MessageType::File(file) => {
            attachment_message(&file.body, file.filename.as_deref(), &file.source)
        }
        _ => return None,
    };

    Some(InboundMessage {
        sender: event.sender.to_string(),
        room_id: room_id.to_string(),
        body,
        attachments,
    })
}

fn attachment_message(
    body: &str,
    filename: Option<&str>,
    source: &MediaSource,
) -> (String, Vec<Attachment>) {
    let (file_name, caption) = split_caption(body, filename);
    let attachment = Attachment {
        file_name,
        media: MediaRef(source.clone()),
    };
    (caption, vec![attachment])
}

/// When `filename` is set and differs from `body`, the body is a caption.
fn split_caption(body: &str, filename: Option<&str>) -> (String, String) {
    match filename {
        Some(name) if name != body => (name.to_string(), body.to_string()),
        Some(name) => (name.to_string(), String::new()),
        None => (body.to_string(), String::new()),
    }
}
