//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (Chat, Voice Playback, Sound Catalog).
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use super::types::{MediaRef, Sound, SoundSubmission, VoiceChannel};

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a notification (not tracked)
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;

    /// Download the content of an attachment, decrypted when needed.
    async fn fetch_media(&self, media: &MediaRef) -> Result<Vec<u8>, String>;
}

/// Abstract interface for the service that joins voice channels and plays audio.
#[async_trait]
pub trait VoicePlayback: Send + Sync {
    /// Whether a playback is in progress. New playback commands are refused while busy.
    async fn is_busy(&self) -> bool;

    /// Play `sound` in every channel of `channels`. Fire-and-forget.
    async fn play_sound_in_channels(
        &self,
        sound: &Sound,
        channels: &[VoiceChannel],
    ) -> Result<(), String>;

    /// All known voice channels with their occupant counts.
    async fn voice_channels(&self) -> Result<Vec<VoiceChannel>, String>;

    /// The voice channel `user_id` is currently connected to, if any.
    async fn member_channel(&self, user_id: &str) -> Result<Option<VoiceChannel>, String>;

    async fn play_sound(&self, sound: &Sound, channel: &VoiceChannel) -> Result<(), String> {
        self.play_sound_in_channels(sound, std::slice::from_ref(channel))
            .await
    }

    /// Looks a channel up by ID or (case-insensitive) display name.
    async fn channel_by_identifier(&self, identifier: &str) -> Result<Option<VoiceChannel>, String> {
        let identifier = identifier.trim();
        Ok(self.voice_channels().await?.into_iter().find(|c| {
            c.id == identifier || c.name.to_lowercase() == identifier.to_lowercase()
        }))
    }
}

/// Abstract interface for sound storage and lookup.
#[async_trait]
pub trait SoundCatalog: Send + Sync {
    /// Find a sound by a search word.
    async fn get_by_name(&self, name: &str) -> Option<Sound>;

    /// A uniformly random sound, or `None` when the catalog is empty.
    async fn get_random(&self) -> Option<Sound>;

    async fn list_all(&self) -> Vec<Sound>;

    /// Exact filename lookup.
    async fn get_by_filename(&self, filename: &str) -> Option<Sound>;

    /// Store a new sound with its audio content. An `Err` means the sound was not added.
    async fn commit_new(&self, submission: &SoundSubmission, audio: &[u8]) -> Result<Sound, String>;

    /// Re-read the catalog from its backing store, returning the number of sounds.
    async fn reload(&self) -> Result<usize, String>;
}
