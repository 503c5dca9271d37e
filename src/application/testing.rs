//! In-memory collaborators for router and scheduler tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::domain::traits::{ChatProvider, SoundCatalog, VoicePlayback};
use crate::domain::types::{MediaRef, Sound, SoundSubmission, VoiceChannel};

pub fn channel(id: &str, name: &str, occupants: usize) -> VoiceChannel {
    VoiceChannel {
        id: id.to_string(),
        name: name.to_string(),
        occupants,
    }
}

pub fn sound(filename: &str) -> Sound {
    Sound {
        filename: filename.to_string(),
        text: format!("{filename} text"),
        tags: "test".to_string(),
    }
}

#[derive(Default)]
pub struct MockChat {
    room: String,
    sent: Mutex<Vec<String>>,
    stall_media: AtomicBool,
    fetched: Mutex<Vec<MediaRef>>,
}

impl MockChat {
    pub fn new(room: &str) -> Self {
        Self {
            room: room.to_string(),
            ..Default::default()
        }
    }

    /// Media downloads never complete.
    pub fn stall_media(&self) {
        self.stall_media.store(true, Ordering::SeqCst);
    }

    pub fn fetched(&self) -> Vec<MediaRef> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(content.to_string());
        Ok(format!("$event{}", sent.len()))
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        self.send_message(content).await.map(|_| ())
    }

    fn room_id(&self) -> String {
        self.room.clone()
    }

    async fn fetch_media(&self, media: &MediaRef) -> Result<Vec<u8>, String> {
        self.fetched.lock().unwrap().push(media.clone());
        if self.stall_media.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(b"OggS".to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedPlay {
    pub sound: Sound,
    pub channels: Vec<VoiceChannel>,
    pub at: Instant,
}

#[derive(Default)]
pub struct MockPlayback {
    busy: AtomicBool,
    channels: Vec<VoiceChannel>,
    members: HashMap<String, String>,
    plays: Mutex<Vec<RecordedPlay>>,
    played: Notify,
}

impl MockPlayback {
    pub fn with_channels(channels: Vec<VoiceChannel>) -> Self {
        Self {
            channels,
            ..Default::default()
        }
    }

    /// Places `user` in the channel with `channel_id`.
    pub fn with_member(mut self, user: &str, channel_id: &str) -> Self {
        self.members.insert(user.to_string(), channel_id.to_string());
        self
    }

    pub fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
    }

    pub fn plays(&self) -> Vec<RecordedPlay> {
        self.plays.lock().unwrap().clone()
    }

    pub fn play_count(&self) -> usize {
        self.plays.lock().unwrap().len()
    }

    pub async fn wait_for_plays(&self, count: usize) {
        while self.play_count() < count {
            self.played.notified().await;
        }
    }
}

#[async_trait]
impl VoicePlayback for MockPlayback {
    async fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    async fn play_sound_in_channels(
        &self,
        sound: &Sound,
        channels: &[VoiceChannel],
    ) -> Result<(), String> {
        self.plays.lock().unwrap().push(RecordedPlay {
            sound: sound.clone(),
            channels: channels.to_vec(),
            at: Instant::now(),
        });
        self.played.notify_one();
        Ok(())
    }

    async fn voice_channels(&self) -> Result<Vec<VoiceChannel>, String> {
        Ok(self.channels.clone())
    }

    async fn member_channel(&self, user_id: &str) -> Result<Option<VoiceChannel>, String> {
        Ok(self
            .members
            .get(user_id)
            .and_then(|id| self.channels.iter().find(|c| &c.id == id))
            .cloned())
    }
}

#[derive(Default)]
pub struct MockCatalog {
    sounds: Mutex<Vec<Sound>>,
    fail_commits: AtomicBool,
    commits: Mutex<Vec<SoundSubmission>>,
    reloads: Mutex<usize>,
}

impl MockCatalog {
    pub fn with_sounds(sounds: Vec<Sound>) -> Self {
        Self {
            sounds: Mutex::new(sounds),
            ..Default::default()
        }
    }

    pub fn fail_commits(&self) {
        self.fail_commits.store(true, Ordering::SeqCst);
    }

    pub fn commits(&self) -> Vec<SoundSubmission> {
        self.commits.lock().unwrap().clone()
    }

    pub fn reloads(&self) -> usize {
        *self.reloads.lock().unwrap()
    }
}

#[async_trait]
impl SoundCatalog for MockCatalog {
    async fn get_by_name(&self, name: &str) -> Option<Sound> {
        let name = name.to_lowercase();
        self.sounds
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.filename.to_lowercase().contains(&name))
            .cloned()
    }

    async fn get_random(&self) -> Option<Sound> {
        self.sounds.lock().unwrap().first().cloned()
    }

    async fn list_all(&self) -> Vec<Sound> {
        self.sounds.lock().unwrap().clone()
    }

    async fn get_by_filename(&self, filename: &str) -> Option<Sound> {
        self.sounds
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.filename == filename)
            .cloned()
    }

    async fn commit_new(&self, submission: &SoundSubmission, _audio: &[u8]) -> Result<Sound, String> {
        self.commits.lock().unwrap().push(submission.clone());
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err("storage unavailable".to_string());
        }
        let sound = Sound {
            filename: submission.audio.file_name.clone(),
            text: submission.description.clone(),
            tags: submission.tags.clone(),
        };
        self.sounds.lock().unwrap().push(sound.clone());
        Ok(sound)
    }

    async fn reload(&self) -> Result<usize, String> {
        *self.reloads.lock().unwrap() += 1;
        Ok(self.sounds.lock().unwrap().len())
    }
}
