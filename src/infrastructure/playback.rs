//! # Voice Gateway Client
//!
//! Implements `VoicePlayback` against an HTTP voice gateway that owns the voice connections.
//!
//! Endpoints (JSON):
//! - `GET  /status`                 -> `{ "busy": bool }`
//! - `GET  /channels`               -> `[{ "id", "name", "occupants" }]`
//! - `GET  /members/{user}/channel` -> channel, or 404 when not connected
//! - `POST /play`                   <- `{ "sound": {...}, "channels": ["id", ...] }`

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::config::PlaybackConfig;
use crate::domain::traits::VoicePlayback;
use crate::domain::types::{Sound, VoiceChannel};

#[derive(Debug, Deserialize)]
struct StatusResponse {
    busy: bool,
}

#[derive(Debug, Serialize)]
struct PlayRequest<'a> {
    sound: &'a Sound,
    channels: Vec<&'a str>,
}

#[derive(Clone)]
pub struct HttpPlayback {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpPlayback {
    pub fn new(config: &PlaybackConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn status(&self) -> Result<StatusResponse, reqwest::Error> {
        self.http
            .get(self.url("/status"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl VoicePlayback for HttpPlayback {
    async fn is_busy(&self) -> bool {
        match self.status().await {
            Ok(status) => status.busy,
            Err(e) => {
                tracing::warn!("Voice gateway status failed, treating as busy: {}", e);
                true
            }
        }
    }

    async fn play_sound_in_channels(
        &self,
        sound: &Sound,
        channels: &[VoiceChannel],
    ) -> Result<(), String> {
        let request = PlayRequest {
            sound,
            channels: channels.iter().map(|c| c.id.as_str()).collect(),
        };
        self.http
            .post(self.url("/play"))
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn voice_channels(&self) -> Result<Vec<VoiceChannel>, String> {
        let response = self
            .http
            .get(self.url("/channels"))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?;
        response.json().await.map_err(|e| e.to_string())
    }

    async fn member_channel(&self, user_id: &str) -> Result<Option<VoiceChannel>, String> {
        let path = format!("/members/{}/channel", urlencoding::encode(user_id));
        let response = self
            .http
            .get(self.url(&path))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status().map_err(|e| e.to_string())?;
        response.json().await.map(Some).map_err(|e| e.to_string())
    }
}
