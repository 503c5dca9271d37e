//! # Troll Mode
//!
//! Autonomously plays random sounds at random intervals.
//!
//! Each job runs as one background task: sleep, run a cycle, draw the next delay,
//! repeat. The job's [`CancellationToken`] is checked at the top of every cycle, so a
//! timer that already fired when `stop()` was called still does nothing.

use chrono::Local;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::application::channels::{ChannelMode, resolve_channels};
use crate::domain::traits::{SoundCatalog, VoicePlayback};

#[derive(Debug, Error, PartialEq)]
pub enum TrollArgsError {
    #[error("Expected 4 comma separated values, got {0}.")]
    WrongArity(usize),
    #[error("`{0}` is not a whole number of minutes.")]
    InvalidMinutes(String),
    #[error("`{0}` is not a probability.")]
    InvalidProbability(String),
    #[error("Minimum minutes ({min}) is greater than maximum minutes ({max}).")]
    InvertedRange { min: u64, max: u64 },
    #[error("Maximum minutes must be at least 1.")]
    ZeroInterval,
    #[error("Probability {0} is outside 0..1.")]
    ProbabilityOutOfRange(f64),
    #[error("Channel mode must not be empty.")]
    EmptyMode,
}

/// Validated troll mode parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TrollConfig {
    min_minutes: u64,
    max_minutes: u64,
    hit_probability: f64,
    mode: ChannelMode,
}

impl TrollConfig {
    pub fn new(
        min_minutes: u64,
        max_minutes: u64,
        hit_probability: f64,
        mode: ChannelMode,
    ) -> Result<Self, TrollArgsError> {
        if min_minutes > max_minutes {
            return Err(TrollArgsError::InvertedRange {
                min: min_minutes,
                max: max_minutes,
            });
        }
        if max_minutes == 0 {
            return Err(TrollArgsError::ZeroInterval);
        }
        if !(0.0..=1.0).contains(&hit_probability) {
            return Err(TrollArgsError::ProbabilityOutOfRange(hit_probability));
        }
        if matches!(&mode, ChannelMode::NameContains(filter) if filter.is_empty()) {
            return Err(TrollArgsError::EmptyMode);
        }
        Ok(Self {
            min_minutes,
            max_minutes,
            hit_probability,
            mode,
        })
    }

    /// Parses `minMinutes,maxMinutes,hitProbability,channelMode`.
    pub fn parse_args(args: &str) -> Result<Self, TrollArgsError> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let [min, max, probability, mode] = parts.as_slice() else {
            return Err(TrollArgsError::WrongArity(parts.len()));
        };
        let minutes = |raw: &str| {
            raw.parse::<u64>()
                .map_err(|_| TrollArgsError::InvalidMinutes(raw.to_string()))
        };
        let probability = probability
            .parse::<f64>()
            .map_err(|_| TrollArgsError::InvalidProbability(probability.to_string()))?;
        Self::new(
            minutes(*min)?,
            minutes(*max)?,
            probability,
            ChannelMode::parse(*mode),
        )
    }

    pub fn min_minutes(&self) -> u64 {
        self.min_minutes
    }

    pub fn max_minutes(&self) -> u64 {
        self.max_minutes
    }

    pub fn hit_probability(&self) -> f64 {
        self.hit_probability
    }

    pub fn mode(&self) -> &ChannelMode {
        &self.mode
    }

    fn draw_delay(&self) -> u64 {
        rand::thread_rng().gen_range(self.min_minutes..=self.max_minutes)
    }
}

struct TrollJob {
    config: TrollConfig,
    cancel: CancellationToken,
    timer: JoinHandle<()>,
}

pub struct TrollScheduler {
    playback: Arc<dyn VoicePlayback>,
    catalog: Arc<dyn SoundCatalog>,
    job: Option<TrollJob>,
}

impl TrollScheduler {
    pub fn new(playback: Arc<dyn VoicePlayback>, catalog: Arc<dyn SoundCatalog>) -> Self {
        Self {
            playback,
            catalog,
            job: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.job.is_some()
    }

    pub fn config(&self) -> Option<&TrollConfig> {
        self.job.as_ref().map(|job| &job.config)
    }

    /// Starts troll mode, replacing any running job. The first cycle runs before this returns.
    pub async fn start(&mut self, config: TrollConfig) {
        self.stop();
        tracing::info!(
            "Troll mode: On: {}, {}, {}, {}",
            config.min_minutes,
            config.max_minutes,
            config.hit_probability,
            config.mode
        );

        let cancel = CancellationToken::new();
        let Some(first_delay) =
            run_cycle(&config, &cancel, &*self.playback, &*self.catalog).await
        else {
            return;
        };

        let timer = tokio::spawn(run_job(
            config.clone(),
            cancel.clone(),
            self.playback.clone(),
            self.catalog.clone(),
            first_delay,
        ));
        self.job = Some(TrollJob {
            config,
            cancel,
            timer,
        });
    }

    /// Stops troll mode. Returns whether a job was running; calling it while idle is a no-op.
    pub fn stop(&mut self) -> bool {
        let Some(job) = self.job.take() else {
            return false;
        };
        job.cancel.cancel();
        job.timer.abort();
        tracing::info!("Troll mode: Off");
        true
    }
}

impl Drop for TrollScheduler {
    fn drop(&mut self) {
        if let Some(job) = self.job.take() {
            job.cancel.cancel();
            job.timer.abort();
        }
    }
}

async fn run_job(
    config: TrollConfig,
    cancel: CancellationToken,
    playback: Arc<dyn VoicePlayback>,
    catalog: Arc<dyn SoundCatalog>,
    mut delay: Duration,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(delay) => {}
        }
        match run_cycle(&config, &cancel, &*playback, &*catalog).await {
            Some(next) => delay = next,
            None => return,
        }
    }
}

/// One scheduling cycle. Returns the delay until the next one, or `None` once cancelled.
async fn run_cycle(
    config: &TrollConfig,
    cancel: &CancellationToken,
    playback: &dyn VoicePlayback,
    catalog: &dyn SoundCatalog,
) -> Option<Duration> {
    if cancel.is_cancelled() {
        return None;
    }

    let roll: f64 = rand::random();
    if roll <= config.hit_probability {
        play_random(config, playback, catalog).await;
    }

    let minutes = config.draw_delay();
    let next = i64::try_from(minutes)
        .ok()
        .and_then(chrono::Duration::try_minutes)
        .and_then(|d| Local::now().checked_add_signed(d));
    match next {
        Some(next) => tracing::info!("Troll mode: Next play: {}", next.format("%Y-%m-%d %H:%M:%S")),
        None => tracing::info!("Troll mode: Next play in {} minutes", minutes),
    }
    Some(Duration::from_secs(minutes.saturating_mul(60)))
}

async fn play_random(config: &TrollConfig, playback: &dyn VoicePlayback, catalog: &dyn SoundCatalog) {
    let Some(sound) = catalog.get_random().await else {
        tracing::warn!("Troll mode: catalog is empty, nothing to play");
        return;
    };
    let channels = match playback.voice_channels().await {
        Ok(channels) => channels,
        Err(e) => {
            tracing::warn!("Troll mode: failed to list voice channels: {}", e);
            return;
        }
    };
    let targets = resolve_channels(&config.mode, &channels);
    if targets.is_empty() {
        tracing::debug!("Troll mode: no occupied channel matches `{}`", config.mode);
        return;
    }

    tracing::info!(
        "Troll mode: Playing {} in {} channel(s)",
        sound.filename,
        targets.len()
    );
    if let Err(e) = playback.play_sound_in_channels(&sound, &targets).await {
        tracing::warn!("Troll mode: playback failed: {}", e);
    }
}
