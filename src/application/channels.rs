//! # Channel Selection
//!
//! Decides which voice channels a troll mode trigger plays in.
//! Only occupied channels are ever selected.

use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

use crate::domain::types::VoiceChannel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelMode {
    /// Every occupied channel.
    All,
    /// One occupied channel, chosen uniformly.
    Random,
    /// Occupied channels whose name contains the text, ignoring case.
    NameContains(String),
}

impl ChannelMode {
    pub fn parse(mode: &str) -> Self {
        match mode {
            "all" => ChannelMode::All,
            "random" => ChannelMode::Random,
            other => ChannelMode::NameContains(other.to_string()),
        }
    }

    pub fn resolve<R: Rng + ?Sized>(
        &self,
        channels: &[VoiceChannel],
        rng: &mut R,
    ) -> Vec<VoiceChannel> {
        let occupied = channels.iter().filter(|c| c.is_occupied());
        match self {
            ChannelMode::All => occupied.cloned().collect(),
            ChannelMode::Random => occupied
                .collect::<Vec<_>>()
                .choose(rng)
                .map(|c| vec![(*c).clone()])
                .unwrap_or_default(),
            ChannelMode::NameContains(filter) => {
                let filter = filter.to_lowercase();
                occupied
                    .filter(|c| c.name.to_lowercase().contains(&filter))
                    .cloned()
                    .collect()
            }
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelMode::All => write!(f, "all"),
            ChannelMode::Random => write!(f, "random"),
            ChannelMode::NameContains(filter) => write!(f, "{filter}"),
        }
    }
}

/// Resolves `mode` over `channels` with the thread-local RNG.
pub fn resolve_channels(mode: &ChannelMode, channels: &[VoiceChannel]) -> Vec<VoiceChannel> {
    mode.resolve(channels, &mut rand::thread_rng())
}
