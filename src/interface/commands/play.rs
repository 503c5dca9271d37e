//! # Play Commands
//!
//! Handles `play` (caller's voice channel) and `playchannel` (named voice channel).

use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, SoundCatalog, VoicePlayback};
use crate::domain::types::{Sound, VoiceChannel};
use crate::strings::messages;
use anyhow::Result;

/// Named sound when a word is given, otherwise a random one.
async fn find_sound(catalog: &dyn SoundCatalog, name: Option<&str>) -> Option<Sound> {
    match name {
        Some(name) => catalog.get_by_name(name).await,
        None => catalog.get_random().await,
    }
}

async fn play_in(
    catalog: &dyn SoundCatalog,
    playback: &dyn VoicePlayback,
    chat: &impl ChatProvider,
    channel: &VoiceChannel,
    sound_name: Option<&str>,
) -> Result<()> {
    let Some(sound) = find_sound(catalog, sound_name).await else {
        let _ = chat.send_notification(messages::SOUND_NOT_FOUND).await;
        return Ok(());
    };

    tracing::info!("Playing {} in {}", sound.filename, channel.name);
    if let Err(e) = playback.play_sound(&sound, channel).await {
        tracing::warn!("Playback of {} failed: {}", sound.filename, e);
        let _ = chat.send_notification(messages::PLAYBACK_FAILED).await;
    }
    Ok(())
}

pub async fn handle_play(
    catalog: &dyn SoundCatalog,
    playback: &dyn VoicePlayback,
    chat: &impl ChatProvider,
    sender: &str,
    sound_name: Option<&str>,
) -> Result<()> {
    let channel = match playback.member_channel(sender).await {
        Ok(Some(channel)) => channel,
        Ok(None) => {
            let _ = chat.send_notification(messages::NOT_IN_VOICE).await;
            return Ok(());
        }
        Err(e) => {
            tracing::warn!("Failed to look up voice channel of {}: {}", sender, e);
            let _ = chat.send_notification(messages::PLAYBACK_FAILED).await;
            return Ok(());
        }
    };

    play_in(catalog, playback, chat, &channel, sound_name).await
}

/// `channelName[,soundName]`
pub async fn handle_play_channel(
    config: &AppConfig,
    catalog: &dyn SoundCatalog,
    playback: &dyn VoicePlayback,
    chat: &impl ChatProvider,
    sender: &str,
    args: Option<&str>,
) -> Result<()> {
    let mut params = args.unwrap_or_default().split(',').map(str::trim);
    let channel_name = params.next().filter(|c| !c.is_empty());
    let sound_name = params.next().filter(|s| !s.is_empty());

    let Some(channel_name) = channel_name else {
        return super::help::handle_help(config, chat, sender).await;
    };

    let channel = match playback.channel_by_identifier(channel_name).await {
        Ok(Some(channel)) => channel,
        Ok(None) => {
            let _ = chat.send_notification(messages::CHANNEL_NOT_FOUND).await;
            return Ok(());
        }
        Err(e) => {
            tracing::warn!("Failed to list voice channels: {}", e);
            let _ = chat.send_notification(messages::PLAYBACK_FAILED).await;
            return Ok(());
        }
    };

    play_in(catalog, playback, chat, &channel, sound_name).await
}

/// Plays the sound stored as `filename` in the channel identified by `channel_id`.
/// Returns whether playback was requested.
pub async fn play_file_in_channel(
    catalog: &dyn SoundCatalog,
    playback: &dyn VoicePlayback,
    filename: &str,
    channel_id: &str,
) -> bool {
    if playback.is_busy().await {
        tracing::info!("Can't play sound, bot is busy: {} - {}", filename, channel_id);
        return false;
    }

    let channel = match playback.channel_by_identifier(channel_id).await {
        Ok(channel) => channel,
        Err(e) => {
            tracing::error!("Failed to list voice channels: {}", e);
            None
        }
    };
    let sound = catalog.get_by_filename(filename).await;

    match (sound, channel) {
        (Some(sound), Some(channel)) => match playback.play_sound(&sound, &channel).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error playing sound in channel: {} - {}: {}", filename, channel_id, e);
                false
            }
        },
        _ => {
            tracing::error!("Error playing sound in channel: {} - {}", filename, channel_id);
            false
        }
    }
}
