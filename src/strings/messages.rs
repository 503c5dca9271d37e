//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes error messages, submission prompts and troll mode notices.

pub const AUTH_DENIED: &str = "🚫 **Authorization Denied**.";
pub const BUSY: &str = "Wait and retry later, now I'm busy.";
pub const SOUND_NOT_FOUND: &str = "Sound not found.";
pub const CHANNEL_NOT_FOUND: &str = "Channel not found.";
pub const NOT_IN_VOICE: &str = "You are not connected to a voice channel.";
pub const NO_SOUNDS: &str = "No sounds available yet.";
pub const PLAYBACK_FAILED: &str = "⚠️ Could not reach the voice service.";

// Submission
pub const SUBMISSION_START: &str = "Ok, adding a new sound, send it to this chat:";
pub const SUBMISSION_ASK_TEXT: &str = "Write what is said in the audio:";
pub const SUBMISSION_ASK_TAGS: &str =
    "Write some tags that describe the sound separated by blank space:";
pub const SUBMISSION_TEXT_LENGTH: &str =
    "Text should be at least 5 characters long and not greater than 200, try to write it again:";
pub const SUBMISSION_TAGS_LENGTH: &str =
    "Total tags length should be at least 3 characters long and not greater than 100, try to write it again:";
pub const SUBMISSION_BAD_FILE: &str = "File should be an ogg and name should be composed by letters or/and hyphens.\nSound import process stopped.";
pub const SUBMISSION_ABANDONED: &str = "No sound, no party.\nSound import process stopped.";
pub const SUBMISSION_DONE: &str = "✅ Sound imported successfully.";
pub const SUBMISSION_FAILED: &str = "Oops, a wild ERROR appeared!\nSound import process stopped.";
pub const SUBMISSION_IN_PROGRESS: &str =
    "Another sound import is in progress, wait until it finishes.";

// Troll mode
pub const TROLL_OFF: &str = "😴 Troll mode off.";
pub const TROLL_USAGE: &str = concat!(
    "Usage: `trollOn minMinutes,maxMinutes,hitProbability,channelMode` ",
    "(0 <= minMinutes <= maxMinutes, maxMinutes at least 1, hitProbability between 0 and 1; ",
    "channelMode: `all`, `random` or part of a channel name)"
);

pub fn troll_on(min: u64, max: u64, probability: f64, mode: &str) -> String {
    format!("😈 Troll mode on: every {min}-{max} min, chance {probability}, channels `{mode}`.")
}

pub fn troll_invalid(err: &str) -> String {
    format!("❌ {err}\n{TROLL_USAGE}")
}

pub fn sounds_reloaded(count: usize) -> String {
    format!("🔄 Loaded {count} sounds.")
}

pub fn reload_failed(err: &str) -> String {
    format!("Failed to reload sounds: {err}")
}

/// One entry of the sound listing. Admins also see the filename.
pub fn sound_entry(filename: &str, text: &str, tags: &str, with_filename: bool) -> String {
    if with_filename {
        format!("\n{filename}\n\t Text: {text}\n\t Tags: {tags}")
    } else {
        format!("\n{text}\n\t Tags: {tags}")
    }
}
