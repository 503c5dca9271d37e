//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, VoicePlayback, SoundCatalog).

pub mod catalog;
pub mod matrix;
pub mod playback;
