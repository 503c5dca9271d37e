//! # Application Layer
//!
//! Contains the core logic and orchestration of the bot.
//! This includes command parsing and routing, the sound submission workflow and troll mode.

pub mod channels;
pub mod parsing;
pub mod router;
pub mod submission;
pub mod troll;
pub mod utils;

#[cfg(test)]
pub mod testing;
