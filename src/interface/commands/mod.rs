//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., play, list, trollOn).
//! These handlers are invoked by the Router.

pub mod add;
pub mod admin;
pub mod help;
pub mod list;
pub mod play;
pub mod troll;
