//! # Help Command
//!
//! Handles the `help` command (and unknown commands).
//! Admins also see the privileged commands.

use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::strings::help;
use anyhow::Result;

pub async fn handle_help(config: &AppConfig, chat: &impl ChatProvider, sender: &str) -> Result<()> {
    let prefix = config.bot.prefix();
    let mut text = help::general(prefix);
    if config.is_admin(sender) {
        text.push_str(&help::admin(prefix));
    }
    chat.send_message(&text)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
