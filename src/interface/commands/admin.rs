//! # Admin Command
//!
//! Handles the `refresh` command.
//! Allows authorized admins to reload the sound catalog from disk.

use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, SoundCatalog};
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_refresh(
    config: &AppConfig,
    catalog: &dyn SoundCatalog,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    // Check Permissions
    if !config.is_admin(sender) {
        let _ = chat.send_notification(messages::AUTH_DENIED).await;
        return Ok(());
    }

    match catalog.reload().await {
        Ok(count) => {
            tracing::info!("Catalog reloaded by {}: {} sounds", sender, count);
            let _ = chat.send_notification(&messages::sounds_reloaded(count)).await;
        }
        Err(e) => {
            tracing::warn!("Catalog reload failed: {}", e);
            let _ = chat.send_notification(&messages::reload_failed(&e)).await;
        }
    }

    Ok(())
}
