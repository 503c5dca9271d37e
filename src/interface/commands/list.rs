//! # List Command
//!
//! Handles the `list` command. The listing is split into as many messages as needed.

use crate::application::utils::{MAX_MESSAGE_LENGTH, chunk_items};
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, SoundCatalog};
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_list(
    config: &AppConfig,
    catalog: &dyn SoundCatalog,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    let sounds = catalog.list_all().await;
    if sounds.is_empty() {
        let _ = chat.send_notification(messages::NO_SOUNDS).await;
        return Ok(());
    }

    let with_filename = config.is_admin(sender);
    let entries: Vec<String> = sounds
        .iter()
        .map(|s| messages::sound_entry(&s.filename, &s.text, &s.tags, with_filename))
        .collect();

    for chunk in chunk_items(&entries, MAX_MESSAGE_LENGTH) {
        chat.send_message(&chunk)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}
