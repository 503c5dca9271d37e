//! # Troll Commands
//!
//! Handles `trollOn` and `trollOff`. Both require admin rights.

use crate::application::troll::{TrollConfig, TrollScheduler};
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;
use anyhow::Result;
use tokio::sync::Mutex;

pub async fn handle_troll_on(
    config: &AppConfig,
    troll: &Mutex<TrollScheduler>,
    chat: &impl ChatProvider,
    sender: &str,
    args: Option<&str>,
) -> Result<()> {
    if !config.is_admin(sender) {
        let _ = chat.send_notification(messages::AUTH_DENIED).await;
        return Ok(());
    }

    let troll_config = match TrollConfig::parse_args(args.unwrap_or_default()) {
        Ok(c) => c,
        Err(e) => {
            let _ = chat
                .send_notification(&messages::troll_invalid(&e.to_string()))
                .await;
            return Ok(());
        }
    };

    let notice = messages::troll_on(
        troll_config.min_minutes(),
        troll_config.max_minutes(),
        troll_config.hit_probability(),
        &troll_config.mode().to_string(),
    );
    let mut scheduler = troll.lock().await;
    if let Some(previous) = scheduler.config() {
        tracing::info!(
            "Replacing troll schedule {}-{} min in {}",
            previous.min_minutes(),
            previous.max_minutes(),
            previous.mode()
        );
    }
    scheduler.start(troll_config).await;
    drop(scheduler);
    let _ = chat.send_notification(&notice).await;
    Ok(())
}

pub async fn handle_troll_off(
    config: &AppConfig,
    troll: &Mutex<TrollScheduler>,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    if !config.is_admin(sender) {
        let _ = chat.send_notification(messages::AUTH_DENIED).await;
        return Ok(());
    }

    troll.lock().await.stop();
    let _ = chat.send_notification(messages::TROLL_OFF).await;
    Ok(())
}
