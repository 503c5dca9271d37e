//! # Add Sound Command
//!
//! Handles the `add` command and every follow-up message of a running submission.
//! The submission itself is tracked by [`SubmissionWorkflow`].

use crate::application::submission::{BeginError, StepOutcome, SubmissionWorkflow};
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, SoundCatalog};
use crate::domain::types::{InboundMessage, Sound, SoundSubmission};
use crate::strings::messages;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;

/// Longest time a submitted attachment may take to download before the import fails.
pub const MEDIA_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn handle_add(
    config: &AppConfig,
    submission: &Mutex<SubmissionWorkflow>,
    chat: &impl ChatProvider,
    message: &InboundMessage,
) -> Result<()> {
    if !config.is_admin(&message.sender) {
        let _ = chat.send_notification(messages::AUTH_DENIED).await;
        return Ok(());
    }

    let reply = match submission
        .lock()
        .await
        .begin(&message.sender, &message.room_id)
    {
        Ok(prompt) => prompt,
        Err(BeginError::AlreadyActive) => messages::SUBMISSION_IN_PROGRESS,
    };
    let _ = chat.send_message(reply).await;
    Ok(())
}

/// Feeds `message` to the running submission.
/// Returns `false` when the message does not belong to it and should be routed normally.
pub async fn handle_step(
    submission: &Mutex<SubmissionWorkflow>,
    catalog: &dyn SoundCatalog,
    chat: &impl ChatProvider,
    message: &InboundMessage,
) -> Result<bool> {
    let outcome = {
        let mut workflow = submission.lock().await;
        if !workflow.accepts(message) {
            return Ok(false);
        }
        workflow.advance(message)
    };

    match outcome {
        StepOutcome::Ignored => return Ok(false),
        StepOutcome::Prompt(text) | StepOutcome::Abandoned(text) => {
            let _ = chat.send_message(text).await;
        }
        StepOutcome::Complete(new_sound) => {
            let reply = match import(catalog, chat, &new_sound).await {
                Ok(sound) => {
                    tracing::info!("Sound {} imported by {}", sound.filename, message.sender);
                    messages::SUBMISSION_DONE
                }
                Err(e) => {
                    tracing::warn!("Sound import of {} failed: {}", new_sound.audio.file_name, e);
                    messages::SUBMISSION_FAILED
                }
            };
            let _ = chat.send_message(reply).await;
        }
    }
    Ok(true)
}

async fn import(
    catalog: &dyn SoundCatalog,
    chat: &impl ChatProvider,
    submission: &SoundSubmission,
) -> Result<Sound, String> {
    let audio = tokio::time::timeout(MEDIA_FETCH_TIMEOUT, chat.fetch_media(&submission.audio.media))
        .await
        .map_err(|_| format!("download timed out after {}s", MEDIA_FETCH_TIMEOUT.as_secs()))??;
    catalog.commit_new(submission, &audio).await
}
