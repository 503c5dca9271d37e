//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! A running sound submission takes precedence over command parsing for the user and room it
//! is bound to. Everything else must carry the configured prefix (e.g., `?play`).
//!
//! The router owns the single submission session and the single troll job. Callers must
//! route messages one at a time, in arrival order.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::parsing::CommandParser;
use crate::application::submission::SubmissionWorkflow;
use crate::application::troll::TrollScheduler;
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, SoundCatalog, VoicePlayback};
use crate::domain::types::InboundMessage;
use crate::interface::commands;
use crate::strings::messages;

pub struct CommandRouter {
    config: AppConfig,
    parser: CommandParser,
    playback: Arc<dyn VoicePlayback>,
    catalog: Arc<dyn SoundCatalog>,
    submission: Mutex<SubmissionWorkflow>,
    troll: Mutex<TrollScheduler>,
}

impl CommandRouter {
    pub fn new(
        config: AppConfig,
        playback: Arc<dyn VoicePlayback>,
        catalog: Arc<dyn SoundCatalog>,
    ) -> Result<Self> {
        let parser = CommandParser::new(config.bot.prefix())?;
        let troll = TrollScheduler::new(playback.clone(), catalog.clone());
        Ok(Self {
            config,
            parser,
            playback,
            catalog,
            submission: Mutex::new(SubmissionWorkflow::new()),
            troll: Mutex::new(troll),
        })
    }

    pub async fn route<C>(&self, chat: &C, message: &InboundMessage) -> Result<()>
    where
        C: ChatProvider,
    {
        // 1. Active submission bound to this sender and room
        if commands::add::handle_step(&self.submission, &*self.catalog, chat, message).await? {
            return Ok(());
        }

        if !self.parser.is_command(&message.body) {
            return Ok(());
        }

        if self.playback.is_busy().await {
            let _ = chat.send_notification(messages::BUSY).await;
            return Ok(());
        }

        let Some(command) = self.parser.parse(&message.body) else {
            return Ok(());
        };
        let args = command.args_trimmed();
        let sender = message.sender.as_str();

        tracing::info!(
            "Router dispatching cmd='{}' args='{}' sender='{}'",
            command.name,
            args.unwrap_or_default(),
            sender
        );

        match command.name.as_str() {
            "help" | "h" => commands::help::handle_help(&self.config, chat, sender).await?,
            "play" | "p" => {
                commands::play::handle_play(&*self.catalog, &*self.playback, chat, sender, args)
                    .await?
            }
            "playchannel" | "pc" => {
                commands::play::handle_play_channel(
                    &self.config,
                    &*self.catalog,
                    &*self.playback,
                    chat,
                    sender,
                    args,
                )
                .await?
            }
            "trollOn" => {
                commands::troll::handle_troll_on(&self.config, &self.troll, chat, sender, args)
                    .await?
            }
            "trollOff" => {
                commands::troll::handle_troll_off(&self.config, &self.troll, chat, sender).await?
            }
            "refresh" => {
                commands::admin::handle_refresh(&self.config, &*self.catalog, chat, sender).await?
            }
            "add" => {
                commands::add::handle_add(&self.config, &self.submission, chat, message).await?
            }
            "list" | "l" => {
                commands::list::handle_list(&self.config, &*self.catalog, chat, sender).await?
            }
            _ => commands::help::handle_help(&self.config, chat, sender).await?,
        }

        Ok(())
    }

    /// Plays a catalog sound in a voice channel without a chat context.
    pub async fn play_sound_in_channel(&self, filename: &str, channel_id: &str) -> bool {
        commands::play::play_file_in_channel(&*self.catalog, &*self.playback, filename, channel_id)
            .await
    }

    /// Stops troll mode, if running.
    pub async fn shutdown(&self) {
        self.troll.lock().await.stop();
    }
}
