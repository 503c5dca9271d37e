#![recursion_limit = "256"]

//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration, Types and collaborator Traits
//! - Infrastructure: Matrix, Voice Gateway, Sound Catalog
//! - Application: Router, Submission Workflow, Troll Mode
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::traits::SoundCatalog;
use crate::domain::types::InboundMessage;
use crate::infrastructure::catalog::FileCatalog;
use crate::infrastructure::matrix::{MatrixService, to_inbound};
use crate::infrastructure::playback::HttpPlayback;

#[derive(Parser)]
#[command(name = "soundbot", version, about = "Chat controlled soundboard for voice channels")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Connect to Matrix and serve commands (default)
    Run,
    /// Print the sound catalog
    List,
    /// Play a sound in a voice channel without connecting to chat
    Play {
        /// Catalog filename, e.g. `airhorn.ogg`
        filename: String,
        /// Voice channel ID or name
        channel: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    let _guard = init_logging()?;
    tracing::info!("Starting Soundbot...");

    // 3. Initialize Infrastructure
    let catalog = Arc::new(FileCatalog::open(
        &config.catalog.index,
        &config.catalog.sounds_dir,
    )?);
    let playback = Arc::new(HttpPlayback::new(&config.services.playback)?);

    // 4. Initialize Application Components
    let router = Arc::new(CommandRouter::new(
        config.clone(),
        playback.clone(),
        catalog.clone(),
    )?);

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_bot(config, router).await,
        Command::List => {
            for sound in catalog.list_all().await {
                println!("{}\n\tText: {}\n\tTags: {}", sound.filename, sound.text, sound.tags);
            }
            Ok(())
        }
        Command::Play { filename, channel } => {
            if router.play_sound_in_channel(&filename, &channel).await {
                Ok(())
            } else {
                anyhow::bail!("Could not play {} in {}", filename, channel)
            }
        }
    }
}

fn init_logging() -> Result<WorkerGuard> {
    // Ensure data directory exists
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = std::path::Path::new("data/session.log");
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn")
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}

async fn run_bot(config: AppConfig, router: Arc<CommandRouter>) -> Result<()> {
    // 5. Matrix Setup
    let matrix = &config.services.matrix;
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await?;

    let mut login = client
        .matrix_auth()
        .login_username(&matrix.username, &matrix.password);
    if let Some(name) = &matrix.display_name {
        login = login.initial_device_display_name(name);
    }
    login.send().await?;

    tracing::info!("Logged in as {}", matrix.username);

    // 6. Event Loop
    // Messages are routed one at a time, in arrival order, by a single task.
    let (tx, mut rx) = mpsc::unbounded_channel::<(Room, InboundMessage)>();

    let dispatch_router = router.clone();
    let dispatcher = tokio::spawn(async move {
        while let Some((room, message)) = rx.recv().await {
            let chat = MatrixService::new(room);
            if let Err(e) = dispatch_router.route(&chat, &message).await {
                tracing::error!("Failed to route message: {}", e);
            }
        }
    });

    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let tx = tx.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            if original_msg.sender == room.own_user_id() {
                return;
            }

            let Some(message) = to_inbound(original_msg, room.room_id().as_str()) else {
                return;
            };
            tracing::info!("Received message from {}: \n{}", message.sender, message.body);

            if tx.send((room, message)).is_err() {
                tracing::warn!("Dispatcher stopped, dropping message");
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            let _ = room.join().await;
        }
    });

    // 7. Start Loops
    let sync_client = client.clone();
    let sync_handle = tokio::spawn(async move {
        sync_client.sync(SyncSettings::default()).await
    });

    tokio::select! {
        res = sync_handle => {
            match res {
                Ok(Err(e)) => tracing::error!("Matrix Sync Error: {}", e),
                Err(e) => tracing::error!("Matrix Sync Panic: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
    }

    router.shutdown().await;
    dispatcher.abort();
    Ok(())
}
