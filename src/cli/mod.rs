//! Command-line launcher.
//!
//! On the device there is no command line; these flags only exist so the
//! desktop build can point at its files and pick an audio player.

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::transport::ReqwestTransport;
use crate::audio::process::ProcessSpeaker;
use crate::audio::AudioDriver;
use crate::core::app::ChatSession;
use crate::core::config::data::path_display;
use crate::core::config::SettingsStore;
use crate::ui::chat_loop::{restore_terminal, run_session, setup_terminal};
use crate::ui::keypad::TerminalKeypad;
use crate::utils::url::is_tls;

const LOG_ENV: &str = "TDECK_LOG";

#[derive(Parser, Debug)]
#[command(name = "tdeck-chat", version)]
#[command(about = "Keypad chat client for an LM Studio compatible server")]
#[command(
    long_about = "Full-screen emulation of the T-Deck chat client. Settings are read from a \
JSON file with at least lm_studio_base_url and api_key; the system prompt comes from a plain \
text file.\n\n\
Controls:\n\
  Type              Enter your message\n\
  Enter             Send the message or command\n\
  Backspace         Delete the last character\n\
  Ctrl+C            Quit\n\n\
Commands:\n\
  /models           List available models\n\
  /load <name>      Load a model and remember it\n\
  /help             Show commands"
)]
pub struct Args {
    /// Settings file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// System prompt file
    #[arg(short, long, default_value = "prompt.txt")]
    pub prompt: PathBuf,

    /// Where diagnostics are written (filter with TDECK_LOG)
    #[arg(long, default_value = "tdeck-chat.log")]
    pub trace_file: PathBuf,

    /// Program used to play synthesized WAV files
    #[arg(long, default_value = "aplay")]
    pub player: String,

    /// Do not attach a speaker
    #[arg(long)]
    pub mute: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

fn init_tracing(trace_file: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(trace_file)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Read and trim the system prompt. A missing file means no prompt.
pub fn load_system_prompt(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.trim().to_string(),
        Err(err) => {
            warn!(path = %path_display(path), error = %err, "No system prompt loaded");
            String::new()
        }
    }
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    init_tracing(&args.trace_file)?;

    let store = SettingsStore::load(&args.config).inspect_err(|err| {
        error!(error = %err, "Cannot start without settings");
        eprintln!("❌ {err}");
    })?;
    let settings = store.settings();
    info!(
        path = %path_display(store.path()),
        tls = is_tls(&settings.lm_studio_base_url),
        "Settings loaded: {}",
        settings.summary()
    );

    let system_prompt = load_system_prompt(&args.prompt);
    info!(chars = system_prompt.chars().count(), "System prompt ready");

    let driver: Option<Box<dyn AudioDriver>> = if args.mute {
        None
    } else {
        Some(Box::new(ProcessSpeaker::new(args.player.clone())))
    };

    let transport = Arc::new(ReqwestTransport::default());
    let mut session = ChatSession::new(store, transport, driver, system_prompt);
    session.start().await;

    let mut display = setup_terminal()?;
    let mut keypad = TerminalKeypad::new();
    let result = run_session(&mut session, &mut keypad, &mut display).await;
    restore_terminal(&mut display)?;
    result?;

    info!("Session ended");
    Ok(())
}
