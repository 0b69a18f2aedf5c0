//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod logging;

use std::error::Error;

use clap::{ArgAction, Parser, Subcommand};
use tracing::warn;

use crate::auth::AuthManager;
use crate::core::config::data::{Config, CONFIG_KEYS};
use crate::core::persistence::{FileStore, PersistenceAdapter};
use crate::ui::chat_loop::{run_chat, ChatOptions};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "lucent", version, long_version = LONG_VERSION)]
#[command(about = "A terminal chat companion with a mood-reactive avatar")]
#[command(
    long_about = "Lucent is a full-screen terminal chat companion. An avatar reacts to the \
mood of the conversation while replies come from the Gemini generateContent API.\n\n\
Authentication:\n\
  Use 'lucent auth' to store your API key in the system keyring.\n\n\
Environment Variables (fallback if no key is stored):\n\
  GEMINI_API_KEY    Your Gemini API key\n\
  RUST_LOG          Log filter for lucent.log in the data directory\n\n\
Controls:\n\
  Enter             Send the message (Alt+Enter for a new line)\n\
  Alt+1..Alt+4      Use a starter prompt\n\
  Ctrl+L            Load the previous session\n\
  Ctrl+P / click    Pet the avatar\n\
  Alt+Up/Alt+Down   Select an assistant reply\n\
  Ctrl+Y            Copy the selected reply\n\
  PageUp/PageDown   Scroll the transcript\n\
  Ctrl+C / Esc      Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for this session instead of the configured one
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Read the API key from GEMINI_API_KEY only, skipping the keyring
    #[arg(long = "env", global = true)]
    pub env_only: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Store the API key in the system keyring
    Auth,
    /// Remove the stored API key
    Deauth,
    /// Set configuration values, or print them when no value is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Delete the remembered name and saved conversation
    Forget,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = logging::default_log_path() {
        if let Err(err) = logging::init_file_logging(&path, args.verbose) {
            eprintln!("⚠️  Logging disabled: {err}");
        }
    }

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let model = args
                .model
                .unwrap_or_else(|| config.model().to_string());
            let api_key = AuthManager::new().resolve_api_key(args.env_only);
            if api_key.is_none() {
                warn!("no API key available; replies will fall back");
                eprintln!("⚠️  No API key found. Run 'lucent auth' or set GEMINI_API_KEY.");
            }
            run_chat(ChatOptions {
                config,
                model,
                api_key,
            })
            .await
        }
        Commands::Auth => {
            if let Err(e) = AuthManager::new().interactive_auth() {
                eprintln!("❌ Authentication failed: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Deauth => {
            if let Err(e) = AuthManager::new().interactive_deauth() {
                eprintln!("❌ Deauthentication failed: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match key {
                Some(key) if !value.is_empty() => {
                    let joined = value.join(" ");
                    if !config.set_value(&key, joined.clone()) {
                        unknown_key(&key);
                    }
                    config.save()?;
                    println!("✅ Set {key} to: {joined}");
                }
                _ => config.print_all(),
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            if !config.unset_value(&key) {
                unknown_key(&key);
            }
            config.save()?;
            println!("✅ Unset {key}");
            Ok(())
        }
        Commands::Forget => {
            let store = FileStore::open_default().ok_or("Failed to determine data directory")?;
            PersistenceAdapter::new(store).clear()?;
            println!("✅ Forgot your name and saved conversation");
            Ok(())
        }
    }
}

fn unknown_key(key: &str) -> ! {
    eprintln!("❌ Unknown config key: {key}");
    eprintln!("Known keys: {}", CONFIG_KEYS.join(", "));
    std::process::exit(1);
}
