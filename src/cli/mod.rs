//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod model_list;
pub mod say;
pub mod theme;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::api::backend::HttpBackend;
use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::cli::theme::run_theme;
use crate::core::config::Config;
use crate::core::conversation::ConversationStore;
use crate::core::params::GenerationParams;
use crate::core::session::ChatSession;
use crate::core::storage::{FileStore, MemoryStore, SharedStore};
use crate::core::theme::UiState;
use crate::ui::repl::run_chat;
use crate::ui::theme::colors_enabled;
use crate::utils::logging::init_tracing;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    " ",
    env!("VERGEN_GIT_SHA"),
    ")"
);

#[derive(Parser)]
#[command(name = "codeface")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Chat with a local language model server from the terminal")]
#[command(
    long_about = "CodeFace talks to an OpenAI-compatible model server (LM Studio and friends) \
running on your machine. Conversations are saved locally and restored on the next start.\n\n\
Configuration:\n\
  codeface set base-url http://localhost:1234   Point at another server\n\
  codeface set default-model <id>               Skip picking a model each time\n\n\
Environment Variables:\n\
  CODEFACE_LOG      Log filter (e.g. debug, codeface=trace); defaults to warn\n\
  CODEFACE_COLOR    always or never, to override terminal color detection\n\n\
Commands inside the chat:\n\
  /help             List every command\n\
  /new, /list       Start or list conversations\n\
  /quit             Leave"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model server address (default http://localhost:1234)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Model to chat with; defaults to the first model the server lists
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature, 0 to 2
    #[arg(short = 't', long, global = true)]
    pub temperature: Option<f32>,

    /// Reply length limit, 50 to 4000 tokens
    #[arg(long, global = true, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// System prompt sent ahead of every conversation
    #[arg(short = 's', long, global = true, value_name = "PROMPT")]
    pub system: Option<String>,

    /// Keep conversations in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum Commands {
    /// Start the interactive chat (default)
    Chat,
    /// List the chat models the server offers
    Models,
    /// Send one message in a new conversation and print the reply
    Say {
        /// Message text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Show or change the saved theme
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Print the current configuration
    Config,
    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        value: Vec<String>,
    },
    /// Remove a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

/// Connection and generation settings after layering flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub base_url: String,
    pub model: Option<String>,
    pub params: GenerationParams,
}

impl SessionSettings {
    pub fn resolve(args: &Args, config: &Config) -> Self {
        let mut params = config.generation_params();
        if let Some(temperature) = args.temperature {
            params.set_temperature(temperature);
        }
        if let Some(max_tokens) = args.max_tokens {
            params.set_max_tokens(max_tokens);
        }
        if let Some(system) = &args.system {
            params.set_system_prompt(system.clone());
        }

        Self {
            base_url: args
                .base_url
                .clone()
                .unwrap_or_else(|| config.base_url().to_string()),
            model: args.model.clone().or_else(|| config.default_model.clone()),
            params,
        }
    }
}

/// The store conversations and preferences are read from and written to.
pub fn open_store(args: &Args, config: &Config) -> Result<SharedStore, Box<dyn Error>> {
    if args.ephemeral {
        return Ok(MemoryStore::shared());
    }
    let dir = config
        .data_dir
        .clone()
        .or_else(FileStore::default_dir)
        .ok_or("Could not determine a data directory; set one with `codeface set data-dir <path>`")?;
    debug!(dir = %dir.display(), "using file store");
    Ok(Arc::new(FileStore::new(dir)))
}

pub fn build_session(settings: SessionSettings, store: SharedStore) -> ChatSession {
    ChatSession::new(
        Arc::new(HttpBackend::new(&settings.base_url)),
        ConversationStore::load(store.clone()),
        UiState::load(store),
        settings.params,
    )
    .with_model(settings.model)
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let command = args.command.clone().unwrap_or(Commands::Chat);

    match command {
        Commands::Config => {
            let config = Config::load()?;
            println!("Config file: {}", Config::get_config_path()?.display());
            config.print_all();
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let value = value.join(" ");
            config.set_value(&key, &value)?;
            config.save()?;
            println!("✅ Set {key} to: {value}");
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            config.unset_value(&key)?;
            config.save()?;
            println!("✅ Unset {key}");
            Ok(())
        }
        Commands::Theme { action } => {
            let config = Config::load()?;
            let store = open_store(&args, &config)?;
            run_theme(UiState::load(store), action);
            Ok(())
        }
        Commands::Models => {
            let config = Config::load()?;
            let settings = SessionSettings::resolve(&args, &config);
            list_models(&HttpBackend::new(&settings.base_url), settings.model.as_deref()).await
        }
        Commands::Say { prompt } => {
            let config = Config::load()?;
            let store = open_store(&args, &config)?;
            let mut session = build_session(SessionSettings::resolve(&args, &config), store);
            run_say(&mut session, &prompt.join(" ")).await
        }
        Commands::Chat => {
            let config = Config::load()?;
            let store = open_store(&args, &config)?;
            let mut session = build_session(SessionSettings::resolve(&args, &config), store);
            run_chat(&mut session, colors_enabled()).await?;
            Ok(())
        }
    }
}
