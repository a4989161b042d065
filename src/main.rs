// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, ProofreadingProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod proofreading;
mod providers;

/// CLI Wrapper for ProofreadingProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProofreadingProvider {
    Anthropic,
    Ollama,
}

impl From<CliProofreadingProvider> for ProofreadingProvider {
    fn from(cli_provider: CliProofreadingProvider) -> Self {
        match cli_provider {
            CliProofreadingProvider::Anthropic => ProofreadingProvider::Anthropic,
            CliProofreadingProvider::Ollama => ProofreadingProvider::Ollama,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Proofread a text file using AI providers (default command)
    #[command(alias = "proofread")]
    Proofread(ProofreadArgs),

    /// Generate shell completions for akaire
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProofreadArgs {
    /// Input text file to proofread (reads stdin when omitted)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Proofreading provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProofreadingProvider>,

    /// Model name to use for proofreading
    #[arg(short, long)]
    model: Option<String>,

    /// Replacement dictionary JSON file
    #[arg(short, long)]
    dictionary: Option<String>,

    /// Use the fast-path prompt without the detailed guidance
    #[arg(long)]
    simple_prompt: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Only test the connection to the provider, then exit
    #[arg(long)]
    test_connection: bool,
}

/// akaire - markup-safe AI proofreading for Japanese copy
///
/// Proofreads Japanese text containing embedded HTML using AI providers.
/// Markup is protected before the model sees the text and restored with
/// in-tag corrections applied afterwards.
#[derive(Parser, Debug)]
#[command(name = "akaire")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered Japanese proofreading tool")]
#[command(long_about = "akaire proofreads Japanese text with embedded HTML using AI providers.

EXAMPLES:
    akaire article.txt                        # Proofread using default config
    akaire -f article.txt                     # Force overwrite existing outputs
    akaire -p ollama -m llama3.2:3b article.txt
    akaire -d dictionary.json article.txt     # Apply a replacement dictionary
    cat article.txt | akaire                  # Read from stdin, write to stdout
    akaire --log-level debug article.txt      # Verbose pipeline logging
    akaire completions bash > akaire.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.

SUPPORTED PROVIDERS:
    anthropic - Anthropic Claude API (requires API key)
    ollama    - Local Ollama server (default: llama3.2:3b)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file to proofread (reads stdin when omitted)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Proofreading provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProofreadingProvider>,

    /// Model name to use for proofreading
    #[arg(short, long)]
    model: Option<String>,

    /// Replacement dictionary JSON file
    #[arg(short, long)]
    dictionary: Option<String>,

    /// Use the fast-path prompt without the detailed guidance
    #[arg(long)]
    simple_prompt: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Only test the connection to the provider, then exit
    #[arg(long)]
    test_connection: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "akaire", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Proofread(args)) => run_proofread(args).await,
        None => {
            // Default behavior - use top-level args
            let proofread_args = ProofreadArgs {
                input_path: cli.input_path,
                force_overwrite: cli.force_overwrite,
                provider: cli.provider,
                model: cli.model,
                dictionary: cli.dictionary,
                simple_prompt: cli.simple_prompt,
                config_path: cli.config_path,
                log_level: cli.log_level,
                test_connection: cli.test_connection,
            };
            run_proofread(proofread_args).await
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

async fn run_proofread(options: ProofreadArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(provider) = &options.provider {
            config.proofreading.provider = provider.clone().into();
        }

        if let Some(model) = &options.model {
            let provider_config = config.proofreading.get_provider_config_mut()?;
            provider_config.model = model.clone();
        }

        if let Some(dictionary) = &options.dictionary {
            config.proofreading.dictionary_path = Some(dictionary.clone());
        }

        if options.simple_prompt {
            config.proofreading.use_simple_prompt = true;
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(provider) = &options.provider {
            config.proofreading.provider = provider.clone().into();
        }

        if let Some(model) = &options.model {
            let provider_config = config.proofreading.get_provider_config_mut()?;
            provider_config.model = model.clone();
        }

        if let Some(dictionary) = &options.dictionary {
            config.proofreading.dictionary_path = Some(dictionary.clone());
        }

        if options.simple_prompt {
            config.proofreading.use_simple_prompt = true;
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    if options.test_connection {
        controller.test_connection().await?;
        println!("Connection OK");
        return Ok(());
    }

    match &options.input_path {
        Some(input_path) => {
            if !input_path.is_file() {
                return Err(anyhow!("Input path is not a file: {:?}", input_path));
            }
            controller.run(input_path, options.force_overwrite).await?;
        }
        None => {
            controller.run_stdin().await?;
        }
    }

    Ok(())
}
