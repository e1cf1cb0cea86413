// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use snaptranslate::app_config::{self, Config};
use snaptranslate::languages::{self, SUPPORTED_LANGUAGES};
use snaptranslate::{Controller, TranslationOutcome};

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
    /// Extract the text of a capture and translate it
    Translate {
        /// Captured image (its transcript is read from the matching .txt file)
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Target language, by name ("Turkish") or code ("tr")
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Extract the text of a capture without translating it
    Extract {
        /// Captured image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },

    /// Download the model for a target language
    Prepare {
        /// Target language, by name or code; defaults to the configured one
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List the supported target languages
    Languages,

    /// Generate shell completions for snaptranslate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// SnapTranslate - translate the text in your photos on the device
#[derive(Parser, Debug)]
#[command(name = "snaptranslate")]
#[command(version)]
#[command(about = "Extract text from a captured photo and translate it on the device")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the configured level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "snaptranslate", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages => {
            for (name, code) in SUPPORTED_LANGUAGES {
                println!("{:<10} {}", name, code);
            }
            Ok(())
        }
        Commands::Extract { image } => {
            let controller = build_controller(&cli.config_path, cli.log_level.is_some())?;
            let detected = controller.extract_text(&image).await;
            println!("{}", detected.text);
            Ok(())
        }
        Commands::Prepare { language } => {
            let controller = build_controller(&cli.config_path, cli.log_level.is_some())?;
            run_prepare(&controller, language.as_deref()).await
        }
        Commands::Translate { image, language } => {
            let controller = build_controller(&cli.config_path, cli.log_level.is_some())?;
            run_translate(&controller, &image, language.as_deref()).await
        }
    }
}

fn build_controller(config_path: &Path, log_level_overridden: bool) -> Result<Controller> {
    let config = Config::load_or_create(config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path.display()))?;

    // Command line level wins over the configured one
    if !log_level_overridden {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Controller::with_config(config)
}

async fn run_prepare(controller: &Controller, language: Option<&str>) -> Result<()> {
    if let Some(language) = language {
        let code = languages::resolve_target_language(language)?;
        controller.sessions().set_target_language(&code);
    }

    controller.sessions().ensure_model_ready().await?;

    if let Some(info) = controller.sessions().session_info() {
        info!("Model {}-{} is ready", info.source_language, info.target_language);
    }
    Ok(())
}

async fn run_translate(
    controller: &Controller,
    image: &Path,
    language: Option<&str>,
) -> Result<()> {
    controller.warm_up().await;

    let report = controller.run(image, language).await?;

    println!("{}", report.detected.text);

    match report.outcome {
        Some(TranslationOutcome::Translated(text)) => {
            println!();
            println!("[{}] {}", report.target_language, text);
            Ok(())
        }
        Some(TranslationOutcome::Failed(e)) => {
            error!("{}", e);
            Err(anyhow!(e.user_message()))
        }
        None => Ok(()),
    }
}
