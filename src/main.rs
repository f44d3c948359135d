//! flashcards CLI
//!
//! Study topic files in the terminal, or list what is on disk.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use flashcards::config::{AppConfig, LogLevel, default_log_path, load_config};
use flashcards::logging::init_logging;
use flashcards::report::{format_file_list, format_topic_list};
use flashcards::scanner::{scan, topic_file_names};
use flashcards::store::TopicStore;
use flashcards::tui;
use flashcards::types::{OutputFormat, ScanConfig};

#[derive(Parser)]
#[command(name = "flashcards")]
#[command(about = "Study prompt/answer flashcards grouped into topics")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/flashcards/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log verbosity (RUST_LOG takes precedence)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive study screen (default)
    Study {
        /// Topic file to load at startup (default: from config)
        path: Option<PathBuf>,

        /// Directory of topic files offered in the file chooser
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Keep prompts in file order
        #[arg(long)]
        no_shuffle: bool,
    },

    /// List the topic files in a directory
    Files {
        /// Directory to scan (default: from config)
        dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Show names without their extension
        #[arg(long)]
        strip_extension: bool,

        /// Print only the file names, one per line
        #[arg(long)]
        names_only: bool,
    },

    /// List the topics of a topic file
    Topics {
        /// Topic file (relative names are also looked up in the topics directory)
        file: PathBuf,

        /// Include every prompt and answer
        #[arg(long)]
        prompts: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref())
        .map_err(|e| e.to_string())
        .and_then(|config| dispatch(cli, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli, mut config: AppConfig) -> Result<(), String> {
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(path) = cli.log_file {
        config.log_file = Some(path);
    }

    let command = cli.command.unwrap_or(Commands::Study {
        path: None,
        dir: None,
        no_shuffle: false,
    });

    match command {
        Commands::Study { path, dir, no_shuffle } => cmd_study(config, path, dir, no_shuffle),
        Commands::Files { dir, format, strip_extension, names_only } => {
            setup_logging(&config, config.log_file.clone());
            cmd_files(&config, dir, format.into(), strip_extension, names_only)
        }
        Commands::Topics { file, prompts, format } => {
            setup_logging(&config, config.log_file.clone());
            cmd_topics(&config, &file, prompts, format.into())
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Install the subscriber. Logging is best-effort: a failure is reported
/// and the command carries on.
fn setup_logging(config: &AppConfig, log_file: Option<PathBuf>) {
    if let Err(e) = init_logging(config.log_level, log_file.as_deref()) {
        eprintln!("Note: logging disabled: {}", e);
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_study(
    mut config: AppConfig,
    path: Option<PathBuf>,
    dir: Option<PathBuf>,
    no_shuffle: bool,
) -> Result<(), String> {
    // The terminal belongs to the UI, so logs always go to a file
    let log_file = config.log_file.clone().unwrap_or_else(default_log_path);
    setup_logging(&config, Some(log_file));

    if let Some(dir) = dir {
        config.topics_dir = dir;
    }
    if no_shuffle {
        config.shuffle = false;
    }

    info!(
        topics_dir = %config.topics_dir.display(),
        shuffle = config.shuffle,
        "Starting study screen"
    );
    tui::run(config, path).map_err(|e| format!("Terminal error: {}", e))
}

fn cmd_files(
    config: &AppConfig,
    dir: Option<PathBuf>,
    format: OutputFormat,
    strip_extension: bool,
    names_only: bool,
) -> Result<(), String> {
    let dir = dir.unwrap_or_else(|| config.topics_dir.clone());
    let strip_extension = strip_extension || config.strip_extensions;

    if names_only {
        for name in topic_file_names(&dir, strip_extension).map_err(|e| e.to_string())? {
            println!("{}", name);
        }
        return Ok(());
    }

    let scan_config = ScanConfig {
        strip_extension,
        ..ScanConfig::new(dir)
    };
    let entries = scan(&scan_config).map_err(|e| e.to_string())?;
    print!("{}", format_file_list(&entries, format));
    Ok(())
}

fn cmd_topics(
    config: &AppConfig,
    file: &Path,
    prompts: bool,
    format: OutputFormat,
) -> Result<(), String> {
    let path = resolve_topic_file(config, file);
    let store = TopicStore::load(&path).map_err(|e| e.to_string())?;
    print!("{}", format_topic_list(&store, prompts, format));
    Ok(())
}

// ============================================================================
// PATH RESOLUTION
// ============================================================================

/// Use `file` as given if it exists, otherwise look for it in the topics
/// directory.
fn resolve_topic_file(config: &AppConfig, file: &Path) -> PathBuf {
    if file.exists() || file.is_absolute() {
        return file.to_path_buf();
    }
    let candidate = config.topics_dir.join(file);
    if candidate.exists() {
        candidate
    } else {
        file.to_path_buf()
    }
}
