//! CLI entrypoint for mixalture
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use mixalture_application::{
    ChatError, ChatTurnInput, ChatTurnUseCase, ConversationHistoryUseCase, ConversationStore,
    HistoryQuery, NoProgress, ProgressNotifier, ResponseOrchestrator,
};
use mixalture_domain::{OutputFormat, UserName};
use mixalture_infrastructure::{
    ConfigLoader, FileConfig, GeminiClient, HuggingFaceClient, InMemoryConversationStore,
    JsonlConversationLogger, JsonlConversationStore, Severity,
};
use mixalture_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormatter, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// User recorded when neither `--user` nor a login name is available
const DEFAULT_USER: &str = "anonymous";

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = load_env_file(None);
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.log_dir().as_deref());
    info!("Starting mixalture");
    if let Some(path) = &env_file {
        debug!(path = %path.display(), "Loaded environment file");
    }

    check_config(&config)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = config.output.resolve_format(cli.output.map(Into::into));

    // === Dependency Injection ===
    let store = build_store(&config, &cli)?;

    if cli.history {
        let Some(store) = store else {
            bail!("Conversation storage is disabled ([storage] enabled = false).");
        };
        return print_history(store, cli.user.as_deref(), cli.limit, format).await;
    }

    let user = resolve_user(cli.user.as_deref())?;
    let behavior = config.behavior.to_behavior_config();
    let primary = GeminiClient::from_config(&config.providers.primary, &behavior)
        .context("Primary provider is not configured")?;
    let secondary = HuggingFaceClient::from_config(&config.providers.secondary, &behavior)
        .context("Secondary provider is not configured")?;

    let mut orchestrator = ResponseOrchestrator::new(Arc::new(primary), Arc::new(secondary));
    if let Some(path) = config.logging.conversation_log_path()
        && let Some(logger) = JsonlConversationLogger::new(&path)
    {
        info!(path = %logger.path().display(), "Writing conversation transcript");
        orchestrator = orchestrator.with_conversation_logger(Arc::new(logger));
    }

    let mut chat = ChatTurnUseCase::new(orchestrator);
    if let Some(store) = &store {
        chat = chat.with_store(store.clone());
    }

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(chat, user)
            .with_progress(config.repl.show_progress && !cli.quiet)
            .with_format(format)
            .with_history_file(config.repl.history_path());
        if let Some(store) = store {
            repl = repl.with_history(ConversationHistoryUseCase::new(store));
        }

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode or --history to list past conversations.");
    };

    let reporter = ProgressReporter::new();
    let progress: &dyn ProgressNotifier = if cli.quiet { &NoProgress } else { &reporter };

    let input = ChatTurnInput::new(user, question.clone());
    let outcome = match chat.execute_with_progress(input, progress).await {
        Ok(output) => output.outcome,
        Err(ChatError::Store { outcome, source }) => {
            warn!("Conversation was not saved: {}", source);
            *outcome
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", ConsoleFormatter.format(format, &question, &outcome));

    Ok(())
}

/// Install the stderr subscriber, plus a daily rolling file when `log_dir` is set.
///
/// The returned guard must live until exit so buffered file output is flushed.
/// Load variables from `path`, or from `.env` in the working directory (or
/// a parent) when `path` is `None`. Variables already set are kept.
///
/// A missing file is not an error. Runs before logging is set up, so other
/// failures go to stderr.
fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Some(path),
        Err(err) => {
            if !err.not_found() {
                eprintln!("Warning: failed to load .env file: {err}");
            }
            None
        }
    }
}

fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "mixalture.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

/// Log warnings and fail on errors found in the configuration.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        warn!("Config: {}", issue);
    }

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

/// Open the conversation store.
///
/// Chat mode falls back to an in-memory store so `/history` still works
/// when nothing is persisted.
fn build_store(config: &FileConfig, cli: &Cli) -> Result<Option<Arc<dyn ConversationStore>>> {
    let persist = config.storage.enabled && (cli.history || !cli.no_save);
    if persist && let Some(path) = config.storage.resolve_path() {
        let store = JsonlConversationStore::open(&path)
            .with_context(|| format!("Failed to open conversation store {}", path.display()))?;
        info!(path = %store.path().display(), "Conversation store opened");
        return Ok(Some(Arc::new(store)));
    }

    if cli.chat {
        return Ok(Some(Arc::new(InMemoryConversationStore::new())));
    }
    Ok(None)
}

fn resolve_user(explicit: Option<&str>) -> Result<UserName> {
    let name = explicit
        .map(str::to_string)
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("USERNAME").ok())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER.to_string());
    UserName::try_new(name).context("Invalid user name")
}

async fn print_history(
    store: Arc<dyn ConversationStore>,
    user: Option<&str>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let query = match user {
        Some(name) => HistoryQuery::User(UserName::try_new(name).context("Invalid user name")?),
        None => HistoryQuery::AllUsers,
    };

    let records = ConversationHistoryUseCase::new(store)
        .execute(&query, limit)
        .await
        .context("Failed to read conversation history")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Answer | OutputFormat::Full => {
            print!("{}", ConsoleFormatter::format_history(&records))
        }
    }
    Ok(())
}
