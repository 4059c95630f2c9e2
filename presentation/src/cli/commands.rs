//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Answer with contributors and the per-stage call log
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for mixalture_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => Self::Answer,
            OutputFormat::Full => Self::Full,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for mixalture
#[derive(Parser, Debug)]
#[command(name = "mixalture")]
#[command(author, version, about = "Answer questions by drafting, critiquing and refining with two LLMs")]
#[command(long_about = r#"
mixalture answers a question by chaining two language model providers:

1. Draft:     the primary provider answers the question
2. Critique:  the secondary provider reviews and improves the draft
3. Synthesis: the primary provider merges both into the final answer

If a stage fails, the best answer obtained so far is returned. If the
primary provider cannot draft at all, the secondary provider answers directly.

Configuration files are loaded from (in priority order):
1. MIXALTURE_* environment variables (e.g. MIXALTURE_BEHAVIOR__TIMEOUT_SECONDS)
2. --config <path>        Explicit config file
3. ./mixalture.toml       Project-level config
4. ~/.config/mixalture/config.toml   Global config

Example:
  mixalture --user alice "How do I read a file line by line in Rust?"
  mixalture --chat --user alice
  mixalture --history --user alice
"#)]
pub struct Cli {
    /// The question to ask (not required in chat or history mode)
    pub question: Option<String>,

    /// User the conversation is recorded for
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "history")]
    pub chat: bool,

    /// List stored conversations (all users unless --user is given)
    #[arg(long)]
    pub history: bool,

    /// Show only the most recent N conversations
    #[arg(long, value_name = "N", requires = "history")]
    pub limit: Option<usize>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Do not record this conversation
    #[arg(long)]
    pub no_save: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot() {
        let cli = Cli::try_parse_from(["mixalture", "--user", "alice", "What is Rust?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is Rust?"));
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_history_with_limit() {
        let cli = Cli::try_parse_from(["mixalture", "--history", "--limit", "5", "-o", "json"]).unwrap();
        assert!(cli.history);
        assert_eq!(cli.limit, Some(5));
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_chat_conflicts_with_history() {
        assert!(Cli::try_parse_from(["mixalture", "--chat", "--history"]).is_err());
    }

    #[test]
    fn test_limit_requires_history() {
        assert!(Cli::try_parse_from(["mixalture", "--limit", "3", "hi"]).is_err());
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["mixalture", "-vv", "hi"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
