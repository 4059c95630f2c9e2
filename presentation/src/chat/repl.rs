//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use mixalture_application::{
    ChatError, ChatTurnInput, ChatTurnUseCase, ConversationHistoryUseCase, HistoryQuery,
    NoProgress, ProgressNotifier,
};
use mixalture_domain::{OutputFormat, UserName};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use tracing::warn;

/// Lines kept in the line-editor history file
const HISTORY_CAPACITY: usize = 1000;

/// Number of past conversations shown by `/history`
const HISTORY_SHOWN: usize = 10;

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for ordinary input.
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = line.trim();
        if !cmd.starts_with('/') {
            return None;
        }
        Some(match cmd {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// One line read at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Empty,
    Command(ReplCommand),
    /// A question, exactly as typed
    Prompt(&'a str),
}

impl<'a> ReplInput<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            ReplInput::Empty
        } else if let Some(command) = ReplCommand::parse(line) {
            ReplInput::Command(command)
        } else {
            ReplInput::Prompt(line)
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    chat: ChatTurnUseCase,
    history: Option<ConversationHistoryUseCase>,
    user: UserName,
    show_progress: bool,
    format: OutputFormat,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(chat: ChatTurnUseCase, user: UserName) -> Self {
        Self {
            chat,
            history: None,
            user,
            show_progress: true,
            format: OutputFormat::Answer,
            history_file: None,
        }
    }

    /// Enable `/history` backed by the conversation store
    pub fn with_history(mut self, history: ConversationHistoryUseCase) -> Self {
        self.history = Some(history);
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Persist typed lines to `path`
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create REPL history directory {}: {}", parent.display(), e);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open REPL history {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(self.user.to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => match ReplInput::classify(&line) {
                    ReplInput::Empty => continue,
                    ReplInput::Command(command) => {
                        if self.handle_command(command).await {
                            break;
                        }
                    }
                    ReplInput::Prompt(question) => self.process_question(question).await,
                },
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "mixalture - Chat Mode".cyan().bold());
        println!("Chatting as {}", self.user.as_str().bold());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show your recent conversations");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
                false
            }
            ReplCommand::History => {
                self.show_history().await;
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn show_history(&self) {
        let Some(history) = &self.history else {
            println!("{}", "Conversation history is disabled.".dimmed());
            return;
        };
        let query = HistoryQuery::User(self.user.clone());
        match history.execute(&query, Some(HISTORY_SHOWN)).await {
            Ok(records) => print!("{}", ConsoleFormatter::format_history(&records)),
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    async fn process_question(&self, question: &str) {
        println!();

        let input = ChatTurnInput::new(self.user.clone(), question);
        let reporter = ProgressReporter::new();
        let progress: &dyn ProgressNotifier = if self.show_progress {
            &reporter
        } else {
            &NoProgress
        };

        match self.chat.execute_with_progress(input, progress).await {
            Ok(output) => {
                println!("{}", ConsoleFormatter.format(self.format, question, &output.outcome));
            }
            Err(ChatError::Store { outcome, source }) => {
                println!("{}", ConsoleFormatter.format(self.format, question, &outcome));
                eprintln!("{} conversation not saved: {}", "!".yellow(), source);
            }
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
        println!();
    }
}
