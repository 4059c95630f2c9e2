//! JSONL file store for conversation records.
//!
//! One [`ConversationRecord`] per line, appended in creation order. Ids are
//! assigned sequentially, continuing from the highest id found on open.

use async_trait::async_trait;
use chrono::Utc;
use mixalture_application::{ConversationStore, StoreError};
use mixalture_domain::{ConversationRecord, NewConversation, RecordId, UserName};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Append state; the mutex also serializes writers.
#[derive(Debug)]
struct AppendState {
    next_id: u64,
    /// The file does not end with a newline (torn or failed write).
    needs_newline: bool,
}

pub struct JsonlConversationStore {
    path: PathBuf,
    state: Mutex<AppendState>,
}

impl JsonlConversationStore {
    /// Open (or create) the store at `path`.
    ///
    /// Creates parent directories as needed. Lines that are not valid
    /// records are skipped with a warning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let records = parse_records(&path, &content);
        let next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        let needs_newline = !content.is_empty() && !content.ends_with('\n');
        debug!(
            path = %path.display(),
            records = records.len(),
            needs_newline,
            "Opened conversation store"
        );

        Ok(Self {
            path,
            state: Mutex::new(AppendState {
                next_id,
                needs_newline,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<ConversationRecord>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(parse_records(&self.path, &content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_records(path: &Path, content: &str) -> Vec<ConversationRecord> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    line = idx + 1,
                    error = %e,
                    "Skipping unreadable conversation record"
                );
                None
            }
        })
        .collect()
}

#[async_trait]
impl ConversationStore for JsonlConversationStore {
    async fn save(&self, conversation: NewConversation) -> Result<ConversationRecord, StoreError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| StoreError::Io(std::io::Error::other("conversation store lock poisoned")))?;

        let record = ConversationRecord::new(RecordId(state.next_id), conversation, Utc::now());
        let mut buf = Vec::new();
        if state.needs_newline {
            buf.push(b'\n');
        }
        serde_json::to_writer(&mut buf, &record)?;
        buf.push(b'\n');

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| {
                file.write_all(&buf)?;
                file.flush()
            });
        if let Err(e) = written {
            // A partial write may have left an unterminated line behind.
            state.needs_newline = true;
            return Err(e.into());
        }

        state.needs_newline = false;
        state.next_id += 1;
        Ok(record)
    }

    async fn list_for_user(&self, user: &UserName) -> Result<Vec<ConversationRecord>, StoreError> {
        let mut records = self.read_all().await?;
        records.retain(|r| &r.user == user);
        Ok(records)
    }

    async fn list_all(&self) -> Result<Vec<ConversationRecord>, StoreError> {
        self.read_all().await
    }
}
