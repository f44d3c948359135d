//! Topic file storage and lookup.
//!
//! A `TopicStore` owns the full contents of one topic file for its
//! lifetime. Topic order is file order; duplicate names are kept as-is
//! and lookups resolve to the first occurrence.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::StoreError;
use crate::loader::{file_name, read_json, write_json};
use crate::types::{PromptPair, Topic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicStore {
    /// Where the topics came from. `None` for in-memory stores.
    path: Option<PathBuf>,
    topics: Vec<Topic>,
}

impl TopicStore {
    /// Load every topic from a JSON topic file.
    ///
    /// # Errors
    /// `StoreError::File` when the path is missing or unreadable,
    /// `StoreError::Parse` when the content is not a topic array.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let topics: Vec<Topic> = read_json(path)?;
        info!(
            path = %path.display(),
            topics = topics.len(),
            "Loaded topic file"
        );
        Ok(TopicStore {
            path: Some(path.to_path_buf()),
            topics,
        })
    }

    /// Build a store from topics already in memory.
    pub fn from_topics(topics: Vec<Topic>) -> Self {
        TopicStore { path: None, topics }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name for display ("topic.json"), or "(memory)".
    pub fn name(&self) -> String {
        self.path
            .as_deref()
            .map(file_name)
            .unwrap_or_else(|| "(memory)".to_string())
    }

    /// Topic names in file order, duplicates included.
    pub fn topics(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.name.as_str()).collect()
    }

    /// Whether `name` is one of the file's topics.
    pub fn contains(&self, name: &str) -> bool {
        self.topics.iter().any(|t| t.name == name)
    }

    /// Prompts of the first topic called `name`. Unknown names yield an
    /// empty slice.
    pub fn prompts_for(&self, name: &str) -> &[PromptPair] {
        match self.topics.iter().find(|t| t.name == name) {
            Some(topic) => &topic.prompts,
            None => {
                debug!(topic = name, "Topic not found, no prompts");
                &[]
            }
        }
    }

    /// All topic records, in file order.
    pub fn records(&self) -> &[Topic] {
        &self.topics
    }

    pub fn prompt_count(&self) -> usize {
        self.topics.iter().map(|t| t.prompts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Append `topic` to the topic file at `path`, creating the file if it
/// does not exist yet.
///
/// # Errors
/// Fails if an existing file cannot be parsed, or on any write error.
pub fn append_topic(path: &Path, topic: Topic) -> Result<TopicStore, StoreError> {
    let mut topics: Vec<Topic> = if path.exists() {
        read_json(path)?
    } else {
        Vec::new()
    };

    info!(
        path = %path.display(),
        topic = %topic.name,
        prompts = topic.prompts.len(),
        "Saving topic"
    );
    topics.push(topic);
    write_json(path, &topics)?;

    Ok(TopicStore {
        path: Some(path.to_path_buf()),
        topics,
    })
}

// ============================================================================
// TESTS
// ============================================================================
