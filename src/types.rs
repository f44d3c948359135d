//! Domain types for flashcards.
//!
//! Topic files are JSON arrays of `{ "topic_name", "prompts": [...] }`
//! records. Everything here is plain data; loading and querying live in
//! `store`, `selection` and `sequencer`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SequenceError;

// ============================================================================
// RECORDS
// ============================================================================

/// One flashcard: a question and its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptPair {
    pub prompt: String,
    pub answer: String,
}

impl PromptPair {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        PromptPair {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Text of the requested field.
    pub fn field(&self, field: PromptField) -> &str {
        match field {
            PromptField::Prompt => &self.prompt,
            PromptField::Answer => &self.answer,
        }
    }
}

/// A named group of prompt/answer pairs, as stored in a topic file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(rename = "topic_name")]
    pub name: String,
    #[serde(default)]
    pub prompts: Vec<PromptPair>,
}

impl Topic {
    pub fn new(name: impl Into<String>, prompts: Vec<PromptPair>) -> Self {
        Topic {
            name: name.into(),
            prompts,
        }
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// Which half of a [`PromptPair`] is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    Prompt,
    Answer,
}

impl FromStr for PromptField {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt" => Ok(PromptField::Prompt),
            "answer" => Ok(PromptField::Answer),
            other => Err(SequenceError::InvalidField(other.to_string())),
        }
    }
}

impl fmt::Display for PromptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptField::Prompt => write!(f, "prompt"),
            PromptField::Answer => write!(f, "answer"),
        }
    }
}

/// What a single toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Name is not a topic of the loaded file. Nothing changed.
    Invalid,
}

/// Output format for the non-interactive listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// SCAN
// ============================================================================

/// Configuration for a topic directory scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory whose direct children are inspected.
    pub dir: PathBuf,
    /// Drop the file extension from reported names ("topic.json" -> "topic").
    pub strip_extension: bool,
    /// Include dotfiles.
    pub include_hidden: bool,
}

impl ScanConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ScanConfig {
            dir: dir.into(),
            strip_extension: false,
            include_hidden: false,
        }
    }
}

/// A file in the scanned directory that parses as a topic file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicFileEntry {
    /// Display name (extension stripped when configured).
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
    pub topic_count: usize,
    pub prompt_count: usize,
    pub size_bytes: u64,
}

// ============================================================================
// TESTS
// ============================================================================
