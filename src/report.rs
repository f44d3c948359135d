//! Listing formatters for the non-interactive subcommands.
//!
//! Pure functions: data + OutputFormat -> String. No I/O.

use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::store::TopicStore;
use crate::types::{OutputFormat, PromptPair, TopicFileEntry};

/// Format a directory scan result.
pub fn format_file_list(entries: &[TopicFileEntry], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_files_human(entries),
        OutputFormat::Json => to_json(entries),
    }
}

/// Format the topics of a store, optionally with every prompt/answer pair.
pub fn format_topic_list(store: &TopicStore, with_prompts: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_topics_human(store, with_prompts),
        OutputFormat::Json => format_topics_json(store, with_prompts),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_files_human(entries: &[TopicFileEntry]) -> String {
    if entries.is_empty() {
        return "No topic files found.\n".to_string();
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);

    let mut out = String::from("=== Topic Files ===\n");
    for entry in entries {
        out.push_str(&format!(
            "  {:<width$}  {} topic{}, {} prompt{}, {}\n",
            entry.name,
            entry.topic_count,
            plural(entry.topic_count),
            entry.prompt_count,
            plural(entry.prompt_count),
            format_size(entry.size_bytes, BINARY),
            width = width
        ));
    }
    out
}

fn format_topics_human(store: &TopicStore, with_prompts: bool) -> String {
    let mut out = format!("=== {} ===\n", store.name());

    if store.is_empty() {
        out.push_str("  (no topics)\n");
        return out;
    }

    for topic in store.records() {
        let n = topic.prompts.len();
        out.push_str(&format!("  {} ({} prompt{})\n", topic.name, n, plural(n)));
        if with_prompts {
            for pair in &topic.prompts {
                out.push_str(&format!("    Prompt: {}\n", pair.prompt));
                out.push_str(&format!("    Answer: {}\n", pair.answer));
            }
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "Topics: {}, prompts: {}\n",
        store.topics().len(),
        store.prompt_count()
    ));
    out
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct TopicSummary<'a> {
    topic_name: &'a str,
    prompt_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompts: Option<&'a [PromptPair]>,
}

fn format_topics_json(store: &TopicStore, with_prompts: bool) -> String {
    let summaries: Vec<TopicSummary> = store
        .records()
        .iter()
        .map(|t| TopicSummary {
            topic_name: &t.name,
            prompt_count: t.prompts.len(),
            prompts: with_prompts.then_some(t.prompts.as_slice()),
        })
        .collect();
    to_json(&summaries)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Plain data with string keys; serialization cannot fail
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    json + "\n"
}

// ============================================================================
// TESTS
// ============================================================================
