//! Topic file discovery.
//!
//! Looks at the direct children of a directory and keeps the ones that
//! parse as topic files. Subdirectories and hidden entries are skipped.

use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::store::TopicStore;
use crate::types::{ScanConfig, TopicFileEntry};

/// Scan a directory for topic files, sorted by file name.
///
/// # Errors
/// Returns an error if `config.dir` is not a readable directory.
pub fn scan(config: &ScanConfig) -> io::Result<Vec<TopicFileEntry>> {
    if !config.dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("not a directory: {}", config.dir.display()),
        ));
    }

    let walker = WalkDir::new(&config.dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut entries = Vec::new();

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        let filename = match path.file_name().and_then(|s| s.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if !config.include_hidden && filename.starts_with('.') {
            continue;
        }

        match TopicStore::load(path) {
            Ok(store) => {
                let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
                entries.push(TopicFileEntry {
                    name: display_name(filename, config.strip_extension),
                    path: path.to_path_buf(),
                    topic_count: store.topics().len(),
                    prompt_count: store.prompt_count(),
                    size_bytes,
                });
            }
            Err(e) => {
                debug!(file = filename, error = %e, "Not a topic file");
            }
        }
    }

    info!(dir = %config.dir.display(), found = entries.len(), "Scanned for topic files");
    Ok(entries)
}

/// Names of the topic files in `dir`.
///
/// # Errors
/// Returns an error if `dir` is not a readable directory.
pub fn topic_file_names(dir: &Path, strip_extension: bool) -> io::Result<Vec<String>> {
    let config = ScanConfig {
        strip_extension,
        ..ScanConfig::new(dir)
    };
    Ok(scan(&config)?.into_iter().map(|e| e.name).collect())
}

fn display_name(filename: &str, strip_extension: bool) -> String {
    if !strip_extension {
        return filename.to_string();
    }
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str =
        r#"[{"topic_name": "Ports", "prompts": [{"prompt": "HTTP", "answer": "80"}]}]"#;

    /// Helper: a directory with a mix of valid, invalid and ignored entries
    fn setup_topic_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("networking.json"), VALID).unwrap();
        fs::write(dir.path().join("validate_file.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "just some notes").unwrap();
        fs::write(dir.path().join(".hidden.json"), VALID).unwrap();

        let sub = dir.path().join("archive");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("old.json"), VALID).unwrap();

        dir
    }

    #[test]
    fn scan_keeps_only_parseable_files() {
        let dir = setup_topic_dir();
        let names = topic_file_names(dir.path(), false).unwrap();
        assert_eq!(names, vec!["networking.json", "validate_file.json"]);
    }

    #[test]
    fn scan_can_strip_extensions() {
        let dir = setup_topic_dir();
        let names = topic_file_names(dir.path(), true).unwrap();
        assert_eq!(names, vec!["networking", "validate_file"]);
    }

    #[test]
    fn scan_includes_hidden_when_asked() {
        let dir = setup_topic_dir();
        let config = ScanConfig {
            include_hidden: true,
            ..ScanConfig::new(dir.path())
        };
        let entries = scan(&config).unwrap();
        assert!(entries.iter().any(|e| e.name == ".hidden.json"));
    }

    #[test]
    fn scan_reports_counts_and_size() {
        let dir = setup_topic_dir();
        let entries = scan(&ScanConfig::new(dir.path())).unwrap();

        let networking = &entries[0];
        assert_eq!(networking.topic_count, 1);
        assert_eq!(networking.prompt_count, 1);
        assert_eq!(networking.size_bytes, VALID.len() as u64);
        assert_eq!(networking.path, dir.path().join("networking.json"));
    }

    #[test]
    fn scan_does_not_descend_into_subdirectories() {
        let dir = setup_topic_dir();
        let entries = scan(&ScanConfig::new(dir.path())).unwrap();
        assert!(entries.iter().all(|e| e.name != "old.json"));
    }

    #[test]
    fn scan_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(scan(&ScanConfig::new(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn scan_missing_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let result = scan(&ScanConfig::new(dir.path().join("nope")));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
