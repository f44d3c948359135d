//! flashcards: study prompt/answer pairs grouped into topics.

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod navigator;
pub mod report;
pub mod scanner;
pub mod selection;
pub mod sequencer;
pub mod session;
pub mod store;
pub mod tui;
pub mod types;
