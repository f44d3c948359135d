//! One study run: the loaded file, the picked topics and the working
//! sequence built from them.

use std::path::Path;

use rand::Rng;
use tracing::{info, warn};

use crate::error::{SequenceError, StoreError};
use crate::selection::TopicSelectionSet;
use crate::sequencer::PromptSequencer;
use crate::store::TopicStore;
use crate::types::ToggleOutcome;

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: Option<TopicStore>,
    selection: TopicSelectionSet,
    sequencer: PromptSequencer,
}

impl Session {
    /// Session with no topic file loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_store(store: TopicStore) -> Self {
        Session {
            selection: TopicSelectionSet::for_store(&store),
            store: Some(store),
            sequencer: PromptSequencer::new(),
        }
    }

    /// Load a topic file into a fresh session.
    ///
    /// # Errors
    /// Propagates the store's load error.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        TopicStore::load(path).map(Session::with_store)
    }

    pub fn store(&self) -> Option<&TopicStore> {
        self.store.as_ref()
    }

    pub fn selection(&self) -> &TopicSelectionSet {
        &self.selection
    }

    pub fn sequencer(&self) -> &PromptSequencer {
        &self.sequencer
    }

    pub fn toggle(&mut self, name: &str) -> ToggleOutcome {
        let outcome = self.selection.toggle(name);
        if outcome == ToggleOutcome::Invalid {
            warn!(topic = name, "Not a topic of the loaded file");
        }
        outcome
    }

    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    /// Rebuild the working sequence from the selection, shuffling it if
    /// asked. Returns the number of prompts.
    ///
    /// # Errors
    /// `NoSelection` when no topic is picked; the sequence is left as is.
    pub fn begin<R: Rng>(&mut self, rng: &mut R, shuffle: bool) -> Result<usize, SequenceError> {
        let Some(store) = &self.store else {
            return Err(SequenceError::NoSelection);
        };
        if self.selection.is_empty() {
            return Err(SequenceError::NoSelection);
        }

        self.sequencer.rebuild(store, &self.selection);
        if shuffle {
            self.sequencer.shuffle_with(rng)?;
        }

        info!(
            file = %store.name(),
            topics = self.selection.len(),
            prompts = self.sequencer.len(),
            shuffled = shuffle,
            "Study run started"
        );
        Ok(self.sequencer.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================
