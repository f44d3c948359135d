//! Which topics the user has picked.
//!
//! Selection order is the order of add operations: removing a topic and
//! adding it back moves it to the end.

use tracing::debug;

use crate::store::TopicStore;
use crate::types::ToggleOutcome;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSelectionSet {
    /// Topic names of the loaded file, file order.
    known: Vec<String>,
    /// Picked names, insertion order. Always a subset of `known`.
    selected: Vec<String>,
}

impl TopicSelectionSet {
    /// Empty selection over the given topic names.
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TopicSelectionSet {
            known: known.into_iter().map(Into::into).collect(),
            selected: Vec::new(),
        }
    }

    /// Empty selection over the topics of `store`.
    pub fn for_store(store: &TopicStore) -> Self {
        TopicSelectionSet::new(store.topics())
    }

    /// Add `name` if unselected, remove it if selected. Unknown names are
    /// reported as [`ToggleOutcome::Invalid`] and change nothing.
    pub fn toggle(&mut self, name: &str) -> ToggleOutcome {
        let outcome = if let Some(pos) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(pos);
            ToggleOutcome::Removed
        } else if self.known.iter().any(|k| k == name) {
            self.selected.push(name.to_string());
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Invalid
        };

        debug!(topic = name, ?outcome, selected = self.selected.len(), "Toggled topic");
        outcome
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// Picked topic names in insertion order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// All topic names this selection accepts, file order.
    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Toggle every unselected topic, in file order.
    ///
    /// Returns one entry per toggle performed.
    pub fn select_all(&mut self) -> Vec<(String, ToggleOutcome)> {
        let pending: Vec<String> = self
            .known
            .iter()
            .filter(|k| !self.is_selected(k))
            .cloned()
            .collect();

        let mut outcomes = Vec::new();
        for name in pending {
            // Duplicate names in the file: the first toggle already added it
            if self.is_selected(&name) {
                continue;
            }
            let outcome = self.toggle(&name);
            outcomes.push((name, outcome));
        }
        outcomes
    }

    /// Toggle every selected topic off, in file order.
    ///
    /// Returns one entry per toggle performed.
    pub fn deselect_all(&mut self) -> Vec<(String, ToggleOutcome)> {
        let pending: Vec<String> = self
            .known
            .iter()
            .filter(|k| self.is_selected(k))
            .cloned()
            .collect();

        let mut outcomes = Vec::new();
        for name in pending {
            if !self.is_selected(&name) {
                continue;
            }
            let outcome = self.toggle(&name);
            outcomes.push((name, outcome));
        }
        outcomes
    }
}

// ============================================================================
// TESTS
// ============================================================================
