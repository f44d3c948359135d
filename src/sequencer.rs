//! The working prompt sequence: aggregation, shuffling, indexed access.
//!
//! State machine: `Empty -> Loaded -> Shuffled`. `rebuild` always moves to
//! `Loaded`; `shuffle` needs a prior `rebuild`.

use rand::Rng;
use tracing::debug;

use crate::error::SequenceError;
use crate::selection::TopicSelectionSet;
use crate::store::TopicStore;
use crate::types::{PromptField, PromptPair};

/// Returned in place of text when a caller asks for a field that does not
/// exist.
pub const INVALID_FIELD_SENTINEL: &str = "InvalidFieldError";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceState {
    #[default]
    Empty,
    Loaded,
    Shuffled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSequencer {
    prompts: Vec<PromptPair>,
    state: SequenceState,
}

impl PromptSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working sequence with the prompts of every selected
    /// topic, concatenated in selection order.
    pub fn rebuild(&mut self, store: &TopicStore, selection: &TopicSelectionSet) -> &[PromptPair] {
        self.prompts = selection
            .selected()
            .iter()
            .flat_map(|name| store.prompts_for(name).iter().cloned())
            .collect();
        self.state = SequenceState::Loaded;

        debug!(
            topics = selection.len(),
            prompts = self.prompts.len(),
            "Rebuilt prompt sequence"
        );
        &self.prompts
    }

    /// Replace the working sequence with a random permutation of itself.
    ///
    /// # Errors
    /// `SequenceError::NotLoaded` before the first `rebuild`.
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) -> Result<&[PromptPair], SequenceError> {
        if self.state == SequenceState::Empty {
            return Err(SequenceError::NotLoaded);
        }
        self.prompts = shuffle(&self.prompts, rng);
        self.state = SequenceState::Shuffled;

        debug!(prompts = self.prompts.len(), "Shuffled prompt sequence");
        Ok(&self.prompts)
    }

    /// Text of `field` ("prompt" or "answer") of the prompt at `index`.
    ///
    /// # Errors
    /// `InvalidField` for any other field name, `NotLoaded` before the
    /// first `rebuild`, `IndexOutOfRange` when `index >= len()`.
    pub fn get(&self, index: usize, field: &str) -> Result<&str, SequenceError> {
        let field: PromptField = field.parse()?;
        self.field(index, field)
    }

    /// Typed variant of [`PromptSequencer::get`].
    ///
    /// # Errors
    /// `NotLoaded` before the first `rebuild`, `IndexOutOfRange` when
    /// `index >= len()`.
    pub fn field(&self, index: usize, field: PromptField) -> Result<&str, SequenceError> {
        if self.state == SequenceState::Empty {
            return Err(SequenceError::NotLoaded);
        }
        self.prompts
            .get(index)
            .map(|pair| pair.field(field))
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.prompts.len(),
            })
    }

    /// Like `get`, but an invalid field name yields
    /// [`INVALID_FIELD_SENTINEL`] instead of an error.
    ///
    /// # Errors
    /// `IndexOutOfRange` when `index >= len()`.
    pub fn get_or_sentinel(&self, index: usize, field: &str) -> Result<&str, SequenceError> {
        match self.get(index, field) {
            Err(SequenceError::InvalidField(_)) => Ok(INVALID_FIELD_SENTINEL),
            other => other,
        }
    }

    pub fn prompts(&self) -> &[PromptPair] {
        &self.prompts
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

/// Uniformly random permutation of `items`, as a new vector.
///
/// Repeatedly picks a uniformly random element from the remaining pool and
/// moves it to the output. The input is left untouched.
pub fn shuffle<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut pool: Vec<T> = items.to_vec();
    let mut out = Vec::with_capacity(pool.len());

    while !pool.is_empty() {
        let pick = rng.gen_range(0..pool.len());
        out.push(pool.swap_remove(pick));
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
