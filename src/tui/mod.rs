//! Interactive terminal interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Transition, Effect)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `run`: Effects (terminal, keys, file I/O, randomness)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
