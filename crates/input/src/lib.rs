//! Navigation: user commands mapped to actions over a region browser.
//!
//! # Invariants
//! - Every input maps to an action; unrecognised input is `Noop`, never an error.
//! - Actions move the cursor only; they never reorder or mutate regions.

pub mod action;

pub use action::{Action, Outcome};
