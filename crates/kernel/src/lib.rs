//! Region Kernel: ranking, selection cursor, and per-region aggregation.
//!
//! # Invariants
//! - Every operation is total; empty input degrades to empty output.
//! - Inputs are never mutated. Each ranking pass returns fresh owned values.
//! - The cursor stores a raw index and normalizes it on every read.

pub mod aggregate;
pub mod browser;
pub mod cursor;
pub mod rank;

pub use aggregate::{combine_entity_counts, latest_sample};
pub use browser::RegionBrowser;
pub use cursor::{Cursor, normalize};
pub use rank::rank;
