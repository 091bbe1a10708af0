//! Developer Tooling: region inspector and report configuration.
//!
//! # Invariants
//! - Reports are read-only views; building one never moves the cursor.
//! - Missing data renders as the configured sentinel, never as zero.

mod config;
mod inspector;

pub use config::{ConfigError, ReportConfig};
pub use inspector::{ChunkRow, RankingRow, RegionDetail, RegionInspector, RegionReport};

pub fn crate_info() -> &'static str {
    concat!("regionscope-tools v", env!("CARGO_PKG_VERSION"))
}
