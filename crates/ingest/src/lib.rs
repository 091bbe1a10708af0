//! Ingest: world statistics documents on disk.
//!
//! # Invariants
//! - Decoding never reorders or filters worlds, regions, or chunks.
//! - Every load carries a digest of the raw bytes so unchanged files can be skipped.
//!
//! Supported layouts, chosen by file extension:
//! ```text
//! stats.json      - WorldStatistics object, or a bare array of worlds
//! stats.cbor      - CBOR-encoded WorldStatistics
//! stats.cbor.zst  - zstd-compressed CBOR
//! ```

mod format;
mod store;

pub use format::{SnapshotFormat, decode_statistics, encode_statistics};
pub use store::{IngestError, LoadedStatistics, SnapshotSource, load_statistics, save_statistics};
