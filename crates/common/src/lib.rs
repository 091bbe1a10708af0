//! Shared types: world, region, chunk and telemetry snapshots.
//!
//! # Invariants
//! - Snapshots are plain owned values; nothing here mutates them.
//! - Optional source fields are `Option`, never sentinel values.

mod types;

pub use types::{
    ChunkSnapshot, FoliaRegionId, RankedRegion, RegionSnapshot, TelemetrySample, WorldSnapshot,
    WorldStatistics,
};
