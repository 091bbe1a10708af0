use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a Folia tick region, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoliaRegionId(pub i64);

impl std::fmt::Display for FoliaRegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-wide statistics document: the envelope that carries every world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldStatistics {
    pub total_entities: i64,
    pub entity_counts: BTreeMap<String, i64>,
    pub worlds: Vec<WorldSnapshot>,
}

/// One world's statistics at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldSnapshot {
    pub name: String,
    pub regions: Vec<RegionSnapshot>,
}

/// A region of a world with its chunks and telemetry history.
///
/// `total_entities` is computed upstream and is the ranking key; it is
/// never recomputed from the chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionSnapshot {
    pub folia_region_id: Option<FoliaRegionId>,
    pub total_entities: i64,
    pub chunks: Vec<ChunkSnapshot>,
    /// Ascending by time; the last element is the latest reading.
    pub samples: Vec<TelemetrySample>,
}

/// Entity counts for a single chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChunkSnapshot {
    pub x: i32,
    pub z: i32,
    pub total_entities: i64,
    pub entity_counts: BTreeMap<String, i64>,
}

/// A single performance reading for a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// Capture time in epoch milliseconds.
    #[serde(default)]
    pub time: i64,
    pub tps: f64,
    pub mspt: f64,
    /// CPU utilisation in `[0, 1]`, when the server reports it.
    #[serde(default)]
    pub utilisation: Option<f64>,
}

impl TelemetrySample {
    /// Utilisation with the display default applied: a missing value reads as zero.
    pub fn utilisation_or_zero(&self) -> f64 {
        self.utilisation.unwrap_or(0.0)
    }
}

/// A region copied out of its world and tagged with the world's name.
///
/// Owns its data: sorting `region.chunks` never touches the snapshot it was
/// derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRegion {
    pub world: String,
    #[serde(flatten)]
    pub region: RegionSnapshot,
}

impl RankedRegion {
    pub fn new(world: impl Into<String>, region: RegionSnapshot) -> Self {
        Self {
            world: world.into(),
            region,
        }
    }

    pub fn total_entities(&self) -> i64 {
        self.region.total_entities
    }

    pub fn folia_region_id(&self) -> Option<FoliaRegionId> {
        self.region.folia_region_id
    }

    pub fn chunks(&self) -> &[ChunkSnapshot] {
        &self.region.chunks
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.region.samples
    }
}
