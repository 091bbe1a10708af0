use crate::config::ReportConfig;
use regionscope_common::{FoliaRegionId, RankedRegion};
use regionscope_kernel::RegionBrowser;

/// Region inspector for the statistics viewer.
///
/// Turns the browser's current selection into display-ready values. All
/// number formatting and missing-value handling lives here so front ends
/// only print.
pub struct RegionInspector;

impl RegionInspector {
    /// Build the report for the browser's current selection.
    pub fn report(browser: &RegionBrowser, config: &ReportConfig) -> RegionReport {
        let detail = browser.selected().zip(browser.position()).map(|(region, position)| {
            let mut entities: Vec<(String, i64)> =
                browser.combined_entities().into_iter().collect();
            entities.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            let entity_types = entities.len();
            entities.truncate(config.entity_rows);

            let latest = browser.latest_sample();

            RegionDetail {
                position: position.0,
                of: position.1,
                world: region.world.clone(),
                folia_region_id: region.folia_region_id(),
                total_entities: region.total_entities(),
                entity_types,
                entities,
                tps: latest.map(|s| s.tps),
                mspt: latest.map(|s| s.mspt),
                cpu_percent: latest.map(|s| s.utilisation_or_zero() * 100.0),
                chunk_count: region.chunks().len(),
                chunks: chunk_rows(region, config.chunk_rows),
            }
        });

        RegionReport {
            detail,
            sentinel: config.sentinel.clone(),
        }
    }

    /// The top `limit` rows of the ranked list.
    pub fn ranking(browser: &RegionBrowser, limit: usize) -> Vec<RankingRow> {
        browser
            .regions()
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, region)| RankingRow {
                position: i + 1,
                world: region.world.clone(),
                folia_region_id: region.folia_region_id(),
                total_entities: region.total_entities(),
                chunk_count: region.chunks().len(),
                selected: i == browser.index(),
            })
            .collect()
    }
}

fn chunk_rows(region: &RankedRegion, limit: usize) -> Vec<ChunkRow> {
    region
        .chunks()
        .iter()
        .take(limit)
        .map(|c| ChunkRow {
            x: c.x,
            z: c.z,
            total_entities: c.total_entities,
        })
        .collect()
}

/// Display-ready view of the selected region, or of an empty ranking.
#[derive(Debug, Clone)]
pub struct RegionReport {
    pub detail: Option<RegionDetail>,
    pub sentinel: String,
}

/// Everything shown for one selected region.
#[derive(Debug, Clone)]
pub struct RegionDetail {
    /// 1-based position in the ranking.
    pub position: usize,
    pub of: usize,
    pub world: String,
    pub folia_region_id: Option<FoliaRegionId>,
    pub total_entities: i64,
    /// Distinct entity types before truncation.
    pub entity_types: usize,
    /// Combined counts, largest first, ties by name.
    pub entities: Vec<(String, i64)>,
    pub tps: Option<f64>,
    pub mspt: Option<f64>,
    /// Utilisation scaled to percent; a sample without utilisation reads 0.
    pub cpu_percent: Option<f64>,
    pub chunk_count: usize,
    pub chunks: Vec<ChunkRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRow {
    pub x: i32,
    pub z: i32,
    pub total_entities: i64,
}

/// One line of the ranking listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub position: usize,
    pub world: String,
    pub folia_region_id: Option<FoliaRegionId>,
    pub total_entities: i64,
    pub chunk_count: usize,
    pub selected: bool,
}

impl RegionReport {
    fn or_sentinel(&self, value: Option<String>) -> String {
        value.unwrap_or_else(|| self.sentinel.clone())
    }

    pub fn folia_region_id_text(&self) -> String {
        self.or_sentinel(
            self.detail
                .as_ref()
                .and_then(|d| d.folia_region_id)
                .map(|id| id.to_string()),
        )
    }

    pub fn tps_text(&self) -> String {
        self.or_sentinel(self.detail.as_ref().and_then(|d| d.tps).map(|v| format!("{v:.2}")))
    }

    pub fn mspt_text(&self) -> String {
        self.or_sentinel(self.detail.as_ref().and_then(|d| d.mspt).map(|v| format!("{v:.2}")))
    }

    pub fn cpu_text(&self) -> String {
        self.or_sentinel(
            self.detail
                .as_ref()
                .and_then(|d| d.cpu_percent)
                .map(|v| format!("{v:.1}%")),
        )
    }
}

impl std::fmt::Display for RegionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(detail) = &self.detail else {
            return writeln!(f, "No regions");
        };

        writeln!(f, "Region #{} (of {})", detail.position, detail.of)?;
        writeln!(f)?;
        writeln!(f, "Entities ({}):", detail.total_entities)?;
        let name_width = detail.entities.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        for (name, count) in &detail.entities {
            writeln!(f, "  {name:<name_width$}  {count:>6}")?;
        }
        let hidden = detail.entity_types.saturating_sub(detail.entities.len());
        if hidden > 0 {
            writeln!(f, "  ... {hidden} more")?;
        }
        writeln!(f)?;
        writeln!(f, "World: {}", detail.world)?;
        writeln!(f, "Folia Region ID: {}", self.folia_region_id_text())?;
        writeln!(f, "TPS: {}", self.tps_text())?;
        writeln!(f, "MSPT: {}", self.mspt_text())?;
        writeln!(f, "CPU Util: {}", self.cpu_text())?;
        writeln!(f)?;
        writeln!(f, "Chunks ({}):", detail.chunk_count)?;
        for chunk in &detail.chunks {
            writeln!(
                f,
                "  ({:>5}, {:>5})  {:>6}",
                chunk.x, chunk.z, chunk.total_entities
            )?;
        }
        let hidden = detail.chunk_count.saturating_sub(detail.chunks.len());
        if hidden > 0 {
            writeln!(f, "  ... {hidden} more")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for RankingRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.selected { '>' } else { ' ' };
        let id = self
            .folia_region_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".into());
        write!(
            f,
            "{marker} #{:<4} {:<16} region={:<6} entities={:<8} chunks={}",
            self.position, self.world, id, self.total_entities, self.chunk_count
        )
    }
}
