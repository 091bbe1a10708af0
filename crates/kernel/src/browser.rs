use crate::aggregate::{combine_entity_counts, latest_sample};
use crate::cursor::Cursor;
use crate::rank::rank;
use regionscope_common::{RankedRegion, TelemetrySample, WorldSnapshot};
use std::collections::BTreeMap;

/// A navigable view over the hottest regions of the latest snapshot.
///
/// Owns one ranked list and the cursor over it. A refresh replaces the list
/// wholesale and keeps the cursor's raw index, which then wraps into the new
/// bounds.
#[derive(Debug, Clone, Default)]
pub struct RegionBrowser {
    regions: Vec<RankedRegion>,
    cursor: Cursor,
}

impl RegionBrowser {
    /// Rank the given worlds and select the hottest region.
    pub fn new(worlds: &[WorldSnapshot]) -> Self {
        Self {
            regions: rank(worlds),
            cursor: Cursor::new(),
        }
    }

    /// Replace the ranked list from a fresh snapshot.
    pub fn refresh(&mut self, worlds: &[WorldSnapshot]) {
        let _span = tracing::debug_span!("browser_refresh").entered();
        self.regions = rank(worlds);
        tracing::debug!(
            regions = self.regions.len(),
            raw = self.cursor.raw(),
            index = self.cursor.index(self.regions.len()),
            "browser refreshed"
        );
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    pub fn previous(&mut self) {
        self.cursor.previous();
    }

    /// Move by an arbitrary number of positions.
    pub fn apply_delta(&mut self, delta: i64) {
        self.cursor.advance(delta);
    }

    /// Jump to a raw index, wrapped on read like any other.
    pub fn select(&mut self, raw: i64) {
        self.cursor.select(raw);
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn regions(&self) -> &[RankedRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Normalized index of the selection (`0` when empty).
    pub fn index(&self) -> usize {
        self.cursor.index(self.regions.len())
    }

    pub fn selected(&self) -> Option<&RankedRegion> {
        self.cursor.selected(&self.regions)
    }

    /// 1-based position of the selection and the list length.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.regions.is_empty() {
            None
        } else {
            Some((self.index() + 1, self.regions.len()))
        }
    }

    /// Entity counts of the selected region, summed over its chunks.
    pub fn combined_entities(&self) -> BTreeMap<String, i64> {
        combine_entity_counts(self.selected())
    }

    pub fn latest_sample(&self) -> Option<&TelemetrySample> {
        latest_sample(self.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionscope_common::{ChunkSnapshot, RegionSnapshot};

    fn worlds(totals: &[(&str, Vec<i64>)]) -> Vec<WorldSnapshot> {
        totals
            .iter()
            .map(|(name, regions)| WorldSnapshot {
                name: name.to_string(),
                regions: regions
                    .iter()
                    .map(|t| RegionSnapshot {
                        total_entities: *t,
                        ..RegionSnapshot::default()
                    })
                    .collect(),
            })
            .collect()
    }

    #[test]
    fn empty_browser_selects_nothing() {
        let mut browser = RegionBrowser::new(&[]);
        browser.next();
        browser.previous();
        browser.previous();
        assert!(browser.is_empty());
        assert_eq!(browser.index(), 0);
        assert!(browser.selected().is_none());
        assert!(browser.position().is_none());
        assert!(browser.combined_entities().is_empty());
        assert!(browser.latest_sample().is_none());
    }

    #[test]
    fn starts_at_hottest_region() {
        let browser = RegionBrowser::new(&worlds(&[
            ("overworld", vec![50, 200]),
            ("nether", vec![100]),
        ]));
        let selected = browser.selected().unwrap();
        assert_eq!(selected.total_entities(), 200);
        assert_eq!(selected.world, "overworld");
        assert_eq!(browser.position(), Some((1, 3)));
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut browser = RegionBrowser::new(&worlds(&[
            ("overworld", vec![50, 200]),
            ("nether", vec![100]),
        ]));
        browser.previous();
        assert_eq!(browser.position(), Some((3, 3)));
        assert_eq!(browser.selected().unwrap().total_entities(), 50);
        browser.next();
        assert_eq!(browser.position(), Some((1, 3)));
        browser.apply_delta(-4);
        assert_eq!(browser.position(), Some((3, 3)));
    }

    #[test]
    fn refresh_keeps_raw_index_and_wraps() {
        let mut browser = RegionBrowser::new(&worlds(&[("overworld", vec![1, 2, 3, 4, 5])]));
        browser.apply_delta(4);
        assert_eq!(browser.selected().unwrap().total_entities(), 1);

        browser.refresh(&worlds(&[("overworld", vec![7, 8])]));
        assert_eq!(browser.cursor().raw(), 4);
        assert_eq!(browser.index(), 0);
        assert_eq!(browser.selected().unwrap().total_entities(), 8);

        browser.refresh(&[]);
        assert!(browser.selected().is_none());
        assert_eq!(browser.index(), 0);
    }

    #[test]
    fn aggregates_follow_selection() {
        let mut hot = RegionSnapshot {
            total_entities: 5,
            ..RegionSnapshot::default()
        };
        hot.chunks = vec![
            ChunkSnapshot {
                total_entities: 4,
                entity_counts: [("zombie".to_string(), 3), ("cow".to_string(), 1)].into(),
                ..ChunkSnapshot::default()
            },
            ChunkSnapshot {
                total_entities: 2,
                entity_counts: [("zombie".to_string(), 2)].into(),
                ..ChunkSnapshot::default()
            },
        ];
        hot.samples = vec![TelemetrySample {
            tps: 19.9,
            mspt: 12.5,
            utilisation: Some(0.25),
            time: 1,
        }];
        let cold = RegionSnapshot {
            total_entities: 1,
            ..RegionSnapshot::default()
        };
        let mut browser = RegionBrowser::new(&[WorldSnapshot {
            name: "overworld".into(),
            regions: vec![cold, hot],
        }]);

        assert_eq!(browser.combined_entities()["zombie"], 5);
        assert_eq!(browser.combined_entities()["cow"], 1);
        assert_eq!(browser.latest_sample().map(|s| s.mspt), Some(12.5));

        browser.next();
        assert!(browser.combined_entities().is_empty());
        assert!(browser.latest_sample().is_none());
    }
}
