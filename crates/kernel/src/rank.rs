use regionscope_common::{RankedRegion, WorldSnapshot};

/// Flatten every region of every world into one list, hottest first.
///
/// Each region is cloned and tagged with its world's name, its chunks are
/// sorted by entity count descending, and the full list is then sorted by
/// the region's `total_entities` descending.
///
/// Both sorts are stable. Regions with equal totals keep their input order
/// (world order, then region order within the world), and chunks with equal
/// totals keep their order within the region.
pub fn rank(worlds: &[WorldSnapshot]) -> Vec<RankedRegion> {
    let _span = tracing::info_span!("rank_regions").entered();

    let mut regions: Vec<RankedRegion> = worlds
        .iter()
        .flat_map(|world| {
            world.regions.iter().map(move |region| {
                let mut ranked = RankedRegion::new(world.name.clone(), region.clone());
                ranked
                    .region
                    .chunks
                    .sort_by(|a, b| b.total_entities.cmp(&a.total_entities));
                ranked
            })
        })
        .collect();

    regions.sort_by(|a, b| b.total_entities().cmp(&a.total_entities()));

    tracing::debug!(
        worlds = worlds.len(),
        regions = regions.len(),
        "ranked regions"
    );

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionscope_common::{ChunkSnapshot, FoliaRegionId, RegionSnapshot};

    fn region(total: i64) -> RegionSnapshot {
        RegionSnapshot {
            total_entities: total,
            ..RegionSnapshot::default()
        }
    }

    fn chunk(total: i64) -> ChunkSnapshot {
        ChunkSnapshot {
            total_entities: total,
            ..ChunkSnapshot::default()
        }
    }

    fn world(name: &str, regions: Vec<RegionSnapshot>) -> WorldSnapshot {
        WorldSnapshot {
            name: name.into(),
            regions,
        }
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        assert!(rank(&[]).is_empty());
        assert!(rank(&[world("overworld", vec![])]).is_empty());
    }

    #[test]
    fn basic_ranking_orders_and_tags_worlds() {
        let worlds = vec![
            world("overworld", vec![region(50), region(200)]),
            world("nether", vec![region(100)]),
        ];
        let ranked = rank(&worlds);

        let totals: Vec<i64> = ranked.iter().map(|r| r.total_entities()).collect();
        let names: Vec<&str> = ranked.iter().map(|r| r.world.as_str()).collect();
        assert_eq!(totals, vec![200, 100, 50]);
        assert_eq!(names, vec!["overworld", "nether", "overworld"]);
    }

    #[test]
    fn flattened_length_is_sum_of_regions() {
        let worlds = vec![
            world("a", vec![region(1), region(2), region(3)]),
            world("b", vec![]),
            world("c", vec![region(0), region(0)]),
        ];
        assert_eq!(rank(&worlds).len(), 5);
    }

    #[test]
    fn zero_entity_and_chunkless_regions_are_kept() {
        let worlds = vec![world("a", vec![region(0), region(-3)])];
        let ranked = rank(&worlds);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].total_entities(), -3);
    }

    #[test]
    fn chunks_sorted_descending_per_region() {
        let mut hot = region(10);
        hot.chunks = vec![chunk(1), chunk(7), chunk(2)];
        let mut cold = region(3);
        cold.chunks = vec![chunk(0), chunk(3)];
        let ranked = rank(&[world("a", vec![cold, hot])]);

        for r in &ranked {
            assert!(
                r.chunks()
                    .windows(2)
                    .all(|w| w[0].total_entities >= w[1].total_entities)
            );
        }
        let hottest: Vec<i64> = ranked[0].chunks().iter().map(|c| c.total_entities).collect();
        assert_eq!(hottest, vec![7, 2, 1]);
    }

    #[test]
    fn regions_sorted_descending() {
        let worlds = vec![
            world("a", vec![region(5), region(9), region(1)]),
            world("b", vec![region(7), region(9), region(0)]),
        ];
        let ranked = rank(&worlds);
        assert!(
            ranked
                .windows(2)
                .all(|w| w[0].total_entities() >= w[1].total_entities())
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let mut first = region(10);
        first.folia_region_id = Some(FoliaRegionId(1));
        let mut second = region(10);
        second.folia_region_id = Some(FoliaRegionId(2));
        let mut third = region(10);
        third.folia_region_id = Some(FoliaRegionId(3));
        let worlds = vec![world("a", vec![first, second]), world("b", vec![third])];

        let ids: Vec<Option<FoliaRegionId>> =
            rank(&worlds).iter().map(|r| r.folia_region_id()).collect();
        assert_eq!(
            ids,
            vec![
                Some(FoliaRegionId(1)),
                Some(FoliaRegionId(2)),
                Some(FoliaRegionId(3))
            ]
        );
    }

    #[test]
    fn tied_chunks_keep_input_order() {
        let mut r = region(4);
        r.chunks = vec![
            ChunkSnapshot {
                x: 1,
                total_entities: 2,
                ..ChunkSnapshot::default()
            },
            ChunkSnapshot {
                x: 2,
                total_entities: 2,
                ..ChunkSnapshot::default()
            },
        ];
        let ranked = rank(&[world("a", vec![r])]);
        let xs: Vec<i32> = ranked[0].chunks().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![1, 2]);
    }

    #[test]
    fn source_snapshots_are_not_mutated() {
        let mut r = region(3);
        r.chunks = vec![chunk(1), chunk(3), chunk(2)];
        let worlds = vec![world("a", vec![region(1), r])];
        let before = worlds.clone();

        let ranked = rank(&worlds);
        assert_eq!(worlds, before);
        assert_eq!(ranked[0].chunks()[0].total_entities, 3);
        assert_eq!(worlds[0].regions[1].chunks[0].total_entities, 1);
    }

    #[test]
    fn successive_rankings_are_independent() {
        let worlds = vec![world("a", vec![region(1), region(2)])];
        let mut first = rank(&worlds);
        let second = rank(&worlds);
        first[0].region.total_entities = 99;
        assert_eq!(second[0].total_entities(), 2);
    }
}
