use regionscope_common::{RankedRegion, TelemetrySample};
use std::collections::BTreeMap;

/// Sum each entity type's count across every chunk of a region.
///
/// Types that appear in no chunk are absent from the result. A type listed
/// with an explicit count of zero is kept with zero. Sums saturate rather
/// than overflow. No region yields an empty map.
pub fn combine_entity_counts(region: Option<&RankedRegion>) -> BTreeMap<String, i64> {
    let mut combined = BTreeMap::new();
    let Some(region) = region else {
        return combined;
    };

    for chunk in region.chunks() {
        for (name, count) in &chunk.entity_counts {
            let total = combined.entry(name.clone()).or_insert(0i64);
            *total = total.saturating_add(*count);
        }
    }
    combined
}

/// The most recent telemetry sample of a region, if it has any.
pub fn latest_sample(region: Option<&RankedRegion>) -> Option<&TelemetrySample> {
    region.and_then(|r| r.samples().last())
}
