use regionscope_common::RankedRegion;

/// Map any raw index into `[0, len)` with wrap-around, or `0` for an empty list.
///
/// Negative raw indices wrap from the end: `normalize(-1, n) == n - 1`.
pub fn normalize(raw: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match i64::try_from(len) {
        Ok(len) => raw.rem_euclid(len) as usize,
        // A list longer than i64::MAX holds every non-negative raw index as-is.
        Err(_) => {
            if raw >= 0 {
                raw as usize
            } else {
                len - raw.unsigned_abs() as usize
            }
        }
    }
}

/// Selection over a ranked list that survives the list changing length.
///
/// Stores the raw, un-clamped index accumulated from navigation and
/// normalizes it against the current list length on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    raw: i64,
}

impl Cursor {
    /// Cursor at the first position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor starting from a given raw index.
    pub fn at(raw: i64) -> Self {
        Self { raw }
    }

    /// The raw accumulated index.
    pub fn raw(&self) -> i64 {
        self.raw
    }

    /// Move by `delta` positions. Saturates at the `i64` bounds.
    pub fn advance(&mut self, delta: i64) {
        self.raw = self.raw.saturating_add(delta);
        tracing::trace!(delta, raw = self.raw, "cursor advanced");
    }

    /// Step to the next region.
    pub fn next(&mut self) {
        self.advance(1);
    }

    /// Step to the previous region.
    pub fn previous(&mut self) {
        self.advance(-1);
    }

    /// Jump to an absolute raw index.
    pub fn select(&mut self, raw: i64) {
        self.raw = raw;
    }

    /// Back to the first position.
    pub fn reset(&mut self) {
        self.raw = 0;
    }

    /// The index this cursor selects in a list of `len` elements.
    pub fn index(&self, len: usize) -> usize {
        normalize(self.raw, len)
    }

    /// The selected region, or `None` when the list is empty.
    pub fn selected<'a>(&self, regions: &'a [RankedRegion]) -> Option<&'a RankedRegion> {
        regions.get(self.index(regions.len()))
    }
}
