//! Prefix-sum index mapping a logical row to `(part, local offset)`.

/// Cumulative row counts over an ordered list of parts (files or batches).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIndex {
    // ends[i] = rows in parts 0..=i
    ends: Vec<u64>,
}

impl RowIndex {
    pub fn from_counts(counts: impl IntoIterator<Item = u64>) -> Self {
        let mut total = 0u64;
        let ends = counts
            .into_iter()
            .map(|c| {
                total += c;
                total
            })
            .collect();
        Self { ends }
    }

    pub fn total(&self) -> u64 {
        self.ends.last().copied().unwrap_or(0)
    }

    pub fn part_count(&self) -> usize {
        self.ends.len()
    }

    /// Logical index of the first row of `part`.
    pub fn start_of(&self, part: usize) -> Option<u64> {
        if part >= self.ends.len() {
            return None;
        }
        Some(if part == 0 { 0 } else { self.ends[part - 1] })
    }

    pub fn count_of(&self, part: usize) -> Option<u64> {
        Some(self.ends.get(part)? - self.start_of(part)?)
    }

    /// Resolve `index` to `(part, offset)`, or `None` when out of range.
    ///
    /// Empty parts are never returned.
    pub fn resolve(&self, index: u64) -> Option<(usize, u64)> {
        if index >= self.total() {
            return None;
        }
        // first part whose end lies beyond index
        let part = self.ends.partition_point(|&end| end <= index);
        let start = if part == 0 { 0 } else { self.ends[part - 1] };
        Some((part, index - start))
    }
}
