use std::ops::Range;

/// A user-anchored contiguous range of absolute offsets.
///
/// While marking is on, cursor movement only ever widens the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    mark: Option<(u64, u64)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.mark.is_some()
    }

    /// Turns marking on (anchored at `at`) or off.
    pub fn toggle(&mut self, at: u64) {
        self.mark = match self.mark {
            Some(_) => None,
            None => Some((at, at)),
        };
    }

    pub fn clear(&mut self) {
        self.mark = None;
    }

    pub fn extend(&mut self, at: u64) {
        if let Some((min, max)) = self.mark.as_mut() {
            if at < *min {
                *min = at;
            }
            if at > *max {
                *max = at;
            }
        }
    }

    /// Inclusive bounds.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        self.mark
    }

    /// Marked offsets as a half-open range.
    pub fn range(&self) -> Option<Range<u64>> {
        self.mark.map(|(min, max)| min..max + 1)
    }

    pub fn contains(&self, offset: u64) -> bool {
        matches!(self.mark, Some((min, max)) if min <= offset && offset <= max)
    }

    /// Truncation rule: anything reaching the cut point is dropped.
    pub fn invalidate_from(&mut self, offset: u64) {
        if let Some((min, max)) = self.mark
            && (min >= offset || max >= offset)
        {
            self.mark = None;
        }
    }

    /// Clears the mark if it shares any offset with `range`.
    pub fn invalidate_overlapping(&mut self, range: Range<u64>) {
        if let Some((min, max)) = self.mark
            && min < range.end
            && range.start <= max
        {
            self.mark = None;
        }
    }
}
