//! Closed integer ranges
//!
//! A [`Range`] is the unit of work for range queries: a contiguous,
//! inclusive span `[start, end]` that is never enumerated value by value.

use crate::core::error::{MappingError, MappingResult};

/// Immutable closed interval `[start, end]` with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range {
    start: i64,
    end: i64,
}

impl Range {
    /// Create a range from inclusive bounds
    ///
    /// # Examples
    /// ```
    /// use fast_remap::Range;
    /// let range = Range::new(79, 92).unwrap();
    /// assert_eq!(range.len(), 14);
    /// assert!(Range::new(5, 4).is_err());
    /// ```
    pub fn new(start: i64, end: i64) -> MappingResult<Self> {
        if start > end {
            return Err(MappingError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a range from a start value and a positive length
    ///
    /// This is how seed ranges are written in an almanac.
    ///
    /// # Examples
    /// ```
    /// use fast_remap::Range;
    /// let range = Range::from_start_len(79, 14).unwrap();
    /// assert_eq!((range.start(), range.end()), (79, 92));
    /// ```
    pub fn from_start_len(start: i64, length: i64) -> MappingResult<Self> {
        if length <= 0 {
            return Err(MappingError::InvalidRangeLength { start, length });
        }
        let end = start
            .checked_add(length - 1)
            .ok_or(MappingError::InvalidRangeLength { start, length })?;
        Ok(Self { start, end })
    }

    /// Bounds already known to satisfy `start <= end`
    #[inline]
    pub(crate) fn spanning(start: i64, end: i64) -> Self {
        debug_assert!(start <= end, "range bounds out of order: {start} > {end}");
        Self { start, end }
    }

    /// Range holding a single value
    pub fn point(value: i64) -> Self {
        Self { start: value, end: value }
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of values covered (always at least 1)
    ///
    /// Saturates at `u64::MAX` for the full `i64` domain.
    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start).saturating_add(1)
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value <= self.end
    }

    /// Overlap of this range with `[lo_start, lo_end]`
    ///
    /// Returns `None` if the two are disjoint (`max(starts) > min(ends)`).
    ///
    /// # Examples
    /// ```
    /// use fast_remap::Range;
    /// let range = Range::new(0, 10).unwrap();
    /// assert_eq!(range.intersect(5, 7), Some(Range::new(5, 7).unwrap()));
    /// assert_eq!(range.intersect(8, 20), Some(Range::new(8, 10).unwrap()));
    /// assert_eq!(range.intersect(11, 20), None);
    /// ```
    #[inline]
    pub fn intersect(&self, lo_start: i64, lo_end: i64) -> Option<Range> {
        let start = self.start.max(lo_start);
        let end = self.end.min(lo_end);
        if start > end {
            return None;
        }
        Some(Range { start, end })
    }

    /// Range moved by `offset`
    ///
    /// Callers guarantee the shifted bounds are representable; mapping
    /// rules validate their destination span at construction for this.
    #[inline]
    pub fn shift(&self, offset: i64) -> Range {
        Range {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
