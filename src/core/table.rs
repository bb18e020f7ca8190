//! Mapping tables for efficient point and range queries
//!
//! A table is a list of non-overlapping rules kept sorted by source start,
//! so a point lookup is a binary search and a range query only touches the
//! rules that actually intersect it.

use crate::core::error::{MappingError, MappingResult};
use crate::core::range::Range;

/// One contiguous linear remap segment
///
/// Maps `[source_start, source_end]` onto `[destination_start, destination_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingRule {
    source_start: i64,
    destination_start: i64,
    length: i64,
}

impl MappingRule {
    /// Create a rule, rejecting empty lengths and spans that overflow `i64`
    ///
    /// # Examples
    /// ```
    /// use fast_remap::MappingRule;
    /// let rule = MappingRule::new(50, 52, 48).unwrap();
    /// assert_eq!(rule.source_end(), 97);
    /// assert_eq!(rule.offset(), 2);
    /// assert!(MappingRule::new(50, 52, 0).is_err());
    /// ```
    pub fn new(source_start: i64, destination_start: i64, length: i64) -> MappingResult<Self> {
        let malformed = |reason| MappingError::MalformedRule {
            source_start,
            destination_start,
            length,
            reason,
        };

        if length <= 0 {
            return Err(malformed("length must be > 0"));
        }
        if source_start.checked_add(length - 1).is_none() {
            return Err(malformed("source end overflows"));
        }
        if destination_start.checked_add(length - 1).is_none() {
            return Err(malformed("destination end overflows"));
        }
        if destination_start.checked_sub(source_start).is_none() {
            return Err(malformed("offset overflows"));
        }

        Ok(Self {
            source_start,
            destination_start,
            length,
        })
    }

    #[inline]
    pub fn source_start(&self) -> i64 {
        self.source_start
    }

    /// Last source value covered (inclusive)
    #[inline]
    pub fn source_end(&self) -> i64 {
        self.source_start + (self.length - 1)
    }

    #[inline]
    pub fn destination_start(&self) -> i64 {
        self.destination_start
    }

    /// Last destination value covered (inclusive)
    #[inline]
    pub fn destination_end(&self) -> i64 {
        self.destination_start + (self.length - 1)
    }

    #[inline]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// Distance from source to destination
    #[inline]
    pub fn offset(&self) -> i64 {
        self.destination_start - self.source_start
    }

    /// Source span as a range
    pub fn source_range(&self) -> Range {
        Range::spanning(self.source_start, self.source_end())
    }

    pub fn contains(&self, value: i64) -> bool {
        self.source_start <= value && value <= self.source_end()
    }

    /// Map a value covered by this rule
    ///
    /// Returns `None` if the value is outside the source span.
    pub fn try_map(&self, value: i64) -> Option<i64> {
        if !self.contains(value) {
            return None;
        }
        Some(value - self.source_start + self.destination_start)
    }
}

/// Rules converting one category into another
///
/// Construction sorts the rules by source start and validates that no two
/// of them overlap, so lookups never have to re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    source_category: String,
    destination_category: String,
    /// Sorted by `source_start`, pairwise disjoint
    rules: Vec<MappingRule>,
}

impl MappingTable {
    /// Build a table from rules in any order
    ///
    /// Fails with [`MappingError::OverlappingRules`] if two rules share a
    /// source value.
    pub fn new(
        source_category: impl Into<String>,
        destination_category: impl Into<String>,
        mut rules: Vec<MappingRule>,
    ) -> MappingResult<Self> {
        let source_category = source_category.into();
        let destination_category = destination_category.into();

        rules.sort_by_key(|rule| rule.source_start);

        for pair in rules.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            if second.source_start <= first.source_end() {
                return Err(MappingError::OverlappingRules {
                    category: format!("{}-to-{}", source_category, destination_category),
                    first_start: first.source_start,
                    first_end: first.source_end(),
                    second_start: second.source_start,
                    second_end: second.source_end(),
                });
            }
        }

        log::debug!(
            "Built {}-to-{} table with {} rules",
            source_category,
            destination_category,
            rules.len()
        );

        Ok(Self {
            source_category,
            destination_category,
            rules,
        })
    }

    /// Build a table from `(source_start, destination_start, length)` triples
    pub fn from_triples(
        source_category: impl Into<String>,
        destination_category: impl Into<String>,
        triples: &[(i64, i64, i64)],
    ) -> MappingResult<Self> {
        let rules = triples
            .iter()
            .map(|&(source_start, destination_start, length)| {
                MappingRule::new(source_start, destination_start, length)
            })
            .collect::<MappingResult<Vec<_>>>()?;
        Self::new(source_category, destination_category, rules)
    }

    pub fn source_category(&self) -> &str {
        &self.source_category
    }

    pub fn destination_category(&self) -> &str {
        &self.destination_category
    }

    /// Rules in ascending source order
    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the rule whose source span contains `value`
    ///
    /// Standard interval binary search: go right when the value is past the
    /// middle rule's end, left when it is before its start.
    pub fn find_rule(&self, value: i64) -> Option<&MappingRule> {
        let mut left = 0usize;
        let mut right = self.rules.len();

        while left < right {
            let middle = left + (right - left) / 2;
            let rule = &self.rules[middle];

            if value > rule.source_end() {
                left = middle + 1;
            } else if value < rule.source_start {
                right = middle;
            } else {
                return Some(rule);
            }
        }

        None
    }

    /// Map a single value through this table (identity on miss)
    pub fn map_point(&self, value: i64) -> i64 {
        match self.find_rule(value) {
            Some(rule) => value - rule.source_start + rule.destination_start,
            None => value,
        }
    }

    /// Rules whose source span intersects `source`, paired with the intersection
    ///
    /// Skips straight to the first candidate with a binary search, then scans
    /// until rules start past the range.
    pub fn intersecting<'a>(
        &'a self,
        source: &'a Range,
    ) -> impl Iterator<Item = (&'a MappingRule, Range)> + 'a {
        let first = self
            .rules
            .partition_point(|rule| rule.source_end() < source.start());

        self.rules[first..]
            .iter()
            .take_while(move |rule| rule.source_start <= source.end())
            .filter_map(move |rule| {
                source
                    .intersect(rule.source_start, rule.source_end())
                    .map(|intersection| (rule, intersection))
            })
    }
}
