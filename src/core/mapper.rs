//! Range remapping algorithm
//!
//! Maps ranges from a source category to a destination category.
//!
//! The partitioning algorithm for a single table:
//! 1. Select the rules whose source span intersects the query range
//! 2. Emit the leading gap before the first intersection unchanged
//! 3. Emit each intersection shifted by its rule's offset, with any hole
//!    between consecutive intersections passed through unchanged
//! 4. Emit the trailing gap after the last intersection unchanged
//!
//! Concatenated in emission order, the source-side pieces tile the query
//! range exactly once.

use crate::core::chain::MappingChain;
use crate::core::range::Range;
use crate::core::table::MappingTable;
use rayon::prelude::*;

/// Split `source` against `table` and map each piece
///
/// The output is ordered by position in the *source* range, not by
/// destination value. A range that touches no rule comes back unchanged.
///
/// # Examples
/// ```
/// use fast_remap::{map_range_through_table, MappingTable, Range};
///
/// let table = MappingTable::from_triples("a", "b", &[(5, 100, 3)]).unwrap();
/// let pieces = map_range_through_table(Range::new(0, 10).unwrap(), &table);
/// assert_eq!(pieces, vec![
///     Range::new(0, 4).unwrap(),
///     Range::new(100, 102).unwrap(),
///     Range::new(8, 10).unwrap(),
/// ]);
/// ```
pub fn map_range_through_table(source: Range, table: &MappingTable) -> Vec<Range> {
    let mut result = Vec::new();
    // End of the last source piece emitted so far
    let mut covered_until: Option<i64> = None;

    for (rule, intersection) in table.intersecting(&source) {
        let gap_start = match covered_until {
            Some(end) => end + 1,
            None => source.start(),
        };
        if intersection.start() > gap_start {
            result.push(Range::spanning(gap_start, intersection.start() - 1));
        }

        result.push(intersection.shift(rule.offset()));
        covered_until = Some(intersection.end());
    }

    match covered_until {
        None => result.push(source),
        Some(end) if end < source.end() => {
            result.push(Range::spanning(end + 1, source.end()));
        }
        Some(_) => {}
    }

    result
}

/// Sort ranges by start (then end) so stage output is deterministic
pub(crate) fn sort_ranges(ranges: &mut [Range]) {
    ranges.sort_unstable();
}

/// Batch mapper over a resolved chain
///
/// Holds the chain and the number of worker threads used for multi-range
/// queries. With one thread everything runs on the calling thread.
pub struct RangeMapper {
    chain: MappingChain,
    threads: usize,
}

impl RangeMapper {
    pub fn new(chain: MappingChain) -> Self {
        Self { chain, threads: 1 }
    }

    /// Create a mapper that spreads multi-range queries over `threads` workers
    pub fn with_threads(chain: MappingChain, threads: usize) -> Self {
        Self {
            chain,
            threads: threads.max(1),
        }
    }

    /// Get a reference to the underlying chain
    pub fn chain(&self) -> &MappingChain {
        &self.chain
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Map one value through every table of the chain
    pub fn map_point(&self, value: i64) -> i64 {
        self.chain.map_point(value)
    }

    /// Map many values, preserving input order
    pub fn map_points(&self, values: &[i64]) -> Vec<i64> {
        if self.threads <= 1 || values.len() < 2 {
            return values.iter().map(|&v| self.chain.map_point(v)).collect();
        }

        self.install(|| values.par_iter().map(|&v| self.chain.map_point(v)).collect())
    }

    /// Map one range through every table of the chain
    pub fn map_range(&self, source: Range) -> Vec<Range> {
        self.chain.map_range(source)
    }

    /// Map many ranges and return the union of their images, sorted by start
    ///
    /// Each source range is independent, so with more than one thread they
    /// are processed in parallel. Output is identical either way.
    pub fn map_ranges(&self, sources: &[Range]) -> Vec<Range> {
        let mut result: Vec<Range> = if self.threads <= 1 || sources.len() < 2 {
            sources
                .iter()
                .flat_map(|&source| self.chain.map_range(source))
                .collect()
        } else {
            log::info!(
                "Mapping {} ranges on {} threads",
                sources.len(),
                self.threads
            );
            self.install(|| {
                sources
                    .par_iter()
                    .flat_map_iter(|&source| self.chain.map_range(source))
                    .collect()
            })
        };

        sort_ranges(&mut result);
        result
    }

    /// Run `op` on a dedicated pool, falling back to the calling thread
    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match rayon::ThreadPoolBuilder::new().num_threads(self.threads).build() {
            Ok(pool) => pool.install(op),
            Err(e) => {
                log::warn!("Failed to create thread pool ({}), running sequentially", e);
                op()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chain::build_chain;

    fn r(start: i64, end: i64) -> Range {
        Range::new(start, end).unwrap()
    }

    fn seed_to_soil() -> MappingTable {
        MappingTable::from_triples("seed", "soil", &[(98, 50, 2), (50, 52, 48)]).unwrap()
    }

    #[test]
    fn test_range_inside_single_rule() {
        let result = map_range_through_table(r(79, 92), &seed_to_soil());
        assert_eq!(result, vec![r(81, 94)]);
    }

    #[test]
    fn test_range_with_gaps_on_both_sides() {
        let table = MappingTable::from_triples("a", "b", &[(5, 100, 3)]).unwrap();
        let result = map_range_through_table(r(0, 10), &table);
        assert_eq!(result, vec![r(0, 4), r(100, 102), r(8, 10)]);
    }

    #[test]
    fn test_full_miss_is_identity() {
        let result = map_range_through_table(r(0, 10), &seed_to_soil());
        assert_eq!(result, vec![r(0, 10)]);

        let empty = MappingTable::new("a", "b", vec![]).unwrap();
        assert_eq!(map_range_through_table(r(-5, 5), &empty), vec![r(-5, 5)]);
    }

    #[test]
    fn test_inner_gap_between_rules() {
        let table = MappingTable::from_triples("a", "b", &[(0, 100, 5), (10, 200, 5)]).unwrap();
        let result = map_range_through_table(r(0, 14), &table);
        assert_eq!(result, vec![r(100, 104), r(5, 9), r(200, 204)]);
    }

    #[test]
    fn test_adjacent_rules_leave_no_gap() {
        let table = MappingTable::from_triples("a", "b", &[(0, 100, 5), (5, 50, 5)]).unwrap();
        let result = map_range_through_table(r(2, 7), &table);
        assert_eq!(result, vec![r(102, 104), r(50, 52)]);
    }

    #[test]
    fn test_range_crossing_rule_boundary() {
        let result = map_range_through_table(r(90, 105), &seed_to_soil());
        assert_eq!(result, vec![r(92, 99), r(50, 51), r(100, 105)]);
    }

    #[test]
    fn test_single_point_range() {
        let result = map_range_through_table(Range::point(98), &seed_to_soil());
        assert_eq!(result, vec![Range::point(50)]);
    }

    fn two_stage_mapper(threads: usize) -> RangeMapper {
        let pool = vec![
            MappingTable::from_triples("a", "b", &[(10, 200, 5)]).unwrap(),
            MappingTable::from_triples("b", "c", &[(200, 300, 3)]).unwrap(),
        ];
        RangeMapper::with_threads(build_chain(&pool, "a", "c").unwrap(), threads)
    }

    #[test]
    fn test_map_ranges_sorted_union() {
        let mapper = two_stage_mapper(1);
        let result = mapper.map_ranges(&[r(10, 19), r(0, 1)]);
        assert_eq!(result, vec![r(0, 1), r(15, 19), r(203, 204), r(300, 302)]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sources: Vec<Range> = (0..50).map(|i| r(i * 7, i * 7 + 11)).collect();
        let sequential = two_stage_mapper(1).map_ranges(&sources);
        let parallel = two_stage_mapper(4).map_ranges(&sources);
        assert_eq!(sequential, parallel);

        let values: Vec<i64> = (0..40).collect();
        assert_eq!(
            two_stage_mapper(1).map_points(&values),
            two_stage_mapper(3).map_points(&values)
        );
    }

    #[test]
    fn test_threads_clamped() {
        assert_eq!(two_stage_mapper(0).threads(), 1);
    }
}
