//! Almanac answers
//!
//! Reduces remapped seeds to the lowest destination value, either treating
//! every seed number as a single value or reading them as `(start, length)`
//! ranges.

use crate::core::{build_chain, Almanac, RangeMapper, Result, SeedMode};

/// Default start category
pub const DEFAULT_FROM: &str = "seed";

/// Default end category
pub const DEFAULT_TO: &str = "location";

/// Answer plus the numbers worth reporting about how it was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    /// Lowest destination value, `None` when there are no seeds
    pub lowest: Option<i64>,
    /// Seeds (points) or seed ranges processed
    pub seeds: usize,
    /// Tables in the resolved chain
    pub chain_length: usize,
    /// Destination ranges produced (equals `seeds` in point mode)
    pub output_ranges: usize,
}

/// Lowest destination value over every seed read as a single value
pub fn lowest_for_points(almanac: &Almanac, from: &str, to: &str) -> Result<Option<i64>> {
    Ok(lowest_location(almanac, SeedMode::Points, from, to, 1)?.lowest)
}

/// Lowest destination value over every seed range
///
/// Ranges are pushed through the chain as whole intervals; the answer is
/// the smallest start among the resulting ranges.
pub fn lowest_for_ranges(
    almanac: &Almanac,
    from: &str,
    to: &str,
    threads: usize,
) -> Result<Option<i64>> {
    Ok(lowest_location(almanac, SeedMode::Ranges, from, to, threads)?.lowest)
}

/// Resolve the chain and compute the answer for the given seed mode
pub fn lowest_location(
    almanac: &Almanac,
    mode: SeedMode,
    from: &str,
    to: &str,
    threads: usize,
) -> Result<Answer> {
    let chain = build_chain(&almanac.tables, from, to)?;
    let chain_length = chain.len();
    let mapper = RangeMapper::with_threads(chain, threads);

    let answer = match mode {
        SeedMode::Points => {
            let seeds = almanac.seed_points();
            let mapped = mapper.map_points(seeds);
            Answer {
                lowest: mapped.iter().copied().min(),
                seeds: seeds.len(),
                chain_length,
                output_ranges: mapped.len(),
            }
        }
        SeedMode::Ranges => {
            let seeds = almanac.seed_ranges()?;
            let mapped = mapper.map_ranges(&seeds);
            Answer {
                // map_ranges output is sorted by start
                lowest: mapped.first().map(|r| r.start()),
                seeds: seeds.len(),
                chain_length,
                output_ranges: mapped.len(),
            }
        }
    };

    log::info!(
        "{:?} mode: {} seeds through {} tables -> {} outputs",
        mode,
        answer.seeds,
        answer.chain_length,
        answer.output_ranges
    );

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse_almanac_str, FastRemapError, MappingError};

    const SAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn test_sample_points() {
        let almanac = parse_almanac_str(SAMPLE).unwrap();
        assert_eq!(
            lowest_for_points(&almanac, DEFAULT_FROM, DEFAULT_TO).unwrap(),
            Some(35)
        );
    }

    #[test]
    fn test_sample_ranges() {
        let almanac = parse_almanac_str(SAMPLE).unwrap();
        assert_eq!(
            lowest_for_ranges(&almanac, DEFAULT_FROM, DEFAULT_TO, 1).unwrap(),
            Some(46)
        );
        assert_eq!(
            lowest_for_ranges(&almanac, DEFAULT_FROM, DEFAULT_TO, 4).unwrap(),
            Some(46)
        );
    }

    #[test]
    fn test_answer_stats() {
        let almanac = parse_almanac_str(SAMPLE).unwrap();
        let answer = lowest_location(&almanac, SeedMode::Points, "seed", "location", 1).unwrap();
        assert_eq!(answer.seeds, 4);
        assert_eq!(answer.chain_length, 7);
        assert_eq!(answer.output_ranges, 4);
    }

    #[test]
    fn test_partial_chain() {
        let almanac = parse_almanac_str(SAMPLE).unwrap();
        // 79 -> 81, 14 -> 14, 55 -> 57, 13 -> 13
        let answer = lowest_location(&almanac, SeedMode::Points, "seed", "soil", 1).unwrap();
        assert_eq!(answer.chain_length, 1);
        assert_eq!(answer.lowest, Some(13));
    }

    #[test]
    fn test_no_seeds() {
        let almanac = parse_almanac_str("seeds:\n\na-to-b map:\n1 2 3\n").unwrap();
        assert_eq!(lowest_for_points(&almanac, "a", "b").unwrap(), None);
        assert_eq!(lowest_for_ranges(&almanac, "a", "b", 1).unwrap(), None);
    }

    #[test]
    fn test_unknown_category() {
        let almanac = parse_almanac_str(SAMPLE).unwrap();
        let result = lowest_for_points(&almanac, "seed", "planet");
        assert!(matches!(
            result,
            Err(FastRemapError::Mapping(MappingError::CategoryNotFound(ref c))) if c == "location"
        ));
    }

    #[test]
    fn test_odd_seeds_in_range_mode() {
        let almanac = parse_almanac_str("seeds: 1 2 3\n\na-to-b map:\n1 2 3\n").unwrap();
        assert!(matches!(
            lowest_for_ranges(&almanac, "a", "b", 1),
            Err(FastRemapError::AlmanacParse(_))
        ));
    }
}
