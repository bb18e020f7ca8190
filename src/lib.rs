//! FastRemap - interval remapping through chained mapping tables
//!
//! Projects integers and closed integer ranges through a chain of
//! piecewise-linear tables ("almanac" maps) without ever enumerating the
//! values inside a range.
//!
//! # Features
//!
//! - O(log n) point lookup over sorted, validated rule lists
//! - Range partitioning that accounts for every sub-range exactly once
//! - Chain resolution by category name with duplicate and cycle detection
//! - Parallel multi-range queries with rayon
//! - Support for compressed almanac files (gzip, bzip2)
//!
//! # Example
//!
//! ```
//! use fast_remap::{build_chain, MappingTable, Range};
//!
//! let pool = vec![
//!     MappingTable::from_triples("seed", "soil", &[(10, 200, 5)]).unwrap(),
//!     MappingTable::from_triples("soil", "location", &[(200, 300, 3)]).unwrap(),
//! ];
//! let chain = build_chain(&pool, "seed", "location").unwrap();
//!
//! assert_eq!(chain.map_point(11), 301);
//! let ranges = chain.map_range(Range::new(10, 19).unwrap());
//! assert_eq!(ranges.first().map(|r| r.start()), Some(15));
//! ```

pub mod core;
pub mod solver;

// Re-export commonly used types
pub use core::{
    build_chain, map_range_through_table, parse_almanac_file, parse_almanac_str, Almanac,
    AlmanacParseError, FastRemapError, MappingChain, MappingError, MappingRule, MappingTable,
    Range, RangeMapper, SeedMode,
};
pub use solver::{lowest_for_points, lowest_for_ranges, lowest_location, Answer};
