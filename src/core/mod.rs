//! Core range remapping functionality
//!
//! This module contains the range primitive, mapping tables, chain
//! resolution, the range partitioning algorithm and the almanac parser.

pub mod almanac;
mod chain;
mod error;
mod mapper;
mod range;
mod table;

pub use almanac::{
    detect_compression, parse_almanac_file, parse_almanac_reader, parse_almanac_str, Almanac,
    CompressionFormat, SeedMode,
};
pub use chain::{build_chain, MappingChain};
pub use error::{
    AlmanacParseError, AlmanacResult, FastRemapError, MappingError, MappingResult, Result,
};
pub use mapper::{map_range_through_table, RangeMapper};
pub use range::Range;
pub use table::{MappingRule, MappingTable};
