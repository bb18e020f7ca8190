//! Error types for FastRemap
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FastRemap operations
#[derive(Debug, Error)]
pub enum FastRemapError {
    /// Almanac parsing errors
    #[error("Almanac parse error: {0}")]
    AlmanacParse(#[from] AlmanacParseError),

    /// Table, range or chain construction errors
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building ranges, tables and chains
///
/// All of these are configuration errors: once a chain has been built,
/// point and range queries cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Rule with a non-positive length or an end that does not fit in `i64`
    #[error(
        "Malformed rule (source_start = {source_start}, destination_start = {destination_start}, length = {length}): {reason}"
    )]
    MalformedRule {
        source_start: i64,
        destination_start: i64,
        length: i64,
        reason: &'static str,
    },

    /// Two rules of the same table cover a common source value
    #[error(
        "Overlapping rules in {category} table: [{first_start}, {first_end}] and [{second_start}, {second_end}]"
    )]
    OverlappingRules {
        category: String,
        first_start: i64,
        first_end: i64,
        second_start: i64,
        second_end: i64,
    },

    /// Two tables in the pool share a source category
    #[error("Duplicate source category: {0}")]
    DuplicateSourceCategory(String),

    /// No table is sourced from the required category
    #[error("Category not found: no table maps from '{0}'")]
    CategoryNotFound(String),

    /// Chain resolution came back to a category it already visited
    #[error("Chain has a cycle at category '{0}'")]
    CyclicChain(String),

    /// Invalid range bounds
    #[error("Invalid range: start ({start}) > end ({end})")]
    InvalidRange { start: i64, end: i64 },

    /// Range given as (start, length) that is empty or overflows
    #[error("Invalid range length {length} for start {start}")]
    InvalidRangeLength { start: i64, length: i64 },
}

/// Errors that can occur during almanac parsing
#[derive(Debug, Error)]
pub enum AlmanacParseError {
    /// Missing or malformed `seeds:` line
    #[error("Invalid seeds line at line {line}: {message}")]
    InvalidSeeds { line: usize, message: String },

    /// Malformed `<source>-to-<destination> map:` header
    #[error("Invalid map header at line {line}: '{content}'")]
    InvalidMapHeader { line: usize, content: String },

    /// Rule line without exactly three fields, or outside a map block
    #[error("Invalid rule line at line {line}: {message}")]
    InvalidRuleLine { line: usize, message: String },

    /// Failed to parse integer
    #[error("Failed to parse integer '{value}' at line {line}: {message}")]
    ParseInt {
        line: usize,
        value: String,
        message: String,
    },

    /// Rule or table rejected by the engine
    #[error("Invalid table ending at line {line}: {source}")]
    Mapping {
        line: usize,
        #[source]
        source: MappingError,
    },

    /// File not found
    #[error("Almanac file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlmanacParseError {
    /// Line number the error refers to, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            AlmanacParseError::InvalidSeeds { line, .. }
            | AlmanacParseError::InvalidMapHeader { line, .. }
            | AlmanacParseError::InvalidRuleLine { line, .. }
            | AlmanacParseError::ParseInt { line, .. }
            | AlmanacParseError::Mapping { line, .. } => Some(*line),
            AlmanacParseError::FileNotFound(_) | AlmanacParseError::Io(_) => None,
        }
    }
}

/// Result type alias for FastRemap operations
pub type Result<T> = std::result::Result<T, FastRemapError>;

/// Result type alias for mapping construction
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Result type alias for almanac parsing operations
pub type AlmanacResult<T> = std::result::Result<T, AlmanacParseError>;
