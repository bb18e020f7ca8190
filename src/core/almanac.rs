//! Almanac file parsing
//!
//! # Almanac Format
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//!
//! soil-to-fertilizer map:
//! 0 15 37
//! ```
//!
//! - The first non-empty line lists the seeds
//! - Each map block starts with a `<source>-to-<destination> map:` header
//! - Rule lines contain: destination start, source start, length
//! - Blank lines end a block; lines starting with `#` are ignored

use crate::core::error::{AlmanacParseError, AlmanacResult};
use crate::core::range::Range;
use crate::core::table::{MappingRule, MappingTable};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// How the numbers on the `seeds:` line are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Every number is one seed
    #[default]
    Points,
    /// Numbers come in `(start, length)` pairs
    Ranges,
}

impl SeedMode {
    /// Parse from string (for CLI argument)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "points" | "point" | "single" => Some(SeedMode::Points),
            "ranges" | "range" | "pairs" => Some(SeedMode::Ranges),
            _ => None,
        }
    }
}

/// Parsed almanac: seed numbers plus the unordered table pool
#[derive(Debug, Clone, Default)]
pub struct Almanac {
    /// Raw numbers from the seeds line
    pub seeds: Vec<i64>,
    /// Tables in file order
    pub tables: Vec<MappingTable>,
    /// Line number of the seeds line (1-based, 0 if built in code)
    pub seeds_line: usize,
}

impl Almanac {
    pub fn new(seeds: Vec<i64>, tables: Vec<MappingTable>) -> Self {
        Self {
            seeds,
            tables,
            seeds_line: 0,
        }
    }

    /// Seeds read as single values
    pub fn seed_points(&self) -> &[i64] {
        &self.seeds
    }

    /// Seeds read as `(start, length)` pairs
    ///
    /// Fails if the count is odd or a pair does not describe a valid range.
    pub fn seed_ranges(&self) -> AlmanacResult<Vec<Range>> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacParseError::InvalidSeeds {
                line: self.seeds_line,
                message: format!(
                    "expected (start, length) pairs, got {} numbers",
                    self.seeds.len()
                ),
            });
        }

        self.seeds
            .chunks_exact(2)
            .map(|pair| {
                Range::from_start_len(pair[0], pair[1]).map_err(|e| {
                    AlmanacParseError::InvalidSeeds {
                        line: self.seeds_line,
                        message: e.to_string(),
                    }
                })
            })
            .collect()
    }

    /// Seeds as ranges under the given mode (points become one-value ranges)
    pub fn seeds_as_ranges(&self, mode: SeedMode) -> AlmanacResult<Vec<Range>> {
        match mode {
            SeedMode::Points => Ok(self.seeds.iter().map(|&s| Range::point(s)).collect()),
            SeedMode::Ranges => self.seed_ranges(),
        }
    }

    /// Total rule count across all tables
    pub fn total_rules(&self) -> usize {
        self.tables.iter().map(|t| t.len()).sum()
    }
}

/// Map block being collected
struct PendingTable {
    source: String,
    destination: String,
    rules: Vec<MappingRule>,
}

impl PendingTable {
    fn finish(self, line_number: usize) -> AlmanacResult<MappingTable> {
        MappingTable::new(self.source, self.destination, self.rules)
            .map_err(|source| AlmanacParseError::Mapping { line: line_number, source })
    }
}

/// Parse the `seeds: ...` line
fn parse_seeds(line: &str, line_number: usize) -> AlmanacResult<Vec<i64>> {
    let values = line
        .strip_prefix("seeds:")
        .ok_or_else(|| AlmanacParseError::InvalidSeeds {
            line: line_number,
            message: format!(
                "expected 'seeds:' line, got '{}'",
                line.chars().take(100).collect::<String>()
            ),
        })?;

    values
        .split_whitespace()
        .map(|value| parse_number("seed", value, line_number))
        .collect()
}

/// Parse a `<source>-to-<destination> map:` header
fn parse_map_header(line: &str, line_number: usize) -> AlmanacResult<(String, String)> {
    let invalid = || AlmanacParseError::InvalidMapHeader {
        line: line_number,
        content: line.chars().take(100).collect(),
    };

    let name = line.strip_suffix("map:").ok_or_else(invalid)?.trim();
    let (source, destination) = name.split_once("-to-").ok_or_else(invalid)?;

    let valid = |category: &str| !category.is_empty() && !category.contains(char::is_whitespace);
    if !valid(source) || !valid(destination) {
        return Err(invalid());
    }

    Ok((source.to_string(), destination.to_string()))
}

/// Parse a `destination source length` rule line
fn parse_rule(line: &str, line_number: usize) -> AlmanacResult<MappingRule> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() != 3 {
        return Err(AlmanacParseError::InvalidRuleLine {
            line: line_number,
            message: format!("expected 3 fields, got {}", fields.len()),
        });
    }

    let destination_start = parse_number("destination start", fields[0], line_number)?;
    let source_start = parse_number("source start", fields[1], line_number)?;
    let length = parse_number("length", fields[2], line_number)?;

    MappingRule::new(source_start, destination_start, length)
        .map_err(|source| AlmanacParseError::Mapping { line: line_number, source })
}

fn parse_number(field: &str, value: &str, line_number: usize) -> AlmanacResult<i64> {
    value.parse::<i64>().map_err(|e| AlmanacParseError::ParseInt {
        line: line_number,
        value: value.to_string(),
        message: format!("invalid {}: {}", field, e),
    })
}

/// Parse an almanac from a reader
///
/// This function handles the core parsing logic, supporting any `BufRead` source.
pub fn parse_almanac_reader<R: BufRead>(reader: R) -> AlmanacResult<Almanac> {
    let mut almanac = Almanac::default();
    let mut seeds: Option<Vec<i64>> = None;
    let mut pending: Option<PendingTable> = None;
    let mut line_number: usize = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.starts_with('#') {
            continue;
        }

        // Blank line closes the current block
        if trimmed.is_empty() {
            if let Some(table) = pending.take() {
                almanac.tables.push(table.finish(line_number - 1)?);
            }
            continue;
        }

        if seeds.is_none() {
            seeds = Some(parse_seeds(trimmed, line_number)?);
            almanac.seeds_line = line_number;
            continue;
        }

        if trimmed.ends_with("map:") {
            if let Some(table) = pending.take() {
                almanac.tables.push(table.finish(line_number - 1)?);
            }
            let (source, destination) = parse_map_header(trimmed, line_number)?;
            pending = Some(PendingTable {
                source,
                destination,
                rules: Vec::new(),
            });
            continue;
        }

        match pending.as_mut() {
            Some(table) => table.rules.push(parse_rule(trimmed, line_number)?),
            None => {
                return Err(AlmanacParseError::InvalidRuleLine {
                    line: line_number,
                    message: "rule line outside of a map block".to_string(),
                })
            }
        }
    }

    if let Some(table) = pending.take() {
        almanac.tables.push(table.finish(line_number)?);
    }

    almanac.seeds = seeds.ok_or(AlmanacParseError::InvalidSeeds {
        line: line_number,
        message: "missing 'seeds:' line".to_string(),
    })?;

    log::debug!(
        "Parsed almanac: {} seeds, {} tables, {} rules",
        almanac.seeds.len(),
        almanac.tables.len(),
        almanac.total_rules()
    );

    Ok(almanac)
}

/// Compression format for almanac files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file extension and magic bytes
pub fn detect_compression(path: &Path) -> AlmanacResult<CompressionFormat> {
    use std::fs::File;
    use std::io::Read;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh"
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Parse an almanac file from a path
///
/// Gzip and bzip2 input is decompressed transparently.
pub fn parse_almanac_file(path: &Path) -> AlmanacResult<Almanac> {
    use std::fs::File;

    if !path.exists() {
        return Err(AlmanacParseError::FileNotFound(path.to_path_buf()));
    }

    let format = detect_compression(path)?;
    let file = File::open(path)?;

    match format {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::GzDecoder::new(file);
            parse_almanac_reader(BufReader::with_capacity(128 * 1024, decoder))
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::BzDecoder::new(file);
            parse_almanac_reader(BufReader::with_capacity(128 * 1024, decoder))
        }
        CompressionFormat::Plain => {
            parse_almanac_reader(BufReader::with_capacity(128 * 1024, file))
        }
    }
}

/// Parse an almanac held in memory
pub fn parse_almanac_str(input: &str) -> AlmanacResult<Almanac> {
    parse_almanac_reader(BufReader::new(input.as_bytes()))
}
