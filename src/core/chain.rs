//! Mapping chain resolution
//!
//! Tables declare a source and a destination category. A chain is the
//! ordered list of tables obtained by following those links:
//!
//! ```text
//! seed -> soil -> fertilizer -> ... -> location
//! ```
//!
//! The category index is built per call from the table pool, so resolution
//! is a pure function of `(pool, start, end)`.

use crate::core::error::{MappingError, MappingResult};
use crate::core::mapper::{map_range_through_table, sort_ranges};
use crate::core::range::Range;
use crate::core::table::MappingTable;
use std::collections::{HashMap, HashSet};

/// Ordered tables where each destination feeds the next source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingChain {
    start_category: String,
    end_category: String,
    tables: Vec<MappingTable>,
}

impl MappingChain {
    pub fn start_category(&self) -> &str {
        &self.start_category
    }

    pub fn end_category(&self) -> &str {
        &self.end_category
    }

    pub fn tables(&self) -> &[MappingTable] {
        &self.tables
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when start and end category are the same (identity chain)
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Categories visited, start to end
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![self.start_category.as_str()];
        categories.extend(self.tables.iter().map(|t| t.destination_category()));
        categories
    }

    /// Fold a value through every table (identity where no rule matches)
    ///
    /// # Examples
    /// ```
    /// use fast_remap::{build_chain, MappingTable};
    ///
    /// let pool = vec![MappingTable::from_triples("seed", "soil", &[(98, 50, 2), (50, 52, 48)]).unwrap()];
    /// let chain = build_chain(&pool, "seed", "soil").unwrap();
    /// assert_eq!(chain.map_point(79), 81);
    /// assert_eq!(chain.map_point(14), 14);
    /// ```
    pub fn map_point(&self, value: i64) -> i64 {
        self.tables
            .iter()
            .fold(value, |current, table| table.map_point(current))
    }

    /// Push a range through every table
    ///
    /// Each stage re-partitions every range produced by the previous one.
    /// Every output range is the image of a distinct piece of `source`, and
    /// together they hold exactly `source.len()` values. Sorted by start.
    pub fn map_range(&self, source: Range) -> Vec<Range> {
        let mut current = vec![source];

        for table in &self.tables {
            let mut next = Vec::with_capacity(current.len());
            for range in current {
                next.extend(map_range_through_table(range, table));
            }
            sort_ranges(&mut next);
            current = next;
        }

        current
    }
}

/// Resolve the chain of tables leading from `start` to `end`
///
/// # Errors
/// - [`MappingError::DuplicateSourceCategory`] if two tables in the pool
///   share a source category
/// - [`MappingError::CategoryNotFound`] if no table maps from a category on
///   the way (including dead ends before `end` is reached)
/// - [`MappingError::CyclicChain`] if the walk comes back to a category
///   already in the chain
///
/// `start == end` resolves to an empty chain, which maps every value to
/// itself.
pub fn build_chain(pool: &[MappingTable], start: &str, end: &str) -> MappingResult<MappingChain> {
    let mut by_source: HashMap<&str, &MappingTable> = HashMap::with_capacity(pool.len());
    for table in pool {
        if by_source.insert(table.source_category(), table).is_some() {
            return Err(MappingError::DuplicateSourceCategory(
                table.source_category().to_string(),
            ));
        }
    }

    let mut tables = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = start;
    visited.insert(current);

    while current != end {
        let table = by_source
            .get(current)
            .copied()
            .ok_or_else(|| MappingError::CategoryNotFound(current.to_string()))?;

        tables.push(table.clone());
        current = table.destination_category();

        if !visited.insert(current) {
            return Err(MappingError::CyclicChain(current.to_string()));
        }
    }

    log::debug!(
        "Resolved {} -> {} chain with {} tables",
        start,
        end,
        tables.len()
    );

    Ok(MappingChain {
        start_category: start.to_string(),
        end_category: end.to_string(),
        tables,
    })
}
