//! FastRemap CLI entry point
//!
//! Reads an almanac file and maps seeds through its category chain.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fast_remap::core::{build_chain, parse_almanac_file, Almanac, MappingChain, Range, RangeMapper, SeedMode};
use fast_remap::solver::{self, DEFAULT_FROM, DEFAULT_TO};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// How seed numbers are interpreted (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum SeedModeArg {
    /// Every number is a seed
    #[default]
    #[value(name = "points")]
    Points,
    /// Numbers are (start, length) pairs
    #[value(name = "ranges")]
    Ranges,
}

impl From<SeedModeArg> for SeedMode {
    fn from(arg: SeedModeArg) -> Self {
        match arg {
            SeedModeArg::Points => SeedMode::Points,
            SeedModeArg::Ranges => SeedMode::Ranges,
        }
    }
}

#[derive(Parser)]
#[command(name = "fast-remap")]
#[command(about = "Map seeds and seed ranges through almanac category chains")]
#[command(version)]
#[command(author = "FastRemap Contributors")]
struct Cli {
    /// Category to start from
    #[arg(long, global = true, default_value = DEFAULT_FROM)]
    from: String,

    /// Category to end at
    #[arg(long, global = true, default_value = DEFAULT_TO)]
    to: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print both answers: lowest value for single seeds and for seed ranges
    Solve {
        /// Almanac file (plain, .gz or .bz2)
        almanac: PathBuf,
        /// Number of threads for range queries
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
    /// Print the lowest destination value for one seed interpretation
    Lowest {
        /// Almanac file (plain, .gz or .bz2)
        almanac: PathBuf,
        /// Seed interpretation: points or ranges
        #[arg(short = 's', long, default_value = "points")]
        seeds: SeedModeArg,
        /// Number of threads for range queries
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
    /// Map individual values through the chain
    Lookup {
        /// Almanac file (plain, .gz or .bz2)
        almanac: PathBuf,
        /// Values to map
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },
    /// Map one range given as start and length, printing the output ranges
    Ranges {
        /// Almanac file (plain, .gz or .bz2)
        almanac: PathBuf,
        /// First value of the range
        #[arg(allow_negative_numbers = true)]
        start: i64,
        /// Number of values in the range
        length: i64,
    },
}

fn load_almanac(path: &Path) -> anyhow::Result<Almanac> {
    let start = Instant::now();
    eprintln!("Loading almanac: {:?}", path);

    let almanac = parse_almanac_file(path)
        .with_context(|| format!("Failed to load almanac {}", path.display()))?;

    eprintln!(
        "Almanac loaded in {:.3}s ({} seeds, {} tables, {} rules)",
        start.elapsed().as_secs_f64(),
        almanac.seeds.len(),
        almanac.tables.len(),
        almanac.total_rules()
    );

    Ok(almanac)
}

fn resolve_chain(almanac: &Almanac, from: &str, to: &str) -> anyhow::Result<MappingChain> {
    let chain = build_chain(&almanac.tables, from, to)
        .with_context(|| format!("Failed to resolve {} -> {} chain", from, to))?;
    eprintln!("Chain: {}", chain.categories().join(" -> "));
    Ok(chain)
}

fn format_answer(lowest: Option<i64>) -> String {
    match lowest {
        Some(value) => value.to_string(),
        None => "none (no seeds)".to_string(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Solve { almanac, threads } => {
            let almanac = load_almanac(&almanac)?;

            let points = solver::lowest_location(&almanac, SeedMode::Points, &cli.from, &cli.to, threads)?;
            let ranges = solver::lowest_location(&almanac, SeedMode::Ranges, &cli.from, &cli.to, threads)?;

            println!("Part 1 (seeds):       {}", format_answer(points.lowest));
            println!("Part 2 (seed ranges): {}", format_answer(ranges.lowest));

            eprintln!("\n=== Statistics ===");
            eprintln!("Chain length:    {}", points.chain_length);
            eprintln!("Seeds:           {}", points.seeds);
            eprintln!("Seed ranges:     {}", ranges.seeds);
            eprintln!("Output ranges:   {}", ranges.output_ranges);
            eprintln!("Time elapsed:    {:.3}s", start.elapsed().as_secs_f64());
        }

        Commands::Lowest { almanac, seeds, threads } => {
            let almanac = load_almanac(&almanac)?;
            let answer = solver::lowest_location(&almanac, seeds.into(), &cli.from, &cli.to, threads)?;

            println!("{}", format_answer(answer.lowest));

            eprintln!("\n=== Statistics ===");
            eprintln!("Chain length:    {}", answer.chain_length);
            eprintln!("Seeds:           {}", answer.seeds);
            eprintln!("Outputs:         {}", answer.output_ranges);
            eprintln!("Time elapsed:    {:.3}s", start.elapsed().as_secs_f64());
        }

        Commands::Lookup { almanac, values } => {
            let almanac = load_almanac(&almanac)?;
            let mapper = RangeMapper::new(resolve_chain(&almanac, &cli.from, &cli.to)?);

            for (value, mapped) in values.iter().zip(mapper.map_points(&values)) {
                println!("{}\t{}", value, mapped);
            }
        }

        Commands::Ranges { almanac, start: range_start, length } => {
            let almanac = load_almanac(&almanac)?;
            let mapper = RangeMapper::new(resolve_chain(&almanac, &cli.from, &cli.to)?);

            let source = Range::from_start_len(range_start, length)
                .context("Invalid source range")?;
            let mapped = mapper.map_range(source);

            for range in &mapped {
                println!("{}-{}", range.start(), range.end());
            }
            eprintln!("{} output ranges from {}", mapped.len(), source);
        }
    }

    Ok(())
}
