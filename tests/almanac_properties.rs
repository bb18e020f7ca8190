//! Almanac file loading and end-to-end answers
//!
//! Covers plain, gzip and bzip2 input files and the sample almanac answers.

use fast_remap::core::{detect_compression, AlmanacParseError, CompressionFormat};
use fast_remap::{lowest_for_points, lowest_for_ranges, parse_almanac_file, parse_almanac_str};
use proptest::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

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

fn write_plain(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_gzip(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn write_bzip2(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = bzip2::write::BzEncoder::new(file, bzip2::Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

#[test]
fn test_sample_answers() {
    let almanac = parse_almanac_str(SAMPLE).unwrap();
    assert_eq!(lowest_for_points(&almanac, "seed", "location").unwrap(), Some(35));
    assert_eq!(lowest_for_ranges(&almanac, "seed", "location", 1).unwrap(), Some(46));
}

#[test]
fn test_load_plain_file() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(dir.path(), "almanac.txt", SAMPLE);

    assert_eq!(detect_compression(&path).unwrap(), CompressionFormat::Plain);
    let almanac = parse_almanac_file(&path).unwrap();
    assert_eq!(almanac.tables.len(), 7);
    assert_eq!(lowest_for_points(&almanac, "seed", "location").unwrap(), Some(35));
}

#[test]
fn test_load_gzip_file() {
    let dir = TempDir::new().unwrap();
    let path = write_gzip(dir.path(), "almanac.gz", SAMPLE);
    assert_eq!(detect_compression(&path).unwrap(), CompressionFormat::Gzip);

    let almanac = parse_almanac_file(&path).unwrap();
    assert_eq!(lowest_for_ranges(&almanac, "seed", "location", 2).unwrap(), Some(46));
}

#[test]
fn test_gzip_detected_by_magic_bytes() {
    let dir = TempDir::new().unwrap();
    let path = write_gzip(dir.path(), "almanac.dat", SAMPLE);
    assert_eq!(detect_compression(&path).unwrap(), CompressionFormat::Gzip);
    assert_eq!(parse_almanac_file(&path).unwrap().seeds, vec![79, 14, 55, 13]);
}

#[test]
fn test_load_bzip2_file() {
    let dir = TempDir::new().unwrap();
    let path = write_bzip2(dir.path(), "almanac.input", SAMPLE);
    assert_eq!(detect_compression(&path).unwrap(), CompressionFormat::Bzip2);

    let almanac = parse_almanac_file(&path).unwrap();
    assert_eq!(lowest_for_points(&almanac, "seed", "location").unwrap(), Some(35));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = parse_almanac_file(&dir.path().join("nope.txt"));
    assert!(matches!(result, Err(AlmanacParseError::FileNotFound(_))));
}

#[test]
fn test_error_line_number_in_file() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(dir.path(), "bad.txt", "seeds: 1 2\n\na-to-b map:\n1 2 3\n4 five 6\n");
    let err = parse_almanac_file(&path).unwrap_err();
    assert_eq!(err.line(), Some(5));
    assert!(err.to_string().contains("five"));
}

/// Render seeds and rule specs as almanac text
fn render(seeds: &[i64], stages: &[Vec<(i64, i64, i64)>]) -> String {
    let names = ["seed", "soil", "water", "location"];
    let mut text = format!(
        "seeds: {}\n",
        seeds.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ")
    );
    for (i, rules) in stages.iter().enumerate() {
        text.push_str(&format!("\n{}-to-{} map:\n", names[i], names[i + 1]));
        for (source, destination, length) in rules {
            text.push_str(&format!("{} {} {}\n", destination, source, length));
        }
    }
    text
}

fn arb_stage() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
    prop::collection::vec((0i64..30, 1i64..40, 0i64..500), 0..5).prop_map(|specs| {
        let mut next_start = 0i64;
        specs
            .into_iter()
            .map(|(gap, length, destination)| {
                let source = next_start + gap;
                next_start = source + length;
                (source, destination, length)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Range answer equals the brute-force minimum over every seed value
    #[test]
    fn prop_range_answer_matches_brute_force(
        pairs in prop::collection::vec((0i64..300, 1i64..40), 1..5),
        stages in prop::collection::vec(arb_stage(), 3),
    ) {
        let seeds: Vec<i64> = pairs.iter().flat_map(|&(s, l)| [s, l]).collect();
        let almanac = parse_almanac_str(&render(&seeds, &stages)).unwrap();

        let expanded: Vec<i64> = pairs
            .iter()
            .flat_map(|&(start, length)| start..start + length)
            .collect();
        let brute = fast_remap::Almanac::new(expanded, almanac.tables.clone());

        prop_assert_eq!(
            lowest_for_ranges(&almanac, "seed", "location", 1).unwrap(),
            lowest_for_points(&brute, "seed", "location").unwrap()
        );
    }
}
