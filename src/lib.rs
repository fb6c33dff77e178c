pub mod config;
pub mod dijkstra;
pub mod error;
pub mod fence;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod parse;
pub mod pool;
pub mod region;
mod solutions;

use std::path::Path;

use anyhow::Context;

pub use config::Config;
pub use dijkstra::{dijkstra, DijkstraCache, DistanceMap, PathFinder};
pub use error::{Error, Result};
pub use fence::{measure, perimeter, side_count, FenceCost};
pub use geometry::Point;
pub use graph::{FxIndexMap, GraphVersion, WeightedGraph};
pub use grid::{Adjacency, Coord, Dimensions, Grid};
pub use parse::{extract_ints, extract_words, Parser};
pub use pool::WorkerPool;
pub use region::{find_regions, find_regions_with, CellFilter, Region, SameAs};
pub use solutions::*;

pub type Solution = fn(&str) -> anyhow::Result<(usize, usize)>;

pub const ALL_SOLUTIONS: &[(usize, Solution)] = &[
    (1, day1),
    (2, day2),
    (3, day3),
    (4, day4),
    (5, day5),
    (6, day6),
    (7, day7),
    (8, day8),
    (9, day9),
    (10, day10),
    (11, day11),
    (12, day12),
    (14, day14),
];

pub fn load_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn default_input(n: usize) -> anyhow::Result<String> {
    load_input(&Config::default().input_path(n))
}

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters!
pub fn parse_uint_from_bytes(bytes: &[u8]) -> usize {
    let mut ret = 0;
    for b in bytes {
        ret = ret * 10 + (b - b'0') as usize;
    }
    ret
}
