//! Connected regions of cells that pass a membership test.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Adjacency, Coord, Grid};
use crate::pool::WorkerPool;

/// Cells a flood visits between checks for a competing claim.
pub const CLAIM_CHECK_INTERVAL: usize = 64;

/// Decides which cell values belong to a region.
pub trait CellFilter<T>: Sync {
    fn matches(&self, value: &T) -> bool;
}

impl<T, F> CellFilter<T> for F
where
    F: Fn(&T) -> bool + Sync,
{
    fn matches(&self, value: &T) -> bool {
        self(value)
    }
}

/// Matches cells equal to the wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SameAs<T>(pub T);

impl<T: PartialEq + Sync> CellFilter<T> for SameAs<T> {
    fn matches(&self, value: &T) -> bool {
        *value == self.0
    }
}

/// A set of connected cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    cells: FxHashSet<Coord>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells.contains(&at)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    /// Cells in row-major order.
    pub fn sorted(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self.iter().collect();
        cells.sort_unstable();
        cells
    }
}

impl FromIterator<Coord> for Region {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Find all regions on rayon's global pool. See [`find_regions_with`].
pub fn find_regions<T, F>(
    grid: &Grid<T>,
    filter: &F,
    adjacency: Adjacency,
    min_size: usize,
) -> Result<Vec<Region>>
where
    T: Sync,
    F: CellFilter<T> + ?Sized,
{
    find_regions_with(&WorkerPool::Global, grid, filter, adjacency, min_size)
}

/// Partition the cells matching `filter` into connected regions.
///
/// Every matching cell ends up in exactly one region; regions smaller than
/// `min_size` are then dropped. Region membership depends only on the grid,
/// the filter and the adjacency, but the order of the returned regions is
/// unspecified.
///
/// Workers that start on the same component flood it concurrently until one
/// of them commits; the others notice the claim every
/// [`CLAIM_CHECK_INTERVAL`] cells and give up, so duplicated work per
/// component is bounded by that interval times the pool size.
pub fn find_regions_with<T, F>(
    pool: &WorkerPool,
    grid: &Grid<T>,
    filter: &F,
    adjacency: Adjacency,
    min_size: usize,
) -> Result<Vec<Region>>
where
    T: Sync,
    F: CellFilter<T> + ?Sized,
{
    if min_size == 0 {
        return Err(Error::InvalidMinSize(min_size));
    }

    let dims = grid.dimensions();
    let seeds: Vec<Coord> = grid
        .iter()
        .filter(|(_, value)| filter.matches(value))
        .map(|(at, _)| at)
        .collect();
    let claimed = Mutex::new(vec![false; dims.area()]);
    let is_claimed = |at: Coord| {
        let claimed = claimed.lock().unwrap_or_else(PoisonError::into_inner);
        dims.index(at).map_or(true, |i| claimed[i])
    };

    let regions = pool.filter_map(&seeds, |&seed| {
        if is_claimed(seed) {
            return None;
        }
        // Claim whole components only: racing workers flood identical cells
        // and the first commit wins.
        let region = flood(grid, filter, adjacency, seed, || is_claimed(seed))?;
        let mut claimed = claimed.lock().unwrap_or_else(PoisonError::into_inner);
        let seed_index = dims.index(seed)?;
        if claimed[seed_index] {
            return None;
        }
        for at in region.iter() {
            if let Some(i) = dims.index(at) {
                claimed[i] = true;
            }
        }
        drop(claimed);
        (region.len() >= min_size).then_some(region)
    });

    debug!(
        cells = seeds.len(),
        regions = regions.len(),
        sequential = pool.is_sequential(),
        "found regions"
    );
    Ok(regions)
}

/// Breadth-first flood from `seed`, or `None` once `abandon` says so.
fn flood<T, F>(
    grid: &Grid<T>,
    filter: &F,
    adjacency: Adjacency,
    seed: Coord,
    abandon: impl Fn() -> bool,
) -> Option<Region>
where
    F: CellFilter<T> + ?Sized,
{
    let mut cells = FxHashSet::default();
    cells.insert(seed);
    let mut queue = VecDeque::from([seed]);
    let mut visited = 0;
    while let Some(at) = queue.pop_front() {
        visited += 1;
        if visited % CLAIM_CHECK_INTERVAL == 0 && abandon() {
            return None;
        }
        for next in grid.neighbors(at, adjacency) {
            if filter.matches(&grid[next]) && cells.insert(next) {
                queue.push_back(next);
            }
        }
    }
    Some(Region { cells })
}
