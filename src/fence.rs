//! Fence lengths around regions: raw perimeter and straight sides.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::grid::{Coord, Dimensions};
use crate::region::Region;

/// The side of a cell a fence segment sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    fn offset(self) -> (isize, isize) {
        match self {
            Facing::Up => (-1, 0),
            Facing::Down => (1, 0),
            Facing::Left => (0, -1),
            Facing::Right => (0, 1),
        }
    }

    /// The line a segment lies on and its position along that line.
    fn line_and_position(self, at: Coord) -> (usize, usize) {
        match self {
            Facing::Up | Facing::Down => (at.row, at.col),
            Facing::Left | Facing::Right => (at.col, at.row),
        }
    }
}

/// Unit fence segments grouped by (facing, line).
#[derive(Debug, Default)]
struct Fences {
    lines: FxHashMap<(Facing, usize), Vec<usize>>,
}

impl Fences {
    fn around(region: &Region, outside: impl Fn(Coord) -> bool) -> Self {
        let mut fences = Fences::default();
        for at in region.iter() {
            for facing in Facing::ALL {
                let (d_row, d_col) = facing.offset();
                let fenced = match at.offset(d_row, d_col) {
                    Some(next) => outside(next) || !region.contains(next),
                    None => true,
                };
                if fenced {
                    let (line, position) = facing.line_and_position(at);
                    fences.lines.entry((facing, line)).or_default().push(position);
                }
            }
        }
        fences
    }

    fn segments(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    /// Number of maximal runs of consecutive positions on each line.
    fn sides(mut self) -> usize {
        self.lines
            .values_mut()
            .map(|positions| {
                positions.sort_unstable();
                1 + positions.windows(2).filter(|w| w[1] != w[0] + 1).count()
            })
            .sum()
    }
}

/// Count cell edges whose orthogonal neighbour is off the grid or outside the
/// region.
pub fn perimeter(dims: Dimensions, region: &Region) -> Result<usize> {
    if region.is_empty() {
        return Err(Error::EmptyRegion);
    }
    Ok(Fences::around(region, |at| !dims.contains(at)).segments())
}

/// Count straight sides: maximal runs of fence segments with the same facing
/// on the same row or column.
///
/// Holes contribute their own sides, and segments that only meet at a corner
/// never merge.
pub fn side_count(region: &Region) -> Result<usize> {
    if region.is_empty() {
        return Err(Error::EmptyRegion);
    }
    Ok(Fences::around(region, |_| false).sides())
}

/// Area, perimeter and side count of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceCost {
    pub area: usize,
    pub perimeter: usize,
    pub sides: usize,
}

impl FenceCost {
    pub fn price(&self) -> usize {
        self.area * self.perimeter
    }

    pub fn bulk_price(&self) -> usize {
        self.area * self.sides
    }
}

/// Measure a region in one pass over its cells.
pub fn measure(dims: Dimensions, region: &Region) -> Result<FenceCost> {
    if region.is_empty() {
        return Err(Error::EmptyRegion);
    }
    let fences = Fences::around(region, |at| !dims.contains(at));
    Ok(FenceCost {
        area: region.len(),
        perimeter: fences.segments(),
        sides: fences.sides(),
    })
}
