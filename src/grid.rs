//! Rectangular grids addressed by `(row, col)`.

use std::ops::Index;

use crate::error::{Error, Result};

/// A cell position. `row` grows downwards, `col` grows to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step by a signed offset. `None` if either component would go negative.
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

/// Height and width of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    #[inline]
    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.height && at.col < self.width
    }

    /// Row-major index of `at`, if it lies inside.
    #[inline]
    pub fn index(&self, at: Coord) -> Option<usize> {
        self.contains(at).then(|| at.row * self.width + at.col)
    }

    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index / self.width, index % self.width)
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }
}

/// Which cells count as touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Adjacency {
    /// Up, down, left, right.
    #[default]
    Orthogonal,
    /// The four orthogonal neighbours followed by the four diagonal ones.
    WithDiagonals,
}

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const WITH_DIAGONALS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Adjacency {
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Adjacency::Orthogonal => &ORTHOGONAL,
            Adjacency::WithDiagonals => &WITH_DIAGONALS,
        }
    }
}

/// An immutable, rectangular 2D array stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    dims: Dimensions,
}

impl<T> Grid<T> {
    /// Build a grid from rows. Fails with [`Error::Shape`] on ragged input.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(Error::Shape {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            cells,
            dims: Dimensions { height, width },
        })
    }

    /// Build a grid from row-major cells. The cell count must be a multiple of
    /// `width`.
    pub fn from_cells(width: usize, cells: Vec<T>) -> Result<Self> {
        if width == 0 {
            return match cells.len() {
                0 => Ok(Self {
                    cells,
                    dims: Dimensions { height: 0, width: 0 },
                }),
                found => Err(Error::Shape {
                    row: 0,
                    expected: 0,
                    found,
                }),
            };
        }
        let remainder = cells.len() % width;
        if remainder != 0 {
            return Err(Error::Shape {
                row: cells.len() / width,
                expected: width,
                found: remainder,
            });
        }
        let height = cells.len() / width;
        Ok(Self {
            cells,
            dims: Dimensions { height, width },
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Option<&T> {
        self.dims.index(at).map(|i| &self.cells[i])
    }

    /// In-bounds neighbours of `at`.
    ///
    /// Orthogonal order is up, down, left, right; diagonals follow as
    /// down-right, down-left, up-right, up-left.
    pub fn neighbors(&self, at: Coord, adjacency: Adjacency) -> impl Iterator<Item = Coord> + '_ {
        adjacency
            .offsets()
            .iter()
            .filter_map(move |&(d_row, d_col)| at.offset(d_row, d_col))
            .filter(move |n| self.dims.contains(*n))
    }

    /// Row-major iteration over `(Coord, &T)`.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (self.dims.coord(i), v))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks(0) panics, an empty grid has no rows anyway
        self.cells.chunks(self.dims.width.max(1))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            dims: self.dims,
        }
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, at: Coord) -> &T {
        match self.dims.index(at) {
            Some(i) => &self.cells[i],
            None => panic!(
                "{at:?} is outside a {}x{} grid",
                self.dims.height, self.dims.width
            ),
        }
    }
}
