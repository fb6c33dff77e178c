//! Integer points on the plane, for puzzles that reason about lines rather
//! than neighbouring cells.

use std::ops::{Add, Neg, Sub};

use num::Integer;

use crate::grid::{Coord, Dimensions};

/// A point with `x` growing to the right and `y` growing downwards, matching
/// [`Coord`]'s `col` and `row`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(self, other: Point) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn euclidean_distance_squared(self, other: Point) -> i64 {
        let d = other - self;
        d.x * d.x + d.y * d.y
    }

    /// The shortest lattice step from `self` towards `other`. Zero when the
    /// points are equal.
    pub fn direction_to(self, other: Point) -> Point {
        let d = other - self;
        let gcd = d.x.gcd(&d.y).max(1);
        Point::new(d.x / gcd, d.y / gcd)
    }

    pub fn is_collinear_with(self, b: Point, c: Point) -> bool {
        let (ab, ac) = (b - self, c - self);
        ab.x * ac.y == ac.x * ab.y
    }

    /// Whether `self` lies on the segment from `a` to `b`, endpoints included.
    pub fn is_between(self, a: Point, b: Point) -> bool {
        self.is_collinear_with(a, b)
            && (a.x.min(b.x)..=a.x.max(b.x)).contains(&self.x)
            && (a.y.min(b.y)..=a.y.max(b.y)).contains(&self.y)
    }

    /// The grid cell at this point, if it lies inside `dims`.
    pub fn to_coord(self, dims: Dimensions) -> Option<Coord> {
        let at = Coord::new(usize::try_from(self.y).ok()?, usize::try_from(self.x).ok()?);
        dims.contains(at).then_some(at)
    }
}

impl From<Coord> for Point {
    fn from(at: Coord) -> Self {
        Point::new(at.col as i64, at.row as i64)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Lattice points from `start` to `end`, both included.
#[derive(Debug, Clone)]
pub struct LinePoints {
    next: Option<Point>,
    end: Point,
    step: Point,
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let current = self.next?;
        self.next = (current != self.end).then(|| current + self.step);
        Some(current)
    }
}

/// Every lattice point on the segment between two points, stepping by
/// [`Point::direction_to`].
pub fn line_points(start: Point, end: Point) -> LinePoints {
    LinePoints {
        next: Some(start),
        end,
        step: start.direction_to(end),
    }
}

/// `start`, `start + step`, `start + 2 * step`, and so on.
pub fn ray(start: Point, step: Point) -> impl Iterator<Item = Point> {
    std::iter::successors(Some(start), move |&p| Some(p + step))
}

/// Each unordered pair of distinct positions in `points`.
pub fn point_pairs(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| points[i + 1..].iter().map(move |&b| (a, b)))
}
