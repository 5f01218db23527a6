use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::ports::Edge;

/// A grid address. The grid is sparse: any `i32` pair is valid, occupied or not. Cells on the
/// `i32` limits have no neighbour past the limit.
///
/// Orientation follows screen convention: `y` grows downwards, so the cell above
/// `(x, y)` is `(x, y - 1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Unit offset pointing out of the given edge.
    #[inline]
    pub const fn step(edge: Edge) -> Coord {
        match edge {
            Edge::Top => Coord::new(0, -1),
            Edge::Left => Coord::new(-1, 0),
            Edge::Bottom => Coord::new(0, 1),
            Edge::Right => Coord::new(1, 0),
        }
    }

    /// The 4-connected neighbour across `edge`, or `None` past the `i32` range.
    #[inline]
    pub fn neighbor(self, edge: Edge) -> Option<Coord> {
        let d = Coord::step(edge);
        Some(Coord::new(self.x.checked_add(d.x)?, self.y.checked_add(d.y)?))
    }

    #[inline]
    pub fn l1(self) -> i32 {
        self.x.abs() + self.y.abs()
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Coord) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
