use std::ops::{Add, Sub};

use glam::IVec2;

use crate::grid::{direction::Direction, offset_coordinate::OffsetCoordinate};

/// A square cell position, used for neighbor and distance arithmetic.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Square(IVec2);

impl Square {
    /// Square edge directions, the directions of the edges of a `Square` relative to its center.
    ///
    /// The number outside Square-A is the index of the edge direction in this array.
    ///
    /// ```txt
    ///  ____________ ____________ ____________
    /// |            |            |            |
    /// |            |     3      |            |
    /// |____________|____________|____________|
    /// |            |            |            |
    /// |     2      |  Square-A  |     0      |
    /// |____________|____________|____________|
    /// |            |            |            |
    /// |            |     1      |            |
    /// |____________|____________|____________|
    /// ```
    pub const EDGE_DIRECTIONS: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// Square neighbor coordinates array, following [`Self::EDGE_DIRECTIONS`] order.
    ///
    /// Rows grow downward, so south is `+y`.
    pub const SQUARE_DIRECTIONS: [Self; 4] = [
        Self::new(1, 0),
        Self::new(0, 1),
        Self::new(-1, 0),
        Self::new(0, -1),
    ];

    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    /// Create a new [`Square`] from an [`OffsetCoordinate`].
    pub const fn from_offset(offset_coordinate: OffsetCoordinate) -> Self {
        Self(offset_coordinate.into_inner())
    }

    pub const fn x(&self) -> i32 {
        self.0.x
    }

    pub const fn y(&self) -> i32 {
        self.0.y
    }

    /// Convert the [`Square`] back to an [`OffsetCoordinate`].
    pub fn to_offset(self) -> OffsetCoordinate {
        OffsetCoordinate::new(self.x(), self.y())
    }

    #[inline]
    /// Get the index of `direction` in [`Self::EDGE_DIRECTIONS`].
    pub const fn edge_index(direction: Direction) -> usize {
        match direction {
            Direction::East => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::North => 3,
        }
    }

    /// Get [`Square`] at the given `direction` from `self`.
    pub fn neighbor(self, direction: Direction) -> Self {
        self + Self::SQUARE_DIRECTIONS[Self::edge_index(direction)]
    }

    #[inline]
    /// Computes coordinates length as a signed integer.
    /// The length of a [`Square`] coordinate is equal to its Manhattan distance from the origin.
    pub const fn length(self) -> i32 {
        self.0.x.abs() + self.0.y.abs()
    }

    #[inline]
    /// Computes the Manhattan distance from `self` to `rhs`.
    pub fn distance_to(self, rhs: Self) -> i32 {
        (self - rhs).length()
    }

    #[inline]
    /// Computes the straight-line distance from `self` to `rhs`.
    pub fn euclidean_distance_to(self, rhs: Self) -> f64 {
        (self - rhs).0.as_dvec2().length()
    }

    /// Return a [`Vec<Square>`] containing all [`Square`] around `self` in a given Manhattan `distance`, including `self`. \
    /// The number of returned squares is equal to `2 * distance * (distance + 1) + 1`.
    pub fn squares_in_distance(self, distance: u32) -> Vec<Self> {
        let mut square_list = Vec::with_capacity((2 * distance * (distance + 1) + 1) as usize);
        let radius = distance as i32;

        for x in -radius..=radius {
            let y_max = radius - x.abs();
            for y in -y_max..=y_max {
                square_list.push(self + Self::new(x, y));
            }
        }

        square_list
    }
}

impl Add for Square {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Square {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
