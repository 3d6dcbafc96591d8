use glam::IVec2;

/// A coordinate in the offset coordinate system of a square grid.
///
/// `x` is the column and `y` is the row. The origin `(0, 0)` is the top-left
/// corner of the map and rows grow downward, matching the row-major storage
/// of the tile map.
///
/// # Coordinate Ranges
///
/// `width` and `height` are the dimensions of the grid, and they define the valid ranges for the x and y coordinates:
/// `x ∈ [0, width)`, `y ∈ [0, height)`. Maps never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetCoordinate(pub IVec2);

impl OffsetCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub const fn x(self) -> i32 {
        self.0.x
    }

    pub const fn y(self) -> i32 {
        self.0.y
    }

    pub const fn into_inner(self) -> IVec2 {
        self.0
    }

    pub const fn to_array(self) -> [i32; 2] {
        [self.0.x, self.0.y]
    }
}
