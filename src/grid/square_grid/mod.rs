use arrayvec::ArrayVec;

use crate::{
    grid::{Size, direction::Direction, offset_coordinate::OffsetCoordinate},
    tile::Tile,
};

use square::Square;

pub mod square;

/// A bounded, non-wrapping grid of square tiles stored in row-major order.
///
/// The grid owns the point-symmetry transform of the map: `mirror(x, y) = (width - 1 - x, height - 1 - y)`.
/// In row-major order this is simply `width * height - 1 - index`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareGrid {
    pub size: Size,
}

impl SquareGrid {
    pub const fn new(size: Size) -> Self {
        Self { size }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.size.height
    }

    /// The number of tiles in the grid.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.size.width * self.size.height) as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the board diagonal, in tiles.
    pub fn diagonal(&self) -> f64 {
        (self.width() as f64).hypot(self.height() as f64)
    }

    /// Returns the tile at `offset_coordinate`, or `None` if it lies outside the grid.
    pub fn offset_to_tile(&self, offset_coordinate: OffsetCoordinate) -> Option<Tile> {
        let [x, y] = offset_coordinate.to_array();
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return None;
        }
        Some(Tile::new(y as usize * self.width() as usize + x as usize))
    }

    /// Converts a tile to its offset coordinate.
    pub fn tile_to_offset(&self, tile: Tile) -> OffsetCoordinate {
        let width = self.width() as usize;
        OffsetCoordinate::new((tile.index() % width) as i32, (tile.index() / width) as i32)
    }

    /// Returns the point-mirror of `tile`.
    ///
    /// The mirror of the centre tile of an odd × odd grid is the tile itself.
    #[inline]
    pub const fn mirror(&self, tile: Tile) -> Tile {
        Tile::new(self.len() - 1 - tile.index())
    }

    /// Returns the neighbor of `tile` in `direction`, or `None` at the map edge.
    pub fn neighbor(&self, tile: Tile, direction: Direction) -> Option<Tile> {
        let square = Square::from_offset(self.tile_to_offset(tile));
        self.offset_to_tile(square.neighbor(direction).to_offset())
    }

    /// Returns every in-grid neighbor of `tile` together with the direction leading to it,
    /// following [`Square::EDGE_DIRECTIONS`] order.
    pub fn neighbors(&self, tile: Tile) -> ArrayVec<(Direction, Tile), 4> {
        Square::EDGE_DIRECTIONS
            .into_iter()
            .filter_map(|direction| {
                self.neighbor(tile, direction)
                    .map(|neighbor| (direction, neighbor))
            })
            .collect()
    }

    /// Returns the in-grid tiles whose Manhattan distance from `tile` is at most `distance`, including `tile`.
    pub fn tiles_in_distance(&self, tile: Tile, distance: u32) -> impl Iterator<Item = Tile> + '_ {
        Square::from_offset(self.tile_to_offset(tile))
            .squares_in_distance(distance)
            .into_iter()
            .filter_map(|square| self.offset_to_tile(square.to_offset()))
    }

    /// Manhattan distance between two tiles.
    pub fn manhattan_distance(&self, a: Tile, b: Tile) -> u32 {
        Square::from_offset(self.tile_to_offset(a))
            .distance_to(Square::from_offset(self.tile_to_offset(b))) as u32
    }

    /// Straight-line distance between two tiles.
    pub fn euclidean_distance(&self, a: Tile, b: Tile) -> f64 {
        Square::from_offset(self.tile_to_offset(a))
            .euclidean_distance_to(Square::from_offset(self.tile_to_offset(b)))
    }
}
