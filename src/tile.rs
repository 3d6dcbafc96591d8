use crate::{
    grid::{Direction, OffsetCoordinate, SquareGrid},
    tile_component::Terrain,
    tile_map::TileMap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// `Tile` represents a tile on the map, where the `usize` is the index of the current tile.
///
/// The index is row-major: `index = y * width + x`.
pub struct Tile(usize);

impl Tile {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Creates a `Tile` from an `OffsetCoordinate` according to the specified `SquareGrid`.
    ///
    /// Returns `None` if the coordinate lies outside the grid.
    pub fn from_offset(offset_coordinate: OffsetCoordinate, grid: SquareGrid) -> Option<Self> {
        grid.offset_to_tile(offset_coordinate)
    }

    /// Get the index of the tile.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Converts a tile to the corresponding offset coordinate.
    pub fn to_offset(&self, grid: SquareGrid) -> OffsetCoordinate {
        grid.tile_to_offset(*self)
    }

    /// Returns the point-mirror of the tile.
    #[inline]
    pub const fn mirror(&self, grid: SquareGrid) -> Self {
        grid.mirror(*self)
    }

    /// Returns the terrain of the tile.
    #[inline]
    pub fn terrain(&self, tile_map: &TileMap) -> Terrain {
        tile_map.terrain_list[self.0]
    }

    #[inline]
    pub fn set_terrain(&self, tile_map: &mut TileMap, terrain: Terrain) {
        tile_map.terrain_list[self.0] = terrain;
    }

    #[inline]
    pub fn is_water(&self, tile_map: &TileMap) -> bool {
        self.terrain(tile_map).is_water()
    }

    /// Returns an iterator over the in-grid neighboring tiles of the current tile.
    pub fn neighbor_tiles(&self, grid: SquareGrid) -> impl Iterator<Item = Self> {
        grid.neighbors(*self).into_iter().map(|(_, tile)| tile)
    }

    /// Retrieves the neighboring tile from the current tile in the specified direction.
    ///
    /// Returns `None` if the neighbor lies outside the map.
    pub fn neighbor_tile(&self, direction: Direction, grid: SquareGrid) -> Option<Self> {
        grid.neighbor(*self, direction)
    }

    /// Returns the directions in which the neighboring tile is water.
    pub fn water_directions(&self, tile_map: &TileMap) -> impl Iterator<Item = Direction> {
        tile_map
            .grid
            .neighbors(*self)
            .into_iter()
            .filter(move |(_, neighbor)| neighbor.is_water(tile_map))
            .map(|(direction, _)| direction)
    }
}
