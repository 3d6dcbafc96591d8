//! This module defines the [`TileMap`] struct and its associated methods.
//! Its methods contain 2 parts:
//! 1. The common methods shared by every generation stage, included in the `mod.rs` file.
//! 2. The generation stages themselves, defined in the [`impls`] module (which is the submodule of this module).

use enum_map::EnumMap;

use crate::{grid::SquareGrid, tile::Tile, tile_component::Terrain};

mod impls;

pub use impls::*;

/// A symmetric two-player map under construction.
///
/// The map is created once by [`TileMap::initialize`], mutated in place by every generation stage,
/// and handed over read-only at the end.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TileMap {
    /// Grid of the map.
    pub grid: SquareGrid,
    /// Seed the map was generated from. Also the name of the output file.
    pub seed: u64,
    /// Terrain of each tile. The index of the terrain is equal to [`Tile::index()`].
    pub terrain_list: Vec<Terrain>,
    /// Player one's headquarters. Player two's is its mirror.
    pub headquarters: Tile,
}

/// A copy of the terrain of every tile, used to roll back a failed stage.
#[derive(Clone, Debug)]
pub struct Snapshot(Vec<Terrain>);

impl TileMap {
    /// Creates an all-sea tile map.
    pub fn new(grid: SquareGrid, seed: u64, headquarters: Tile) -> Self {
        Self {
            grid,
            seed,
            terrain_list: vec![Terrain::Sea; grid.len()],
            headquarters,
        }
    }

    /// Returns an iterator over all tiles in the map.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + use<> {
        (0..self.grid.len()).map(Tile::new)
    }

    /// Returns player one's and player two's headquarters.
    pub fn headquarters_pair(&self) -> (Tile, Tile) {
        (self.headquarters, self.headquarters.mirror(self.grid))
    }

    /// Sets `terrain` on `tile` and `mirror_terrain` on its mirror.
    ///
    /// Returns how many tiles changed from water to land, so callers can keep a land count.
    /// When `tile` is its own mirror only `terrain` is written.
    pub fn set_terrain_mirrored(&mut self, tile: Tile, terrain: Terrain, mirror_terrain: Terrain) -> usize {
        let mirror = tile.mirror(self.grid);
        let mut new_land = 0;

        if tile.is_water(self) && terrain.is_land() {
            new_land += 1;
        }
        tile.set_terrain(self, terrain);

        if mirror != tile {
            if mirror.is_water(self) && mirror_terrain.is_land() {
                new_land += 1;
            }
            mirror.set_terrain(self, mirror_terrain);
        }

        new_land
    }

    /// Takes a deep copy of the terrain of every tile.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.terrain_list.clone())
    }

    /// Rolls the terrain back to `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.terrain_list.clone_from(&snapshot.0);
    }

    /// The number of tiles that are not water.
    pub fn land_count(&self) -> usize {
        self.terrain_list
            .iter()
            .filter(|terrain| terrain.is_land())
            .count()
    }

    /// How many tiles of each terrain the map holds.
    pub fn terrain_counts(&self) -> EnumMap<Terrain, usize> {
        let mut counts = EnumMap::default();
        for &terrain in &self.terrain_list {
            counts[terrain] += 1;
        }
        counts
    }

    /// Checks the map invariant: a tile is land iff its mirror is land.
    pub fn is_land_symmetric(&self) -> bool {
        self.all_tiles()
            .all(|tile| tile.is_water(self) == tile.mirror(self.grid).is_water(self))
    }
}
