use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom};
use tracing::{debug, warn};

use crate::{
    error::MapError, map_parameters::MapParameters, tile::Tile, tile_component::Terrain,
    tile_map::TileMap,
};

impl TileMap {
    /// Carves a land corridor joining the two headquarters.
    ///
    /// A walker leaves player one's headquarters and takes uniformly random steps onto water tiles,
    /// marking its path with [`Terrain::PlayerOneTrail`] and the mirrored path with [`Terrain::PlayerTwoTrail`].
    /// The walk succeeds as soon as the walker stands next to player two's trail.
    ///
    /// When the walker has no water left to step on, the map is restored to how it was before the attempt
    /// and the walk starts over. After `max_corridor_attempts` failed attempts this returns
    /// [`MapError::GenerationFailed`].
    ///
    /// On success every trail tile becomes [`Terrain::Plain`].
    pub fn carve_corridor(
        &mut self,
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> Result<(), MapError> {
        let snapshot = self.snapshot();

        for attempt in 1..=map_parameters.max_corridor_attempts {
            if let Some(length) = self.walk_corridor(random_number_generator) {
                self.all_tiles().for_each(|tile| {
                    if tile.terrain(self).is_trail() {
                        tile.set_terrain(self, Terrain::Plain);
                    }
                });
                debug!(attempt, length, "carved corridor");
                return Ok(());
            }
            self.restore(&snapshot);
        }

        warn!(
            attempts = map_parameters.max_corridor_attempts,
            "corridor walker never reached the opposing trail"
        );
        Err(MapError::GenerationFailed {
            attempts: map_parameters.max_corridor_attempts,
        })
    }

    /// Runs one walk. Returns the number of steps taken, or `None` if the walker got stuck.
    fn walk_corridor(&mut self, random_number_generator: &mut impl Rng) -> Option<usize> {
        let grid = self.grid;
        let mut current_tile = self.headquarters;
        self.set_terrain_mirrored(current_tile, Terrain::PlayerOneTrail, Terrain::PlayerTwoTrail);

        let mut length = 0;
        loop {
            let neighbor_tiles: ArrayVec<Tile, 4> = current_tile.neighbor_tiles(grid).collect();

            if neighbor_tiles
                .iter()
                .any(|neighbor_tile| neighbor_tile.terrain(self) == Terrain::PlayerTwoTrail)
            {
                return Some(length);
            }

            let water_tiles: ArrayVec<Tile, 4> = neighbor_tiles
                .into_iter()
                .filter(|neighbor_tile| neighbor_tile.is_water(self))
                .collect();

            let &next_tile = water_tiles.choose(random_number_generator)?;

            self.set_terrain_mirrored(next_tile, Terrain::PlayerOneTrail, Terrain::PlayerTwoTrail);
            current_tile = next_tile;
            length += 1;
        }
    }
}
