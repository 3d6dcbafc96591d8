use tracing::debug;

use crate::{tile::Tile, tile_component::Terrain, tile_map::TileMap};

impl TileMap {
    /// Turns every water tile without a water neighbor into [`Terrain::Plain`].
    ///
    /// Such a tile only touches land, so filling it cannot isolate another water tile and a second call is a no-op.
    /// Its mirror is isolated as well, so the map stays symmetric.
    ///
    /// Returns the number of tiles filled.
    pub fn remove_lone_sea(&mut self) -> usize {
        let lone_sea_list = self.lone_sea_tiles();

        lone_sea_list
            .iter()
            .for_each(|tile| tile.set_terrain(self, Terrain::Plain));

        debug!(removed = lone_sea_list.len(), "removed lone sea tiles");
        lone_sea_list.len()
    }

    /// Water tiles without a water neighbor.
    pub fn lone_sea_tiles(&self) -> Vec<Tile> {
        self.all_tiles()
            .filter(|tile| tile.is_water(self) && tile.water_directions(self).next().is_none())
            .collect()
    }
}
