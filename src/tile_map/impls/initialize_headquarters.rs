use rand::Rng;
use tracing::debug;

use crate::{map_parameters::MapParameters, tile::Tile, tile_map::TileMap};

impl TileMap {
    /// Creates an all-sea map and chooses player one's headquarters.
    ///
    /// The headquarters is drawn uniformly from the top-left block of the map whose extent keeps it at least
    /// `min_starting_distance` of each axis away from its mirror:
    ///
    /// `max_x = floor((width - 1) * (1 - min_starting_distance) / 2)`, and the same for `y`.
    ///
    /// Then `mirror_x - x = width - 1 - 2x >= (width - 1) * min_starting_distance`.
    pub fn initialize(
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> Self {
        let grid = map_parameters.grid();
        let keep = 1.0 - map_parameters.min_starting_distance;

        let max_x = ((grid.width() - 1) as f64 * keep / 2.0).floor() as usize;
        let max_y = ((grid.height() - 1) as f64 * keep / 2.0).floor() as usize;

        let mut x = random_number_generator.random_range(0..=max_x);
        let y = random_number_generator.random_range(0..=max_y);

        // The centre of an odd board is its own mirror, step off it so both players get a headquarters.
        if x * 2 + 1 == grid.width() as usize && y * 2 + 1 == grid.height() as usize {
            x -= 1;
        }

        let headquarters = Tile::new(y * grid.width() as usize + x);
        debug!(x, y, "placed headquarters");

        TileMap::new(grid, map_parameters.seed, headquarters)
    }
}
