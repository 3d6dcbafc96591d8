pub mod error;
pub mod grid;
pub mod map_parameters;
pub mod tile;
pub mod tile_component;
pub mod tile_map;

pub use error::MapError;
pub use grid::*;
pub use map_parameters::{MapParameters, PaintStrategy};
use rand::{SeedableRng, rngs::StdRng};
pub use tile::Tile;
pub use tile_component::*;
pub use tile_map::TileMap;
use tracing::info;

/// Runs the whole generation pipeline and returns the finished map.
///
/// A `0` seed in `map_parameters` is replaced by a fresh one first; the seed used is stored in
/// [`TileMap::seed`]. The same parameters with the same non-zero seed always give the same map.
pub fn generate_map(map_parameters: &MapParameters) -> Result<TileMap, MapError> {
    let mut map_parameters = map_parameters.clone();
    let seed = map_parameters.resolve_seed();
    map_parameters.validate()?;

    let mut random_number_generator = StdRng::seed_from_u64(seed);

    let mut tile_map = TileMap::initialize(&map_parameters, &mut random_number_generator);
    tile_map.carve_corridor(&map_parameters, &mut random_number_generator)?;
    let land_count = tile_map.grow_land(&map_parameters, &mut random_number_generator);
    info!(
        land_count,
        target = map_parameters.target_land_count(),
        "grew landmass"
    );

    if map_parameters.remove_lone_sea {
        tile_map.remove_lone_sea();
    }
    debug_assert!(tile_map.is_land_symmetric());

    tile_map.place_buildings(&map_parameters, &mut random_number_generator)?;
    tile_map.paint_terrain(&map_parameters, &mut random_number_generator)?;
    debug_assert!(tile_map.is_land_symmetric());

    tile_map.seed = seed;
    info!(seed, "generated map");
    Ok(tile_map)
}
