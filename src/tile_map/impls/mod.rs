mod carve_corridor;
mod grow_land;
mod initialize_headquarters;
mod paint_terrain;
mod place_buildings;
mod remove_lone_sea;
mod write_map;

pub use grow_land::*;
pub use paint_terrain::*;
pub use place_buildings::*;
pub use write_map::*;
