//! This module contains the components of the tile in the map.
//! For now a tile is fully described by its [`Terrain`].

pub mod terrain;

pub use terrain::{Building, Terrain};
