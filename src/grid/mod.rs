pub mod direction;
pub mod offset_coordinate;
pub mod square_grid;

pub use direction::*;
pub use offset_coordinate::OffsetCoordinate;
pub use square_grid::{SquareGrid, square::Square};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}
