/// One of the four cardinal directions of a square tile.
///
/// Rows grow downward, so [`Direction::North`] points at the previous row.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}
