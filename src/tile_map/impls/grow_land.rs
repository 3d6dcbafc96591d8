use arrayvec::ArrayVec;
use bitflags::bitflags;
use rand::{Rng, seq::IndexedRandom};
use tracing::{debug, warn};

use crate::{
    grid::{Direction, Square},
    map_parameters::MapParameters,
    tile::Tile,
    tile_component::Terrain,
    tile_map::TileMap,
};

bitflags! {
    /// The sides of a land tile that still face water inside the map.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OpenSides: u8 {
        const North = 0b0001;
        const East = 0b0010;
        const South = 0b0100;
        const West = 0b1000;
    }
}

impl OpenSides {
    pub const fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::North,
            Direction::East => Self::East,
            Direction::South => Self::South,
            Direction::West => Self::West,
        }
    }

    /// Reads the open sides of `tile` from the map.
    pub fn of_tile(tile: Tile, tile_map: &TileMap) -> Self {
        tile.water_directions(tile_map)
            .fold(Self::empty(), |open_sides, direction| {
                open_sides | Self::from_direction(direction)
            })
    }

    /// The number of open sides, in `0..=4`.
    pub const fn count(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// The open directions, in [`Square::EDGE_DIRECTIONS`] order.
    pub fn directions(self) -> ArrayVec<Direction, 4> {
        Square::EDGE_DIRECTIONS
            .into_iter()
            .filter(|&direction| self.contains(Self::from_direction(direction)))
            .collect()
    }
}

/// A land tile that can still grow into at least one neighboring water tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub tile: Tile,
    pub open_sides: OpenSides,
}

impl TileMap {
    /// Grows the landmass organically until `target_land_count` land tiles exist or nothing can grow.
    ///
    /// When `remove_lone_sea` is set, water tiles without a water neighbor count toward the target as well,
    /// since the cleanup that follows turns them into land.
    ///
    /// Each step picks a frontier tile uniformly and grows it with the chance configured for its number of
    /// open sides in `growth_acceptance`. Tiles with few open sides are preferred, which keeps the coast compact.
    /// A rejected pick is simply re-drawn. An accepted pick turns one of its open neighbors, and that
    /// neighbor's mirror, into [`Terrain::Plain`].
    ///
    /// Returns the final number of land tiles.
    pub fn grow_land(
        &mut self,
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> usize {
        /// Consecutive rejections allowed per frontier entry before checking if anything can still be accepted.
        const REJECTIONS_PER_ENTRY: usize = 32;

        let target_land_count = map_parameters.target_land_count();
        let acceptance = map_parameters.growth_acceptance;
        let chance = |open_sides: OpenSides| acceptance[open_sides.count() - 1];

        let lone_sea_count = |tile_map: &TileMap| {
            if map_parameters.remove_lone_sea {
                tile_map.lone_sea_tiles().len()
            } else {
                0
            }
        };

        let mut frontier = self.initial_frontier();
        let mut land_count = self.land_count();
        let mut pending_land_count = lone_sea_count(self);
        let mut rejections = 0;

        while land_count + pending_land_count < target_land_count && !frontier.is_empty() {
            let index = random_number_generator.random_range(0..frontier.len());

            // Neighbors of this tile may have grown since it was recorded.
            let open_sides = OpenSides::of_tile(frontier[index].tile, self);
            if open_sides.is_empty() {
                frontier.swap_remove(index);
                continue;
            }
            frontier[index].open_sides = open_sides;

            if !random_number_generator.random_bool(chance(open_sides)) {
                rejections += 1;
                if rejections > frontier.len() * REJECTIONS_PER_ENTRY {
                    rejections = 0;
                    self.refresh_frontier(&mut frontier);
                    if frontier
                        .iter()
                        .all(|entry| chance(entry.open_sides) == 0.0)
                    {
                        warn!(
                            land_count,
                            target_land_count, "no frontier tile can be accepted any more"
                        );
                        break;
                    }
                }
                continue;
            }
            rejections = 0;

            let source_tile = frontier[index].tile;
            let Some(&direction) = open_sides.directions().choose(random_number_generator) else {
                continue;
            };
            let Some(grown_tile) = source_tile.neighbor_tile(direction, self.grid) else {
                continue;
            };

            land_count += self.set_terrain_mirrored(grown_tile, Terrain::Plain, Terrain::Plain);
            pending_land_count = lone_sea_count(self);

            let source_open_sides = open_sides - OpenSides::from_direction(direction);
            if source_open_sides.is_empty() {
                frontier.swap_remove(index);
            } else {
                frontier[index].open_sides = source_open_sides;
            }

            let grown_open_sides = OpenSides::of_tile(grown_tile, self);
            if !grown_open_sides.is_empty() {
                frontier.push(FrontierEntry {
                    tile: grown_tile,
                    open_sides: grown_open_sides,
                });
            }
        }

        if land_count + pending_land_count < target_land_count && frontier.is_empty() {
            warn!(land_count, target_land_count, "land frontier exhausted");
        }
        debug!(land_count, pending_land_count, target_land_count, "grew land");
        land_count
    }

    /// Builds the frontier from the land tiles of the top half of the map.
    ///
    /// The map is point symmetric, so the bottom half only repeats the same tiles mirrored.
    pub fn initial_frontier(&self) -> Vec<FrontierEntry> {
        let last_row = (self.grid.height() as i32 - 1) / 2;
        self.all_tiles()
            .filter(|tile| tile.to_offset(self.grid).y() <= last_row && !tile.is_water(self))
            .filter_map(|tile| {
                let open_sides = OpenSides::of_tile(tile, self);
                (!open_sides.is_empty()).then_some(FrontierEntry { tile, open_sides })
            })
            .collect()
    }

    fn refresh_frontier(&self, frontier: &mut Vec<FrontierEntry>) {
        frontier.retain_mut(|entry| {
            entry.open_sides = OpenSides::of_tile(entry.tile, self);
            !entry.open_sides.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tile_map::tests::{empty_map, land_connected, map_from_rows};

    fn carved_map(map_parameters: &MapParameters, random_number_generator: &mut StdRng) -> TileMap {
        let mut tile_map = TileMap::initialize(map_parameters, random_number_generator);
        tile_map
            .carve_corridor(map_parameters, random_number_generator)
            .unwrap();
        tile_map
    }

    #[test]
    fn open_sides_follow_the_water() {
        let tile_map = map_from_rows(&[",,,", ",.,", "..,", ",,,"]);
        let tile = Tile::new(4);
        let open_sides = OpenSides::of_tile(tile, &tile_map);
        assert_eq!(open_sides, OpenSides::North | OpenSides::East | OpenSides::West);
        assert_eq!(open_sides.count(), 3);
        assert_eq!(
            open_sides.directions().as_slice(),
            &[Direction::East, Direction::West, Direction::North]
        );

        // Map edges are not open.
        let edge = Tile::new(6);
        assert_eq!(
            OpenSides::of_tile(edge, &tile_map),
            OpenSides::North | OpenSides::South
        );
    }

    #[test]
    fn initial_frontier_only_scans_the_top_half() {
        let tile_map = map_from_rows(&[",,,,", ",.,,", ",,.,", ",,,,"]);
        let frontier = tile_map.initial_frontier();
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier[0].tile, Tile::new(5));
        assert_eq!(frontier[0].open_sides.count(), 4);
    }

    #[test]
    fn land_grows_to_the_target_ratio() {
        for seed in 0..10 {
            let map_parameters = MapParameters {
                width: 20,
                height: 20,
                land_ratio: 0.5,
                remove_lone_sea: false,
                seed,
                ..Default::default()
            };
            let mut random_number_generator = StdRng::seed_from_u64(seed);
            let mut tile_map = carved_map(&map_parameters, &mut random_number_generator);
            let corridor_land = tile_map.land_count();

            let land_count = tile_map.grow_land(&map_parameters, &mut random_number_generator);

            assert_eq!(land_count, tile_map.land_count());
            assert!(tile_map.is_land_symmetric(), "seed {seed}");
            if corridor_land < 200 {
                assert!((200..=201).contains(&land_count), "seed {seed}: {land_count}");
            }
            let (headquarters, mirror) = tile_map.headquarters_pair();
            assert!(land_connected(&tile_map, headquarters, mirror));
        }
    }

    #[test]
    fn lone_sea_counts_toward_the_target() {
        for seed in 0..10 {
            let map_parameters = MapParameters {
                width: 20,
                height: 20,
                land_ratio: 0.5,
                remove_lone_sea: true,
                seed,
                ..Default::default()
            };
            let mut random_number_generator = StdRng::seed_from_u64(seed);
            let mut tile_map = carved_map(&map_parameters, &mut random_number_generator);
            let corridor_land = tile_map.land_count() + tile_map.lone_sea_tiles().len();

            let land_count = tile_map.grow_land(&map_parameters, &mut random_number_generator);
            let removed = tile_map.remove_lone_sea();

            assert_eq!(tile_map.land_count(), land_count + removed);
            if corridor_land < 200 {
                // The last growth step adds a pair and may enclose a few single water tiles.
                assert!(
                    (200..=204).contains(&tile_map.land_count()),
                    "seed {seed}: {land_count} + {removed}"
                );
            }
        }
    }

    #[test]
    fn odd_board_counts_the_centre_once() {
        let map_parameters = MapParameters {
            width: 9,
            height: 9,
            land_ratio: 1.0,
            growth_acceptance: [1.0, 1.0, 1.0, 1.0],
            remove_lone_sea: false,
            ..Default::default()
        };
        let mut random_number_generator = StdRng::seed_from_u64(8);
        let mut tile_map = carved_map(&map_parameters, &mut random_number_generator);

        let land_count = tile_map.grow_land(&map_parameters, &mut random_number_generator);

        assert_eq!(land_count, 81);
        assert_eq!(tile_map.land_count(), 81);
    }

    #[test]
    fn zero_acceptance_stops_instead_of_spinning() {
        let mut tile_map = empty_map(8, 8);
        tile_map.set_terrain_mirrored(Tile::new(9), Terrain::Plain, Terrain::Plain);
        let map_parameters = MapParameters {
            width: 8,
            height: 8,
            growth_acceptance: [1.0, 1.0, 1.0, 0.0],
            ..Default::default()
        };
        let mut random_number_generator = StdRng::seed_from_u64(2);

        let land_count = tile_map.grow_land(&map_parameters, &mut random_number_generator);

        assert_eq!(land_count, 2);
        assert_eq!(tile_map.land_count(), 2);
    }
}
