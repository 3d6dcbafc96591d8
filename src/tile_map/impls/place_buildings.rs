use std::collections::VecDeque;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, info};

use crate::{
    error::MapError,
    map_parameters::MapParameters,
    tile::Tile,
    tile_component::{Building, Terrain},
    tile_map::TileMap,
};

/// Distance of a tile the distance field never reached.
pub const UNREACHED_DISTANCE: u32 = u32::MAX;

impl TileMap {
    /// Places the strongholds, the production buildings and the villages, all as mirrored pairs.
    ///
    /// 1. The strongholds overwrite whatever is on the two headquarters tiles.
    /// 2. Barracks and towers are rejection sampled near player one's headquarters,
    ///    see [`TileMap::place_production_buildings`].
    /// 3. Villages are spread along the rings of a distance field around player one's production buildings,
    ///    see [`TileMap::place_villages`].
    pub fn place_buildings(
        &mut self,
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> Result<(), MapError> {
        let (player_one, player_two) = Building::Stronghold.terrain_pair();
        self.set_terrain_mirrored(self.headquarters, player_one, player_two);

        let production_tiles =
            self.place_production_buildings(map_parameters, random_number_generator)?;

        let distance_list = self.distance_field(&production_tiles);

        self.place_villages(map_parameters, &distance_list, random_number_generator)?;

        info!(
            barracks = map_parameters.barracks_count,
            towers = map_parameters.tower_count,
            villages = map_parameters.village_count,
            "placed buildings"
        );
        Ok(())
    }

    /// Places `barracks_count` barracks and then `tower_count` towers, each with its mirror.
    ///
    /// A uniformly drawn tile is accepted when it is [`Terrain::Plain`], is not its own mirror, and lies within
    /// `production_radius_ratio` of the board diagonal from player one's headquarters. After
    /// `max_placement_attempts` draws without filling every slot this returns [`MapError::InsufficientCandidates`].
    ///
    /// Returns the accepted tiles, all on player one's side. Their mirrors hold player two's buildings.
    pub fn place_production_buildings(
        &mut self,
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> Result<Vec<Tile>, MapError> {
        let needed = (map_parameters.barracks_count + map_parameters.tower_count) as usize;
        let max_distance = map_parameters.production_radius_ratio * self.grid.diagonal();

        let is_candidate = |tile_map: &TileMap, tile: Tile| {
            tile.terrain(tile_map) == Terrain::Plain
                && tile.mirror(tile_map.grid) != tile
                && tile_map.grid.euclidean_distance(tile, tile_map.headquarters) <= max_distance
        };

        let mut production_tiles = Vec::with_capacity(needed);
        let mut attempts = 0;

        while production_tiles.len() < needed {
            if attempts == map_parameters.max_placement_attempts {
                let available = production_tiles.len()
                    + self
                        .all_tiles()
                        .filter(|&tile| is_candidate(self, tile))
                        .count();
                return Err(MapError::InsufficientCandidates {
                    what: "production buildings",
                    needed,
                    available,
                });
            }
            attempts += 1;

            let tile = Tile::new(random_number_generator.random_range(0..self.grid.len()));
            if !is_candidate(self, tile) {
                continue;
            }

            let building = if production_tiles.len() < map_parameters.barracks_count as usize {
                Building::Barracks
            } else {
                Building::Tower
            };
            let (player_one, player_two) = building.terrain_pair();
            self.set_terrain_mirrored(tile, player_one, player_two);
            production_tiles.push(tile);
        }

        debug!(placed = production_tiles.len(), attempts, "placed production buildings");
        Ok(production_tiles)
    }

    /// Multi-source breadth-first search over the whole grid from `source_tiles`.
    ///
    /// Every step to a 4-connected neighbor costs 1, water included. Tiles that cannot be reached keep
    /// [`UNREACHED_DISTANCE`], which only happens without sources.
    pub fn distance_field(&self, source_tiles: &[Tile]) -> Vec<u32> {
        let mut distance_list = vec![UNREACHED_DISTANCE; self.grid.len()];
        let mut queue = VecDeque::with_capacity(self.grid.len());

        for &tile in source_tiles {
            if distance_list[tile.index()] != 0 {
                distance_list[tile.index()] = 0;
                queue.push_back(tile);
            }
        }

        while let Some(tile) = queue.pop_front() {
            let next_distance = distance_list[tile.index()] + 1;
            for neighbor_tile in tile.neighbor_tiles(self.grid) {
                if distance_list[neighbor_tile.index()] == UNREACHED_DISTANCE {
                    distance_list[neighbor_tile.index()] = next_distance;
                    queue.push_back(neighbor_tile);
                }
            }
        }

        distance_list
    }

    /// Places `village_count` neutral village pairs.
    ///
    /// Candidates are [`Terrain::Plain`] tiles, other than the centre of an odd board, whose distance in
    /// `distance_list` is a multiple of `village_spacing`. A candidate and its mirror make the same village pair,
    /// so candidates are drawn in random order and one whose mirror was already picked is skipped.
    ///
    /// Returns [`MapError::InsufficientCandidates`] if the candidates form fewer pairs than villages.
    pub fn place_villages(
        &mut self,
        map_parameters: &MapParameters,
        distance_list: &[u32],
        random_number_generator: &mut impl Rng,
    ) -> Result<(), MapError> {
        let needed = map_parameters.village_count as usize;
        let spacing = map_parameters.village_spacing;

        let mut candidate_list: Vec<Tile> = self
            .all_tiles()
            .filter(|tile| {
                let distance = distance_list[tile.index()];
                tile.terrain(self) == Terrain::Plain
                    && tile.mirror(self.grid) != *tile
                    && distance != UNREACHED_DISTANCE
                    && distance % spacing == 0
            })
            .collect();

        let mut pair_list: Vec<usize> = candidate_list
            .iter()
            .map(|tile| tile.index().min(tile.mirror(self.grid).index()))
            .collect();
        pair_list.sort_unstable();
        pair_list.dedup();

        if pair_list.len() < needed {
            return Err(MapError::InsufficientCandidates {
                what: "villages",
                needed,
                available: pair_list.len(),
            });
        }

        candidate_list.shuffle(random_number_generator);

        let (neutral, mirror_neutral) = Building::Village.terrain_pair();
        let mut placed = 0;
        for tile in candidate_list {
            if placed == needed {
                break;
            }
            // Taken as the mirror of an earlier pick.
            if tile.terrain(self) != Terrain::Plain {
                continue;
            }
            self.set_terrain_mirrored(tile, neutral, mirror_neutral);
            placed += 1;
        }

        debug!(candidate_pairs = pair_list.len(), placed, "placed villages");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tile_map::tests::map_from_rows;

    fn grown_map(map_parameters: &MapParameters, random_number_generator: &mut StdRng) -> TileMap {
        let mut tile_map = TileMap::initialize(map_parameters, random_number_generator);
        tile_map
            .carve_corridor(map_parameters, random_number_generator)
            .unwrap();
        tile_map.grow_land(map_parameters, random_number_generator);
        tile_map
    }

    fn village_tiles(tile_map: &TileMap) -> Vec<Tile> {
        tile_map
            .all_tiles()
            .filter(|tile| tile.terrain(tile_map) == Terrain::NeutralVillage)
            .collect()
    }

    #[test]
    fn distance_field_walks_across_water() {
        let tile_map = map_from_rows(&[
            "f...",
            ",,,.",
            "....",
            "...,",
        ]);
        let distance_list = tile_map.distance_field(&[Tile::new(0)]);

        for tile in tile_map.all_tiles() {
            let [x, y] = tile.to_offset(tile_map.grid).to_array();
            assert_eq!(distance_list[tile.index()], (x + y) as u32);
        }
        assert_eq!(distance_list[4], 1);
        assert_eq!(distance_list[15], 6);

        assert!(
            tile_map
                .distance_field(&[])
                .iter()
                .all(|&distance| distance == UNREACHED_DISTANCE)
        );
    }

    #[test]
    fn multi_source_distance_takes_the_nearest() {
        let tile_map = map_from_rows(&["......."]);
        let distance_list = tile_map.distance_field(&[Tile::new(0), Tile::new(6)]);
        assert_eq!(distance_list, vec![0, 1, 2, 3, 2, 1, 0]);
    }

    #[test]
    fn production_buildings_stay_near_headquarters() {
        let map_parameters = MapParameters {
            barracks_count: 3,
            tower_count: 2,
            seed: 17,
            ..Default::default()
        };
        let mut random_number_generator = StdRng::seed_from_u64(17);
        let mut tile_map = grown_map(&map_parameters, &mut random_number_generator);
        let max_distance = 0.3 * tile_map.grid.diagonal();

        let production_tiles = tile_map
            .place_production_buildings(&map_parameters, &mut random_number_generator)
            .unwrap();

        assert_eq!(production_tiles.len(), 5);
        for (index, &tile) in production_tiles.iter().enumerate() {
            assert!(tile_map.grid.euclidean_distance(tile, tile_map.headquarters) <= max_distance);
            let (terrain, mirror_terrain) = if index < 3 {
                (Terrain::PlayerOneBarracks, Terrain::PlayerTwoBarracks)
            } else {
                (Terrain::PlayerOneTower, Terrain::PlayerTwoTower)
            };
            assert_eq!(tile.terrain(&tile_map), terrain);
            assert_eq!(tile.mirror(tile_map.grid).terrain(&tile_map), mirror_terrain);
        }
        let counts = tile_map.terrain_counts();
        assert_eq!(counts[Terrain::PlayerOneBarracks], 3);
        assert_eq!(counts[Terrain::PlayerTwoBarracks], 3);
        assert_eq!(counts[Terrain::PlayerOneTower], 2);
        assert_eq!(counts[Terrain::PlayerTwoTower], 2);
    }

    #[test]
    fn production_sampling_gives_up_without_plain_land() {
        let mut tile_map = map_from_rows(&[",,,,", ",i,,", ",,o,", ",,,,"]);
        let map_parameters = MapParameters {
            width: 4,
            height: 4,
            barracks_count: 1,
            tower_count: 0,
            max_placement_attempts: 50,
            ..Default::default()
        };
        let mut random_number_generator = StdRng::seed_from_u64(4);

        let result =
            tile_map.place_production_buildings(&map_parameters, &mut random_number_generator);

        assert!(matches!(
            result,
            Err(MapError::InsufficientCandidates {
                what: "production buildings",
                needed: 1,
                available: 0,
            })
        ));
    }

    #[test]
    fn villages_sit_on_spacing_rings() {
        let mut tile_map = map_from_rows(&[
            "f..........",
            "...........",
            "...........",
            "..........l",
        ]);
        let map_parameters = MapParameters {
            village_count: 2,
            village_spacing: 3,
            ..Default::default()
        };
        let distance_list = tile_map.distance_field(&[Tile::new(0)]);
        let mut random_number_generator = StdRng::seed_from_u64(9);

        tile_map
            .place_villages(&map_parameters, &distance_list, &mut random_number_generator)
            .unwrap();

        let village_tiles = village_tiles(&tile_map);
        assert_eq!(village_tiles.len(), 4);
        for tile in village_tiles {
            let mirror = tile.mirror(tile_map.grid);
            assert_eq!(mirror.terrain(&tile_map), Terrain::NeutralVillage);
            assert!(
                distance_list[tile.index()] % 3 == 0 || distance_list[mirror.index()] % 3 == 0
            );
        }
    }

    #[test]
    fn mirrored_candidates_make_one_pair() {
        // With spacing 1 every plain tile is a candidate, but tiles 1 to 4 only form two mirrored pairs.
        let map_parameters = MapParameters {
            village_count: 2,
            village_spacing: 1,
            ..Default::default()
        };
        for seed in 0..10 {
            let mut tile_map = map_from_rows(&["f....l"]);
            let distance_list = tile_map.distance_field(&[Tile::new(0)]);
            let mut random_number_generator = StdRng::seed_from_u64(seed);

            tile_map
                .place_villages(&map_parameters, &distance_list, &mut random_number_generator)
                .unwrap();

            assert_eq!(village_tiles(&tile_map).len(), 4, "seed {seed}");
        }

        let mut tile_map = map_from_rows(&["f....l"]);
        let distance_list = tile_map.distance_field(&[Tile::new(0)]);
        let map_parameters = MapParameters {
            village_count: 3,
            ..map_parameters
        };
        let mut random_number_generator = StdRng::seed_from_u64(0);

        let result =
            tile_map.place_villages(&map_parameters, &distance_list, &mut random_number_generator);

        assert!(matches!(
            result,
            Err(MapError::InsufficientCandidates {
                what: "villages",
                needed: 3,
                available: 2,
            })
        ));
    }

    #[test]
    fn too_few_village_candidates_is_an_error() {
        let mut tile_map = map_from_rows(&["f..,", ",..l"]);
        let map_parameters = MapParameters {
            village_count: 1,
            ..Default::default()
        };
        let distance_list = tile_map.distance_field(&[Tile::new(0)]);
        let before = tile_map.clone();
        let mut random_number_generator = StdRng::seed_from_u64(0);

        let result =
            tile_map.place_villages(&map_parameters, &distance_list, &mut random_number_generator);

        assert!(matches!(
            result,
            Err(MapError::InsufficientCandidates {
                what: "villages",
                needed: 1,
                available: 0,
            })
        ));
        assert_eq!(tile_map, before);
    }

    #[test]
    fn many_villages_fit_around_the_production_buildings() {
        for seed in 1..=20 {
            let map_parameters = MapParameters {
                barracks_count: 3,
                tower_count: 2,
                village_count: 10,
                seed,
                ..Default::default()
            };
            let mut random_number_generator = StdRng::seed_from_u64(seed);
            let mut tile_map = grown_map(&map_parameters, &mut random_number_generator);
            tile_map.remove_lone_sea();

            tile_map
                .place_buildings(&map_parameters, &mut random_number_generator)
                .unwrap();

            assert_eq!(village_tiles(&tile_map).len(), 20, "seed {seed}");
        }
    }
}
