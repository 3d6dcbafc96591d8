use enum_map::EnumMap;
use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};
use tracing::{debug, info};

use crate::{
    error::MapError,
    map_parameters::{MapParameters, PaintStrategy},
    tile::Tile,
    tile_component::Terrain,
    tile_map::TileMap,
};

/// How open every tile of the map currently is.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceField {
    /// The influence of each tile, indexed by [`Tile::index()`]. Water tiles are `0.0`.
    pub influence_list: Vec<f64>,
    /// Mean over land tiles of the influence divided by the influence the tile would have
    /// if every land tile in range had a movement cost of `1.0`. `1.0` means nothing slows movement down.
    pub accessibility: f64,
}

impl InfluenceField {
    /// The squared influence normalized to sum to `1.0`, ready for weighted sampling.
    ///
    /// Returns [`MapError::DegenerateField`] if no tile has any influence.
    pub fn distribution(&self) -> Result<Vec<f64>, MapError> {
        let squared_list: Vec<f64> = self
            .influence_list
            .iter()
            .map(|influence| influence * influence)
            .collect();
        let total: f64 = squared_list.iter().sum();

        if total <= 0.0 || !total.is_finite() {
            return Err(MapError::DegenerateField);
        }

        Ok(squared_list.into_iter().map(|weight| weight / total).collect())
    }
}

impl TileMap {
    /// Paints mountains and forests onto plain tiles, mirrored, with the configured [`PaintStrategy`].
    ///
    /// Tiles are drawn with a chance proportional to their squared influence, so features gather in open
    /// areas and leave chokepoints alone. A draw that hits anything but [`Terrain::Plain`] is wasted.
    /// Terrain kinds missing from `enabled_terrain` are never painted.
    pub fn paint_terrain(
        &mut self,
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> Result<(), MapError> {
        match map_parameters.paint_strategy {
            PaintStrategy::Batch => self.paint_terrain_batch(map_parameters, random_number_generator),
            PaintStrategy::Iterative => {
                self.paint_terrain_iterative(map_parameters, random_number_generator)
            }
        }
    }

    /// Computes the influence field of the current layout.
    ///
    /// The influence of a land tile is the sum of `movement_cost(other) / manhattan_distance` over every other
    /// tile within `radius`, or over the whole map when `radius` is `None`.
    pub fn influence_field(&self, radius: Option<u32>) -> InfluenceField {
        let cost_table: EnumMap<Terrain, f64> = EnumMap::from_fn(|terrain: Terrain| terrain.movement_cost());

        let mut influence_list = vec![0.0; self.grid.len()];
        let mut accessibility_sum = 0.0;
        let mut land_count = 0;

        for tile in self.all_tiles() {
            if tile.is_water(self) {
                continue;
            }

            let nearby_tiles: Vec<Tile> = match radius {
                Some(radius) => self.grid.tiles_in_distance(tile, radius).collect(),
                None => self.all_tiles().collect(),
            };

            let mut influence = 0.0;
            let mut open_influence = 0.0;
            for other_tile in nearby_tiles {
                let distance = self.grid.manhattan_distance(tile, other_tile);
                if distance == 0 || other_tile.is_water(self) {
                    continue;
                }
                influence += cost_table[other_tile.terrain(self)] / distance as f64;
                open_influence += 1.0 / distance as f64;
            }

            influence_list[tile.index()] = influence;
            // A land tile with no land in range cannot be slowed down.
            accessibility_sum += if open_influence > 0.0 {
                influence / open_influence
            } else {
                1.0
            };
            land_count += 1;
        }

        let accessibility = if land_count == 0 {
            0.0
        } else {
            accessibility_sum / land_count as f64
        };

        InfluenceField {
            influence_list,
            accessibility,
        }
    }

    /// Draws a tile from the squared influence distribution of `influence_field`.
    fn sample_tile(
        influence_field: &InfluenceField,
        random_number_generator: &mut impl Rng,
    ) -> Result<Tile, MapError> {
        let dist = WeightedIndex::new(influence_field.distribution()?)
            .map_err(|_| MapError::DegenerateField)?;
        Ok(Tile::new(dist.sample(random_number_generator)))
    }

    /// Draws all mountains from one field, then all forests from a field recomputed after the mountains.
    fn paint_terrain_batch(
        &mut self,
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> Result<(), MapError> {
        for (terrain, draw_count) in [
            (Terrain::Mountain, map_parameters.mountain_count()),
            (Terrain::Forest, map_parameters.forest_count()),
        ] {
            if !map_parameters.is_enabled(terrain) || draw_count == 0 {
                continue;
            }

            let influence_field = self.influence_field(map_parameters.influence_radius);
            let dist = WeightedIndex::new(influence_field.distribution()?)
                .map_err(|_| MapError::DegenerateField)?;

            let mut painted = 0;
            for _ in 0..draw_count {
                let tile = Tile::new(dist.sample(random_number_generator));
                if tile.terrain(self) == Terrain::Plain {
                    self.set_terrain_mirrored(tile, terrain, terrain);
                    painted += 1;
                }
            }

            debug!(terrain = terrain.name(), draw_count, painted, "painted terrain");
        }

        info!(
            accessibility = self.influence_field(map_parameters.influence_radius).accessibility,
            "painted terrain in batch"
        );
        Ok(())
    }

    /// Places one feature at a time until the accessibility of the map drops below `openness`.
    ///
    /// Also stops when no plain tile is left or after one draw per tile of the map.
    fn paint_terrain_iterative(
        &mut self,
        map_parameters: &MapParameters,
        random_number_generator: &mut impl Rng,
    ) -> Result<(), MapError> {
        let forest_enabled = map_parameters.is_enabled(Terrain::Forest);
        let mountain_enabled = map_parameters.is_enabled(Terrain::Mountain);
        if !forest_enabled && !mountain_enabled {
            return Ok(());
        }

        let mut painted = 0;
        let mut accessibility = 1.0;

        for _ in 0..self.grid.len() {
            let influence_field = self.influence_field(map_parameters.influence_radius);
            accessibility = influence_field.accessibility;
            if accessibility < map_parameters.openness {
                break;
            }
            if !self.terrain_list.contains(&Terrain::Plain) {
                break;
            }

            let tile = Self::sample_tile(&influence_field, random_number_generator)?;
            if tile.terrain(self) != Terrain::Plain {
                continue;
            }

            let terrain = if random_number_generator.random_bool(map_parameters.forest_probability) {
                Terrain::Forest
            } else {
                Terrain::Mountain
            };
            if !map_parameters.is_enabled(terrain) {
                continue;
            }

            self.set_terrain_mirrored(tile, terrain, terrain);
            painted += 1;
        }

        info!(painted, accessibility, "painted terrain iteratively");
        Ok(())
    }
}
