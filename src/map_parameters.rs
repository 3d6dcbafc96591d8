//! This module defines [`MapParameters`], the configuration of one generation run,
//! and how it is loaded from a commented *JSON* file.

use std::{fs, path::Path};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::MapError,
    grid::{Size, SquareGrid},
    tile_component::Terrain,
};

/// The configuration of a generation run.
///
/// Every field has a default, so a configuration file only needs to list what it changes.
/// The `key` field is the seed: `0` asks for a fresh seed, see [`MapParameters::resolve_seed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapParameters {
    pub width: u32,
    pub height: u32,
    /// Target fraction of the map that is land.
    pub land_ratio: f64,
    /// Fraction of the land area to paint as mountains.
    pub mountain_ratio: f64,
    /// Fraction of the land area to paint as forests.
    pub forest_ratio: f64,
    pub barracks_count: u32,
    pub tower_count: u32,
    pub village_count: u32,
    /// Fraction of each axis kept between the two headquarters.
    pub min_starting_distance: f64,
    /// The iterative painter stops once the average accessibility drops below this value.
    pub openness: f64,
    /// Turn single-tile water pockets into land.
    pub remove_lone_sea: bool,
    #[serde(rename = "key", alias = "seed")]
    pub seed: u64,
    /// Terrain kinds the painter is allowed to place.
    pub enabled_terrain: Vec<Terrain>,
    /// Chance that a frontier tile with 1, 2, 3 or 4 open sides is grown when it is picked.
    pub growth_acceptance: [f64; 4],
    /// Production buildings stay within this fraction of the board diagonal from headquarters.
    pub production_radius_ratio: f64,
    /// Villages sit on tiles whose distance to production buildings is a multiple of this value.
    pub village_spacing: u32,
    /// Chance that the iterative painter places a forest rather than a mountain.
    pub forest_probability: f64,
    pub paint_strategy: PaintStrategy,
    /// Manhattan radius considered by the influence field. `None` considers the whole map.
    pub influence_radius: Option<u32>,
    pub max_corridor_attempts: u32,
    pub max_placement_attempts: u32,
}

/// How the terrain painter places mountains and forests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStrategy {
    /// Sample all mountains from one influence field, then all forests from a recomputed one.
    Batch,
    /// Place one feature at a time until the map is no longer open enough.
    Iterative,
}

impl Default for MapParameters {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            land_ratio: 0.5,
            mountain_ratio: 0.05,
            forest_ratio: 0.1,
            barracks_count: 2,
            tower_count: 1,
            village_count: 3,
            min_starting_distance: 0.3,
            openness: 0.85,
            remove_lone_sea: true,
            seed: 0,
            enabled_terrain: vec![
                Terrain::Plain,
                Terrain::Forest,
                Terrain::Mountain,
                Terrain::Sea,
            ],
            growth_acceptance: [1.0, 0.7, 0.25, 0.0],
            production_radius_ratio: 0.3,
            village_spacing: 5,
            forest_probability: 0.7,
            paint_strategy: PaintStrategy::Batch,
            influence_radius: Some(8),
            max_corridor_attempts: 1000,
            max_placement_attempts: 10_000,
        }
    }
}

impl MapParameters {
    /// Output rows are padded to this many columns, so no map may be wider or taller.
    pub const MAX_DIMENSION: u32 = 39;
    /// Smallest side length the generator supports.
    pub const MIN_DIMENSION: u32 = 4;
    /// Fresh seeds are drawn from `1..=MAX_RANDOM_SEED`.
    pub const MAX_RANDOM_SEED: u64 = 100_000;

    /// Reads, parses and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let json_with_comments = fs::read_to_string(path)?;
        Self::from_json_str(&json_with_comments)
    }

    /// Parses and validates a configuration from a *JSON* string that may contain comments.
    pub fn from_json_str(json_with_comments: &str) -> Result<Self, MapError> {
        let json = strip_json_comments(json_with_comments);
        let map_parameters: Self = serde_json::from_str(&json)?;
        map_parameters.validate()?;
        Ok(map_parameters)
    }

    /// Rejects configurations the generator cannot honor.
    pub fn validate(&self) -> Result<(), MapError> {
        let invalid = |message: String| -> Result<(), MapError> {
            Err(MapError::InvalidConfig(message))
        };

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(Self::MIN_DIMENSION..=Self::MAX_DIMENSION).contains(&value) {
                return invalid(format!(
                    "{name} is {value}, it must be in {}..={}",
                    Self::MIN_DIMENSION,
                    Self::MAX_DIMENSION
                ));
            }
        }

        for (name, value) in [
            ("land_ratio", self.land_ratio),
            ("mountain_ratio", self.mountain_ratio),
            ("forest_ratio", self.forest_ratio),
            ("openness", self.openness),
            ("production_radius_ratio", self.production_radius_ratio),
            ("forest_probability", self.forest_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{name} is {value}, it must be in 0.0..=1.0"));
            }
        }

        if !(0.0..1.0).contains(&self.min_starting_distance) {
            return invalid(format!(
                "min_starting_distance is {}, it must be in 0.0..1.0",
                self.min_starting_distance
            ));
        }

        if let Some(chance) = self
            .growth_acceptance
            .iter()
            .find(|chance| !(0.0..=1.0).contains(*chance))
        {
            return invalid(format!(
                "growth_acceptance contains {chance}, every chance must be in 0.0..=1.0"
            ));
        }

        if self.village_spacing == 0 {
            return invalid("village_spacing must be at least 1".to_owned());
        }

        if self.max_corridor_attempts == 0 || self.max_placement_attempts == 0 {
            return invalid("attempt limits must be at least 1".to_owned());
        }

        Ok(())
    }

    /// Replaces a `0` seed with a fresh random one and reports it.
    ///
    /// A non-zero seed is kept as is, so the same map can be generated again.
    pub fn resolve_seed(&mut self) -> u64 {
        if self.seed == 0 {
            self.seed = rand::rng().random_range(1..=Self::MAX_RANDOM_SEED);
            info!(seed = self.seed, "picked a fresh seed");
        }
        self.seed
    }

    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub const fn grid(&self) -> SquareGrid {
        SquareGrid::new(self.size())
    }

    pub fn is_enabled(&self, terrain: Terrain) -> bool {
        self.enabled_terrain.contains(&terrain)
    }

    /// Number of land tiles the land grower aims for.
    pub fn target_land_count(&self) -> usize {
        (self.width as f64 * self.height as f64 * self.land_ratio).round() as usize
    }

    /// Number of mountain draws made by the batch painter.
    pub fn mountain_count(&self) -> usize {
        (self.mountain_ratio * self.width as f64 * self.height as f64 * self.land_ratio) as usize
    }

    /// Number of forest draws made by the batch painter.
    pub fn forest_count(&self) -> usize {
        (self.forest_ratio * self.width as f64 * self.height as f64 * self.land_ratio) as usize
    }
}

/// Takes a *JSON* string with comments and returns it without them, so that `serde_json` can parse it.
///
/// Supports line comments (`//...`) and block comments (`/*...*/`). Comment characters are replaced with
/// spaces, so parse errors still point at the right line and column.
pub fn strip_json_comments(json_with_comments: &str) -> String {
    let mut json = String::with_capacity(json_with_comments.len());
    let mut chars = json_with_comments.chars().peekable();

    let mut in_string = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(current) = chars.next() {
        if in_line_comment {
            if current == '\n' {
                in_line_comment = false;
                json.push('\n');
            } else {
                json.push(' ');
            }
            continue;
        }

        if in_block_comment {
            if current == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
                json.push_str("  ");
            } else if current == '\n' {
                json.push('\n');
            } else {
                json.push(' ');
            }
            continue;
        }

        if in_string {
            json.push(current);
            if current == '\\' {
                // Keep the escaped character, it can be a quote.
                if let Some(escaped) = chars.next() {
                    json.push(escaped);
                }
            } else if current == '"' {
                in_string = false;
            }
            continue;
        }

        match (current, chars.peek()) {
            ('"', _) => {
                in_string = true;
                json.push(current);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
                json.push_str("  ");
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
                json.push_str("  ");
            }
            _ => json.push(current),
        }
    }

    json
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_and_block_comments() {
        let json = r#"{
            // the seed
            "key": 7, /* inline */ "width": 12
        }"#;
        let stripped = strip_json_comments(json);
        assert!(!stripped.contains("the seed"));
        assert!(!stripped.contains("inline"));
        assert_eq!(stripped.len(), json.len());
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["key"], 7);
        assert_eq!(value["width"], 12);
    }

    #[test]
    fn comment_markers_inside_strings_are_kept() {
        let json = r#"{"url": "http://example.com/*x*/", "quote": "a \"//\" b"}"#;
        assert_eq!(strip_json_comments(json), json);
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let map_parameters = MapParameters::from_json_str(
            r#"{
                // only what differs from the defaults
                "width": 24,
                "height": 16,
                "key": 42,
                "paint_strategy": "iterative",
                "remove_lone_sea": false
            }"#,
        )
        .unwrap();

        assert_eq!(map_parameters.width, 24);
        assert_eq!(map_parameters.height, 16);
        assert_eq!(map_parameters.seed, 42);
        assert_eq!(map_parameters.paint_strategy, PaintStrategy::Iterative);
        assert!(!map_parameters.remove_lone_sea);
        assert_eq!(map_parameters.village_spacing, 5);
    }

    #[test]
    fn seed_alias_is_accepted() {
        let map_parameters = MapParameters::from_json_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(map_parameters.seed, 9);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            MapParameters::from_json_str(r#"{"widht": 10}"#),
            Err(MapError::Json(_))
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            MapParameters {
                width: MapParameters::MAX_DIMENSION + 1,
                ..Default::default()
            },
            MapParameters {
                height: 2,
                ..Default::default()
            },
            MapParameters {
                land_ratio: 1.5,
                ..Default::default()
            },
            MapParameters {
                forest_ratio: -0.1,
                ..Default::default()
            },
            MapParameters {
                min_starting_distance: 1.0,
                ..Default::default()
            },
            MapParameters {
                growth_acceptance: [1.0, 0.5, 2.0, 0.0],
                ..Default::default()
            },
            MapParameters {
                village_spacing: 0,
                ..Default::default()
            },
            MapParameters {
                max_corridor_attempts: 0,
                ..Default::default()
            },
        ];

        for map_parameters in cases {
            assert!(
                matches!(map_parameters.validate(), Err(MapError::InvalidConfig(_))),
                "accepted {map_parameters:?}"
            );
        }
        assert!(MapParameters::default().validate().is_ok());
    }

    #[test]
    fn resolve_seed_keeps_explicit_seed() {
        let mut map_parameters = MapParameters {
            seed: 1234,
            ..Default::default()
        };
        assert_eq!(map_parameters.resolve_seed(), 1234);

        let mut map_parameters = MapParameters::default();
        let seed = map_parameters.resolve_seed();
        assert!((1..=MapParameters::MAX_RANDOM_SEED).contains(&seed));
        assert_eq!(map_parameters.seed, seed);
    }

    #[test]
    fn feature_counts_round_down() {
        let map_parameters = MapParameters {
            mountain_ratio: 0.05,
            forest_ratio: 0.1,
            ..Default::default()
        };
        assert_eq!(map_parameters.target_land_count(), 200);
        assert_eq!(map_parameters.mountain_count(), 10);
        assert_eq!(map_parameters.forest_count(), 20);
    }
}
