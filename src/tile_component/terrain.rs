use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Every kind of tile a skirmish map can hold.
///
/// Each variant has a fixed single-character representation used by the output format,
/// see [`Terrain::symbol`].
#[derive(Enum, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    NeutralVillage,
    NeutralBarracks,
    NeutralTower,
    NeutralPort,
    NeutralHideout,

    PlayerOneVillage,
    PlayerOneBarracks,
    PlayerOneTower,
    PlayerOnePort,
    PlayerOneHideout,
    PlayerOneStronghold,

    PlayerTwoVillage,
    PlayerTwoBarracks,
    PlayerTwoTower,
    PlayerTwoPort,
    PlayerTwoHideout,
    PlayerTwoStronghold,

    Unknown,
    Plain,
    Forest,
    Mountain,
    Sea,
    Reef,
    Road,
    River,
    Shore,

    /// Temporary marker of the path carved from player one's headquarters.
    PlayerOneTrail,
    /// Temporary marker of the path carved from player two's headquarters.
    PlayerTwoTrail,
}

impl Terrain {
    pub fn name(&self) -> &str {
        match self {
            Terrain::NeutralVillage => "Neutral Village",
            Terrain::NeutralBarracks => "Neutral Barracks",
            Terrain::NeutralTower => "Neutral Tower",
            Terrain::NeutralPort => "Neutral Port",
            Terrain::NeutralHideout => "Neutral Hideout",
            Terrain::PlayerOneVillage => "Player One Village",
            Terrain::PlayerOneBarracks => "Player One Barracks",
            Terrain::PlayerOneTower => "Player One Tower",
            Terrain::PlayerOnePort => "Player One Port",
            Terrain::PlayerOneHideout => "Player One Hideout",
            Terrain::PlayerOneStronghold => "Player One Stronghold",
            Terrain::PlayerTwoVillage => "Player Two Village",
            Terrain::PlayerTwoBarracks => "Player Two Barracks",
            Terrain::PlayerTwoTower => "Player Two Tower",
            Terrain::PlayerTwoPort => "Player Two Port",
            Terrain::PlayerTwoHideout => "Player Two Hideout",
            Terrain::PlayerTwoStronghold => "Player Two Stronghold",
            Terrain::Unknown => "Unknown",
            Terrain::Plain => "Plain",
            Terrain::Forest => "Forest",
            Terrain::Mountain => "Mountain",
            Terrain::Sea => "Sea",
            Terrain::Reef => "Reef",
            Terrain::Road => "Road",
            Terrain::River => "River",
            Terrain::Shore => "Shore",
            Terrain::PlayerOneTrail => "Player One Trail",
            Terrain::PlayerTwoTrail => "Player Two Trail",
        }
    }

    /// The character representing this terrain in a generated map file.
    ///
    /// Both trail markers share the road character; they never survive generation.
    pub const fn symbol(&self) -> char {
        match self {
            Terrain::NeutralVillage => 'a',
            Terrain::NeutralBarracks => 'b',
            Terrain::NeutralTower => 'c',
            Terrain::NeutralPort => 'd',
            Terrain::NeutralHideout => 'V',
            Terrain::PlayerOneVillage => 'e',
            Terrain::PlayerOneBarracks => 'f',
            Terrain::PlayerOneTower => 'g',
            Terrain::PlayerOnePort => 'h',
            Terrain::PlayerOneHideout => 'Q',
            Terrain::PlayerOneStronghold => 'i',
            Terrain::PlayerTwoVillage => 'j',
            Terrain::PlayerTwoBarracks => 'l',
            Terrain::PlayerTwoTower => 'm',
            Terrain::PlayerTwoPort => 'n',
            Terrain::PlayerTwoHideout => '5',
            Terrain::PlayerTwoStronghold => 'o',
            Terrain::Unknown => '_',
            Terrain::Plain => '.',
            Terrain::Forest => '@',
            Terrain::Mountain => '^',
            Terrain::Sea => ',',
            Terrain::Reef => '%',
            Terrain::Road | Terrain::PlayerOneTrail | Terrain::PlayerTwoTrail => '=',
            Terrain::River => '[',
            Terrain::Shore => '<',
        }
    }

    /// Parses a map character back into its terrain. `'='` always reads as [`Terrain::Road`].
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let terrain = match symbol {
            'a' => Terrain::NeutralVillage,
            'b' => Terrain::NeutralBarracks,
            'c' => Terrain::NeutralTower,
            'd' => Terrain::NeutralPort,
            'V' => Terrain::NeutralHideout,
            'e' => Terrain::PlayerOneVillage,
            'f' => Terrain::PlayerOneBarracks,
            'g' => Terrain::PlayerOneTower,
            'h' => Terrain::PlayerOnePort,
            'Q' => Terrain::PlayerOneHideout,
            'i' => Terrain::PlayerOneStronghold,
            'j' => Terrain::PlayerTwoVillage,
            'l' => Terrain::PlayerTwoBarracks,
            'm' => Terrain::PlayerTwoTower,
            'n' => Terrain::PlayerTwoPort,
            '5' => Terrain::PlayerTwoHideout,
            'o' => Terrain::PlayerTwoStronghold,
            '_' => Terrain::Unknown,
            '.' => Terrain::Plain,
            '@' => Terrain::Forest,
            '^' => Terrain::Mountain,
            ',' => Terrain::Sea,
            '%' => Terrain::Reef,
            '=' => Terrain::Road,
            '[' => Terrain::River,
            '<' => Terrain::Shore,
            _ => return None,
        };
        Some(terrain)
    }

    #[inline]
    pub const fn is_water(&self) -> bool {
        matches!(self, Terrain::Sea | Terrain::Reef)
    }

    #[inline]
    pub const fn is_land(&self) -> bool {
        !self.is_water()
    }

    pub const fn is_trail(&self) -> bool {
        matches!(self, Terrain::PlayerOneTrail | Terrain::PlayerTwoTrail)
    }

    pub const fn is_building(&self) -> bool {
        matches!(
            self,
            Terrain::NeutralVillage
                | Terrain::NeutralBarracks
                | Terrain::NeutralTower
                | Terrain::NeutralPort
                | Terrain::NeutralHideout
                | Terrain::PlayerOneVillage
                | Terrain::PlayerOneBarracks
                | Terrain::PlayerOneTower
                | Terrain::PlayerOnePort
                | Terrain::PlayerOneHideout
                | Terrain::PlayerOneStronghold
                | Terrain::PlayerTwoVillage
                | Terrain::PlayerTwoBarracks
                | Terrain::PlayerTwoTower
                | Terrain::PlayerTwoPort
                | Terrain::PlayerTwoHideout
                | Terrain::PlayerTwoStronghold
        )
    }

    /// How easily a foot unit crosses this terrain. Lower is harder; water is `0.0`.
    ///
    /// Only used as a generation heuristic by the terrain painter.
    pub const fn movement_cost(&self) -> f64 {
        match self {
            Terrain::Sea | Terrain::Reef => 0.0,
            Terrain::Mountain => 0.25,
            Terrain::River => 0.4,
            Terrain::Forest => 0.5,
            _ => 1.0,
        }
    }

    /// Display color used by the preview image.
    pub const fn color(&self) -> [u8; 3] {
        match self {
            Terrain::Sea => [40, 90, 170],
            Terrain::Reef => [70, 150, 190],
            Terrain::River => [80, 140, 220],
            Terrain::Shore => [220, 210, 150],
            Terrain::Plain | Terrain::Unknown => [150, 200, 100],
            Terrain::Forest => [40, 120, 50],
            Terrain::Mountain => [130, 110, 90],
            Terrain::Road | Terrain::PlayerOneTrail | Terrain::PlayerTwoTrail => [190, 170, 130],
            Terrain::NeutralVillage
            | Terrain::NeutralBarracks
            | Terrain::NeutralTower
            | Terrain::NeutralPort
            | Terrain::NeutralHideout => [230, 230, 230],
            Terrain::PlayerOneVillage
            | Terrain::PlayerOneBarracks
            | Terrain::PlayerOneTower
            | Terrain::PlayerOnePort
            | Terrain::PlayerOneHideout
            | Terrain::PlayerOneStronghold => [200, 50, 50],
            Terrain::PlayerTwoVillage
            | Terrain::PlayerTwoBarracks
            | Terrain::PlayerTwoTower
            | Terrain::PlayerTwoPort
            | Terrain::PlayerTwoHideout
            | Terrain::PlayerTwoStronghold => [50, 70, 200],
        }
    }
}

/// A building kind that is always placed as a mirrored pair.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Building {
    Stronghold,
    Barracks,
    Tower,
    Village,
}

impl Building {
    /// The terrain placed at a tile and at its mirror.
    ///
    /// Villages are neutral on both sides; everything else is owned by the player whose half it is on.
    pub const fn terrain_pair(self) -> (Terrain, Terrain) {
        match self {
            Building::Stronghold => (Terrain::PlayerOneStronghold, Terrain::PlayerTwoStronghold),
            Building::Barracks => (Terrain::PlayerOneBarracks, Terrain::PlayerTwoBarracks),
            Building::Tower => (Terrain::PlayerOneTower, Terrain::PlayerTwoTower),
            Building::Village => (Terrain::NeutralVillage, Terrain::NeutralVillage),
        }
    }
}
