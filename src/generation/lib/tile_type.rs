use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Classification of a collapsed tile, derived purely from its height and the world's water
/// level. The bands widen with height so that lowlands dominate and peaks stay rare.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum TileType {
  #[default]
  Water,
  Sand,
  Grass,
  Hill,
  Mountain,
  Peak,
}

impl TileType {
  pub fn from_height(height: i32, water_level: i32) -> Self {
    match height {
      h if h <= water_level => TileType::Water,
      h if h <= water_level + 1 => TileType::Sand,
      h if h <= water_level + 3 => TileType::Grass,
      h if h <= water_level + 7 => TileType::Hill,
      h if h <= water_level + 13 => TileType::Mountain,
      _ => TileType::Peak,
    }
  }
}
