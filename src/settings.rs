use crate::constants::*;
use crate::errors::GenerationError;
use serde::{Deserialize, Serialize};

/// All knobs of the generation pipeline, grouped by concern. Every field has a constant-backed
/// default so hosts can override selectively.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
  pub world: WorldGenerationSettings,
  pub city: CityGenerationSettings,
  pub object: ObjectGenerationSettings,
}

impl Settings {
  /// Validates every range constraint. Invalid settings are the one condition that is surfaced
  /// as a hard error rather than being recovered from.
  pub fn validate(&self) -> Result<(), GenerationError> {
    let world = &self.world;
    if !(1..=8).contains(&world.render_distance) {
      return Err(GenerationError::InvalidRenderDistance(world.render_distance));
    }
    if world.steepness < 1 {
      return Err(GenerationError::InvalidSteepness(world.steepness));
    }
    if world.continuity < 0 {
      return Err(GenerationError::InvalidContinuity(world.continuity));
    }
    if !(1..=MAX_HEIGHT).contains(&world.max_height) {
      return Err(GenerationError::InvalidMaxHeight(world.max_height, MAX_HEIGHT));
    }
    if world.chunk_size < 2 {
      return Err(GenerationError::InvalidChunkSize(world.chunk_size));
    }
    if self.city.min_area_size < 1 {
      return Err(GenerationError::InvalidMinAreaSize);
    }
    Ok(())
  }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WorldGenerationSettings {
  pub seed: u32,
  /// Number of chunk rings around the origin; `1` generates a single chunk, `2` a 3×3 square.
  pub render_distance: u32,
  /// Tiles at or below this height are water.
  pub water_level: i32,
  /// Maximum height difference between two adjacent tiles.
  pub steepness: i32,
  /// The higher the continuity, the more strongly a cell is pulled towards its neighbours' heights.
  pub continuity: i32,
  pub max_height: i32,
  pub chunk_size: i32,
}

impl Default for WorldGenerationSettings {
  fn default() -> Self {
    Self {
      seed: DEFAULT_SEED,
      render_distance: DEFAULT_RENDER_DISTANCE,
      water_level: DEFAULT_WATER_LEVEL,
      steepness: DEFAULT_STEEPNESS,
      continuity: DEFAULT_CONTINUITY,
      max_height: MAX_HEIGHT,
      chunk_size: CHUNK_SIZE,
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CityGenerationSettings {
  pub target_city_count: usize,
  /// Minimum number of connected buildable tiles a site must have to host a city.
  pub min_area_size: usize,
}

impl Default for CityGenerationSettings {
  fn default() -> Self {
    Self {
      target_city_count: DEFAULT_TARGET_CITY_COUNT,
      min_area_size: DEFAULT_MIN_AREA_SIZE,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectGenerationSettings {
  /// Minimum number of connected same-height tiles that make up a forest.
  pub min_forest_size: usize,
  /// Probability that an eligible tile carries any trees at all.
  pub tree_probability: f64,
}

impl Default for ObjectGenerationSettings {
  fn default() -> Self {
    Self {
      min_forest_size: MIN_FOREST_SIZE,
      tree_probability: TREE_PROBABILITY,
    }
  }
}
