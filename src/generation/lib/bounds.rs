use crate::coords::point::TileGrid;
use crate::coords::Point;
use crate::settings::WorldGenerationSettings;
use serde::{Deserialize, Serialize};

/// The inclusive rectangle of tiles that queries and placement are allowed to touch.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
  pub min: Point<TileGrid>,
  pub max: Point<TileGrid>,
}

impl MapBounds {
  pub fn new(min: Point<TileGrid>, max: Point<TileGrid>) -> Self {
    Self { min, max }
  }

  /// The tile rectangle covered by the generated chunks: `render_distance` counts rings, so the
  /// chunk coordinates span `[-(render_distance - 1), render_distance - 1]` on both axes.
  pub fn from_settings(settings: &WorldGenerationSettings) -> Self {
    let radius = settings.render_distance as i32 - 1;
    let size = settings.chunk_size;
    Self {
      min: Point::new_tile_grid(-radius * size, -radius * size),
      max: Point::new_tile_grid(radius * size + size - 1, radius * size + size - 1),
    }
  }

  pub fn contains(&self, tg: &Point<TileGrid>) -> bool {
    tg.x >= self.min.x && tg.x <= self.max.x && tg.z >= self.min.z && tg.z <= self.max.z
  }

  /// Shrinks the rectangle by `margin` tiles on every side. Collapses to the centre if the
  /// margin is larger than the rectangle.
  pub fn inset(&self, margin: i32) -> Self {
    let centre_x = (self.min.x + self.max.x) / 2;
    let centre_z = (self.min.z + self.max.z) / 2;
    Self {
      min: Point::new_tile_grid((self.min.x + margin).min(centre_x), (self.min.z + margin).min(centre_z)),
      max: Point::new_tile_grid((self.max.x - margin).max(centre_x), (self.max.z - margin).max(centre_z)),
    }
  }
}
