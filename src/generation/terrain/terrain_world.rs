use crate::coords::point::{ChunkGrid, TileGrid};
use crate::coords::Point;
use crate::generation::lib::{Chunk, Tile};
use crate::settings::WorldGenerationSettings;
use serde::Serialize;
use std::collections::HashMap;

/// The collapsed terrain of a world: every generated chunk in spiral order plus the parameters
/// it was generated with. Written once by the terrain generator and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainWorld {
  chunks: Vec<Chunk>,
  #[serde(skip)]
  index: HashMap<Point<ChunkGrid>, usize>,
  pub seed: u32,
  pub water_level: i32,
  pub max_height: i32,
  pub steepness: i32,
  pub continuity: i32,
  pub chunk_size: i32,
}

impl TerrainWorld {
  pub fn new(settings: &WorldGenerationSettings) -> Self {
    Self {
      chunks: Vec::new(),
      index: HashMap::new(),
      seed: settings.seed,
      water_level: settings.water_level,
      max_height: settings.max_height,
      steepness: settings.steepness,
      continuity: settings.continuity,
      chunk_size: settings.chunk_size,
    }
  }

  pub fn insert_chunk(&mut self, chunk: Chunk) {
    self.index.insert(chunk.cg, self.chunks.len());
    self.chunks.push(chunk);
  }

  pub fn chunk_at(&self, cg: &Point<ChunkGrid>) -> Option<&Chunk> {
    self.index.get(cg).map(|i| &self.chunks[*i])
  }

  /// All chunks in the order they were generated in.
  pub fn chunks(&self) -> &[Chunk] {
    &self.chunks
  }

  /// Returns the height at the given tile. Tiles outside the generated chunks are treated as
  /// water and report the water level.
  pub fn height_at(&self, tg: &Point<TileGrid>) -> i32 {
    let cg = tg.to_chunk_grid(self.chunk_size);
    let ig = tg.to_internal_grid(self.chunk_size);
    self
      .chunk_at(&cg)
      .and_then(|chunk| chunk.collapsed_height_at(&ig))
      .unwrap_or(self.water_level)
  }

  pub fn is_water_at(&self, tg: &Point<TileGrid>) -> bool {
    self.height_at(tg) <= self.water_level
  }

  /// Returns the full tile record at the given tile, or `None` outside the generated chunks.
  pub fn tile_at(&self, tg: &Point<TileGrid>) -> Option<Tile> {
    let cg = tg.to_chunk_grid(self.chunk_size);
    let ig = tg.to_internal_grid(self.chunk_size);
    self.chunk_at(&cg).and_then(|chunk| chunk.tile(&ig))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coords::Point;
  use crate::generation::lib::Chunk;

  fn world_with_one_chunk() -> TerrainWorld {
    let settings = WorldGenerationSettings {
      chunk_size: 4,
      water_level: 2,
      ..Default::default()
    };
    let mut world = TerrainWorld::new(&settings);
    let mut chunk = Chunk::new(Point::new_chunk_grid(0, 0), 4, 10);
    for z in 0..4 {
      for x in 0..4 {
        let ig = Point::new_internal_grid(x, z);
        chunk.get_cell_mut(&ig).expect("Failed to get cell").collapse_to(x + z, 2);
      }
    }
    world.insert_chunk(chunk);
    world
  }

  #[test]
  fn height_at_reads_collapsed_cells() {
    let world = world_with_one_chunk();
    assert_eq!(world.height_at(&Point::new_tile_grid(0, 0)), 0);
    assert_eq!(world.height_at(&Point::new_tile_grid(3, 3)), 6);
  }

  #[test]
  fn tiles_outside_generated_chunks_are_water() {
    let world = world_with_one_chunk();
    let outside = Point::new_tile_grid(100, -50);
    assert!(world.is_water_at(&outside));
    assert_eq!(world.height_at(&outside), 2);
    assert!(world.tile_at(&outside).is_none());
  }

  #[test]
  fn is_water_at_compares_against_the_water_level() {
    let world = world_with_one_chunk();
    assert!(world.is_water_at(&Point::new_tile_grid(0, 0)));
    assert!(world.is_water_at(&Point::new_tile_grid(2, 0)));
    assert!(!world.is_water_at(&Point::new_tile_grid(3, 0)));
  }
}
