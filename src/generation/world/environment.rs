use crate::constants::{FOREST_DENSITY_MAX, FOREST_DENSITY_MIN};
use crate::coords::point::TileGrid;
use crate::coords::Point;
use crate::generation::lib::{get_adjacent_points, MapBounds, TileType};
use crate::generation::terrain::TerrainWorld;
use crate::rng::SeededRandom;
use crate::settings::ObjectGenerationSettings;
use log::*;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter, Serialize)]
pub enum TreeType {
  Oak,
  Pine,
  Birch,
  Willow,
}

impl TreeType {
  pub const ALL: [TreeType; 4] = [TreeType::Oak, TreeType::Pine, TreeType::Birch, TreeType::Willow];
}

/// A single scattered tree. The ground height is baked in so a renderer can position the trunk
/// without a terrain lookup.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Tree {
  pub id: u32,
  pub tg: Point<TileGrid>,
  pub tree_type: TreeType,
  pub height_of_ground: i32,
}

/// A contiguous patch of same-height grass, hill, or mountain tiles dense with trees. The
/// renderer derives the individual trunks from `tree_density`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forest {
  pub id: u32,
  pub tiles: Vec<Point<TileGrid>>,
  pub tree_density: f64,
}

fn is_forest_ground(tile_type: TileType) -> bool {
  matches!(tile_type, TileType::Grass | TileType::Hill | TileType::Mountain)
}

/// Finds connected components of same-height forest-capable tiles and samples them without
/// replacement until `2 × city_count` forests are chosen or the components run out.
pub fn find_forests(
  terrain: &TerrainWorld,
  bounds: &MapBounds,
  city_count: usize,
  settings: &ObjectGenerationSettings,
  rng: &mut SeededRandom,
) -> Vec<Forest> {
  let mut visited: HashSet<Point<TileGrid>> = HashSet::new();
  let mut components: Vec<Vec<Point<TileGrid>>> = Vec::new();
  for z in bounds.min.z..=bounds.max.z {
    for x in bounds.min.x..=bounds.max.x {
      let tg = Point::new_tile_grid(x, z);
      if visited.contains(&tg) {
        continue;
      }
      let Some(tile) = terrain.tile_at(&tg) else {
        continue;
      };
      if !is_forest_ground(tile.tile_type) {
        continue;
      }
      let component = collect_component(terrain, bounds, tg, tile.height, &mut visited);
      if component.len() >= settings.min_forest_size {
        components.push(component);
      }
    }
  }

  let target = 2 * city_count;
  let mut forests: Vec<Forest> = Vec::new();
  while forests.len() < target && !components.is_empty() {
    let index = rng.next_int(0, components.len() as i32) as usize;
    let tiles = components.swap_remove(index);
    let tree_density = FOREST_DENSITY_MIN + rng.next_float() * (FOREST_DENSITY_MAX - FOREST_DENSITY_MIN);
    forests.push(Forest {
      id: forests.len() as u32,
      tiles,
      tree_density,
    });
  }
  if forests.len() < target {
    debug!("Found only {} of {} requested forest(s)", forests.len(), target);
  }

  forests
}

/// BFS over tiles of the same height and a forest-capable type.
fn collect_component(
  terrain: &TerrainWorld,
  bounds: &MapBounds,
  start: Point<TileGrid>,
  height: i32,
  visited: &mut HashSet<Point<TileGrid>>,
) -> Vec<Point<TileGrid>> {
  visited.insert(start);
  let mut component = vec![start];
  let mut queue: VecDeque<Point<TileGrid>> = VecDeque::from([start]);
  while let Some(current) = queue.pop_front() {
    for (_, neighbour) in get_adjacent_points(&current) {
      if !bounds.contains(&neighbour) || visited.contains(&neighbour) {
        continue;
      }
      let Some(tile) = terrain.tile_at(&neighbour) else {
        continue;
      };
      if tile.height == height && is_forest_ground(tile.tile_type) {
        visited.insert(neighbour);
        component.push(neighbour);
        queue.push_back(neighbour);
      }
    }
  }

  component
}

/// Scatters individual trees over every eligible tile outside the forests. A tile carries trees
/// with the configured probability, 0 to 3 of them, 0 to 2 on mountains.
pub fn scatter_trees(
  terrain: &TerrainWorld,
  bounds: &MapBounds,
  forests: &[Forest],
  tree_probability: f64,
  rng: &mut SeededRandom,
) -> Vec<Tree> {
  let forest_tiles: HashSet<Point<TileGrid>> = forests.iter().flat_map(|f| f.tiles.iter().copied()).collect();
  let mut trees: Vec<Tree> = Vec::new();
  for z in bounds.min.z..=bounds.max.z {
    for x in bounds.min.x..=bounds.max.x {
      let tg = Point::new_tile_grid(x, z);
      let Some(tile) = terrain.tile_at(&tg) else {
        continue;
      };
      if matches!(tile.tile_type, TileType::Water | TileType::Sand | TileType::Peak) || forest_tiles.contains(&tg) {
        continue;
      }
      if !rng.next_boolean(tree_probability) {
        continue;
      }
      let max_count = if tile.tile_type == TileType::Mountain { 2 } else { 3 };
      let count = rng.next_int_inclusive(0, max_count);
      for _ in 0..count {
        let tree_type = *rng.choose(&TreeType::ALL).expect("Failed to choose a tree type");
        trees.push(Tree {
          id: trees.len() as u32,
          tg,
          tree_type,
          height_of_ground: tile.height,
        });
      }
    }
  }

  trees
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generation::terrain::TerrainGenerator;
  use crate::settings::WorldGenerationSettings;

  fn flat_settings() -> WorldGenerationSettings {
    WorldGenerationSettings {
      seed: 88,
      render_distance: 2,
      water_level: 0,
      steepness: 0,
      continuity: 10,
      max_height: 2,
      chunk_size: 8,
    }
  }

  #[test]
  fn find_forests_returns_components_of_uniform_height() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    let bounds = MapBounds::from_settings(&flat_settings());
    let settings = ObjectGenerationSettings::default();
    let forests = find_forests(&terrain, &bounds, 1, &settings, &mut SeededRandom::new(1));
    assert!(!forests.is_empty());
    for forest in &forests {
      assert!(forest.tiles.len() >= settings.min_forest_size);
      let heights: HashSet<i32> = forest
        .tiles
        .iter()
        .map(|tg| terrain.height_at(tg))
        .collect();
      assert_eq!(heights.len(), 1);
      assert!((FOREST_DENSITY_MIN..=FOREST_DENSITY_MAX).contains(&forest.tree_density));
    }
  }

  #[test]
  fn find_forests_caps_the_count_at_twice_the_city_count() {
    let terrain = TerrainGenerator::generate(&WorldGenerationSettings {
      seed: 1234,
      render_distance: 3,
      ..Default::default()
    });
    let bounds = MapBounds::from_settings(&WorldGenerationSettings {
      render_distance: 3,
      ..Default::default()
    });
    let settings = ObjectGenerationSettings::default();
    let forests = find_forests(&terrain, &bounds, 2, &settings, &mut SeededRandom::new(3));
    assert!(forests.len() <= 4);
  }

  #[test]
  fn scatter_trees_skips_forest_tiles_and_ineligible_ground() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    let bounds = MapBounds::from_settings(&flat_settings());
    let settings = ObjectGenerationSettings::default();
    let mut rng = SeededRandom::new(6);
    let forests = find_forests(&terrain, &bounds, 1, &settings, &mut rng);
    let forest_tiles: HashSet<Point<TileGrid>> = forests.iter().flat_map(|f| f.tiles.iter().copied()).collect();
    let trees = scatter_trees(&terrain, &bounds, &forests, settings.tree_probability, &mut rng);
    for tree in &trees {
      assert!(!forest_tiles.contains(&tree.tg));
      let tile = terrain.tile_at(&tree.tg).expect("Tree outside generated terrain");
      assert!(!matches!(tile.tile_type, TileType::Water | TileType::Sand | TileType::Peak));
      assert_eq!(tree.height_of_ground, tile.height);
    }
  }

  #[test]
  fn scatter_trees_is_deterministic_for_a_seed() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    let bounds = MapBounds::from_settings(&flat_settings());
    let first = scatter_trees(&terrain, &bounds, &[], 1. / 3., &mut SeededRandom::new(10));
    let second = scatter_trees(&terrain, &bounds, &[], 1. / 3., &mut SeededRandom::new(10));
    assert_eq!(first, second);
  }

  #[test]
  fn scatter_trees_with_zero_probability_places_nothing() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    let bounds = MapBounds::from_settings(&flat_settings());
    let trees = scatter_trees(&terrain, &bounds, &[], 0., &mut SeededRandom::new(10));
    assert!(trees.is_empty());
  }
}
