use crate::constants::SITE_ATTEMPTS_PER_CITY;
use crate::coords::point::TileGrid;
use crate::coords::Point;
use crate::generation::collision::CollisionService;
use crate::generation::lib::{get_adjacent_points, MapBounds};
use crate::rng::SeededRandom;
use log::*;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// A candidate city location: a seed tile whose connected buildable component holds `area_size`
/// tiles.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct CityStartPoint {
  pub tg: Point<TileGrid>,
  pub area_size: usize,
}

/// Finds city sites by sampling random tiles and flood-filling the connected buildable area
/// around each. The attempt budget bounds runtime on hostile maps; returning fewer sites than
/// requested is a valid outcome, not an error.
pub struct SiteFinder<'a> {
  collision: &'a CollisionService<'a>,
}

impl<'a> SiteFinder<'a> {
  pub fn new(collision: &'a CollisionService<'a>) -> Self {
    Self { collision }
  }

  /// Returns up to `target_city_count` start points whose buildable component holds at least
  /// `min_area_size` tiles, sorted by descending area.
  pub fn find(
    &self,
    target_city_count: usize,
    min_area_size: usize,
    bounds: &MapBounds,
    rng: &mut SeededRandom,
  ) -> Vec<CityStartPoint> {
    if target_city_count == 0 {
      return Vec::new();
    }
    let mut globally_checked: HashSet<Point<TileGrid>> = HashSet::new();
    let mut sites: Vec<CityStartPoint> = Vec::new();
    let max_attempts = SITE_ATTEMPTS_PER_CITY * target_city_count;
    for _ in 0..max_attempts {
      if sites.len() >= target_city_count {
        break;
      }
      let tg = Point::new_tile_grid(
        rng.next_int_inclusive(bounds.min.x, bounds.max.x),
        rng.next_int_inclusive(bounds.min.z, bounds.max.z),
      );
      if globally_checked.contains(&tg) {
        continue;
      }
      let area_size = self.flood_fill(tg, bounds, &mut globally_checked);
      if area_size >= min_area_size {
        sites.push(CityStartPoint { tg, area_size });
      }
    }
    if sites.len() < target_city_count {
      warn!(
        "Found only {} of {} requested city site(s) within the attempt budget",
        sites.len(),
        target_city_count
      );
    }
    sites.sort_by(|a, b| b.area_size.cmp(&a.area_size));

    sites
  }

  /// BFS over buildable land starting at `start`. Every tile the search touches is added to
  /// `globally_checked` so later attempts never re-explore the same component.
  fn flood_fill(&self, start: Point<TileGrid>, bounds: &MapBounds, globally_checked: &mut HashSet<Point<TileGrid>>) -> usize {
    globally_checked.insert(start);
    if !self.collision.is_buildable_land(&start, &start) {
      return 0;
    }
    let mut visited: HashSet<Point<TileGrid>> = HashSet::from([start]);
    let mut queue: VecDeque<Point<TileGrid>> = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
      for (_, neighbour) in get_adjacent_points(&current) {
        if !bounds.contains(&neighbour) || visited.contains(&neighbour) {
          continue;
        }
        if self.collision.is_buildable_land(&current, &neighbour) {
          visited.insert(neighbour);
          globally_checked.insert(neighbour);
          queue.push_back(neighbour);
        }
      }
    }

    visited.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generation::terrain::{TerrainGenerator, TerrainWorld};
  use crate::settings::WorldGenerationSettings;

  fn flat_settings() -> WorldGenerationSettings {
    WorldGenerationSettings {
      seed: 321,
      render_distance: 2,
      water_level: 0,
      steepness: 0,
      continuity: 10,
      max_height: 2,
      chunk_size: 8,
    }
  }

  fn find_sites(terrain: &TerrainWorld, target: usize, min_area: usize, seed: u32) -> Vec<CityStartPoint> {
    let bounds = MapBounds::from_settings(&flat_settings());
    let collision = CollisionService::new(terrain, bounds);
    let finder = SiteFinder::new(&collision);
    finder.find(target, min_area, &bounds, &mut SeededRandom::new(seed))
  }

  #[test]
  fn find_returns_a_site_with_the_claimed_area_on_a_flat_map() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    let sites = find_sites(&terrain, 1, 10, 1);
    assert_eq!(sites.len(), 1);
    // The whole 24x24 map is a single buildable component
    assert_eq!(sites[0].area_size, 24 * 24);
    assert!(!terrain.is_water_at(&sites[0].tg));
  }

  #[test]
  fn find_never_returns_two_sites_from_the_same_component() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    // The flat map is one component, so only one site can exist no matter the target
    let sites = find_sites(&terrain, 3, 10, 2);
    assert_eq!(sites.len(), 1);
  }

  #[test]
  fn find_returns_nothing_on_an_all_water_map() {
    let settings = WorldGenerationSettings {
      water_level: 25,
      ..flat_settings()
    };
    let terrain = TerrainGenerator::generate(&settings);
    let bounds = MapBounds::from_settings(&settings);
    let collision = CollisionService::new(&terrain, bounds);
    let finder = SiteFinder::new(&collision);
    let sites = finder.find(5, 10, &bounds, &mut SeededRandom::new(9));
    assert!(sites.is_empty());
  }

  #[test]
  fn find_ignores_components_below_the_minimum_area() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    let sites = find_sites(&terrain, 1, 24 * 24 + 1, 4);
    assert!(sites.is_empty());
  }

  #[test]
  fn find_sorts_sites_by_descending_area() {
    let terrain = TerrainGenerator::generate(&WorldGenerationSettings {
      seed: 77,
      render_distance: 3,
      ..Default::default()
    });
    let bounds = MapBounds::from_settings(&WorldGenerationSettings {
      render_distance: 3,
      ..Default::default()
    });
    let collision = CollisionService::new(&terrain, bounds);
    let finder = SiteFinder::new(&collision);
    let sites = finder.find(4, 10, &bounds, &mut SeededRandom::new(8));
    for pair in sites.windows(2) {
      assert!(pair[0].area_size >= pair[1].area_size);
    }
  }

  #[test]
  fn find_is_deterministic_for_a_seed() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    assert_eq!(find_sites(&terrain, 3, 10, 55), find_sites(&terrain, 3, 10, 55));
  }

  #[test]
  fn find_with_zero_target_returns_immediately() {
    let terrain = TerrainGenerator::generate(&flat_settings());
    assert!(find_sites(&terrain, 0, 1, 1).is_empty());
  }
}
