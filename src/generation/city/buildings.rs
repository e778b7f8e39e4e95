use crate::coords::point::TileGrid;
use crate::coords::Point;
use crate::errors::GenerationError;
use crate::generation::city::catalog::{BuildingCatalog, BuildingType};
use crate::generation::city::roads::RoadNetwork;
use crate::generation::collision::CollisionService;
use crate::generation::lib::get_adjacent_points;
use crate::rng::SeededRandom;
use log::*;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashSet;

/// A placed building, occupying `width × depth` tiles starting at its origin tile.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Building {
  pub tg: Point<TileGrid>,
  pub building_type: BuildingType,
}

impl Building {
  /// All tiles covered by this building's footprint, row-major.
  pub fn footprint(&self) -> Vec<Point<TileGrid>> {
    let mut tiles = Vec::with_capacity((self.building_type.width * self.building_type.depth) as usize);
    for dz in 0..self.building_type.depth {
      for dx in 0..self.building_type.width {
        tiles.push(Point::new_tile_grid(self.tg.x + dx, self.tg.z + dz));
      }
    }
    tiles
  }
}

/// The outcome of a placement run. Partial success is a valid outcome: the placer stops once the
/// shuffled candidate list is exhausted, and the orchestrator decides what shortfall is usable.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct BuildingPlacement {
  pub buildings: Vec<Building>,
  pub total_population: i32,
}

/// Fills road-adjacent tiles with buildings until the target population is reached or the
/// search space is exhausted.
pub struct BuildingPlacer<'a> {
  collision: &'a CollisionService<'a>,
  catalog: &'a BuildingCatalog,
}

impl<'a> BuildingPlacer<'a> {
  pub fn new(collision: &'a CollisionService<'a>, catalog: &'a BuildingCatalog) -> Self {
    Self { collision, catalog }
  }

  pub fn place(
    &self,
    roads: &RoadNetwork,
    target_population: i32,
    rng: &mut SeededRandom,
  ) -> Result<BuildingPlacement, GenerationError> {
    let mut candidates = enumerate_candidate_origins(roads);
    candidates.shuffle(rng);

    let mut occupied: HashSet<Point<TileGrid>> = HashSet::new();
    let mut buildings: Vec<Building> = Vec::new();
    let mut total_population = 0;
    for origin in candidates {
      if total_population >= target_population {
        break;
      }
      let building_type = *self.pick_building_type(target_population - total_population, rng)?;
      if !self.fits(&origin, &building_type, roads, &occupied) {
        continue;
      }
      let adjacent_to_dead_end = get_adjacent_points(&origin)
        .iter()
        .any(|(_, neighbour)| roads.dead_ends.contains(neighbour));
      if adjacent_to_dead_end && self.collision.would_block_road_extension(&origin, roads) {
        continue;
      }
      let building = Building {
        tg: origin,
        building_type,
      };
      occupied.extend(building.footprint());
      total_population += building_type.population;
      buildings.push(building);
    }
    if total_population < target_population {
      debug!(
        "Placement exhausted at {} of {} target population with {} building(s)",
        total_population,
        target_population,
        buildings.len()
      );
    }

    Ok(BuildingPlacement {
      buildings,
      total_population,
    })
  }

  /// Picks the next building type: while plenty of population remains there is a 30% chance to
  /// draw a dense type, otherwise the pick comes from the low-to-medium band.
  fn pick_building_type(&self, remaining: i32, rng: &mut SeededRandom) -> Result<&BuildingType, GenerationError> {
    if remaining >= 40 && rng.next_boolean(0.3) {
      self.catalog.select_random_by_population(rng, 20, 45)
    } else {
      self.catalog.select_random_by_population(rng, 8, 30)
    }
  }

  /// Whether the full footprint sits on flat dry ground and every tile is free of roads,
  /// buildings, and water.
  fn fits(
    &self,
    origin: &Point<TileGrid>,
    building_type: &BuildingType,
    roads: &RoadNetwork,
    occupied: &HashSet<Point<TileGrid>>,
  ) -> bool {
    let terrain_check = self
      .collision
      .validate_building_terrain(origin, building_type.width, building_type.depth);
    if terrain_check.has_collision {
      return false;
    }
    for dz in 0..building_type.depth {
      for dx in 0..building_type.width {
        let tile = Point::new_tile_grid(origin.x + dx, origin.z + dz);
        if self.collision.can_place_building(&tile, roads, occupied).has_collision {
          return false;
        }
      }
    }
    true
  }
}

/// Every orthogonal neighbour of every road tile that is not itself a road, in placement order
/// and de-duplicated, ready for the PRNG shuffle.
fn enumerate_candidate_origins(roads: &RoadNetwork) -> Vec<Point<TileGrid>> {
  let mut seen: HashSet<Point<TileGrid>> = HashSet::new();
  let mut candidates: Vec<Point<TileGrid>> = Vec::new();
  for tile in roads.tiles() {
    for (_, neighbour) in get_adjacent_points(&tile.tg) {
      if !roads.contains(&neighbour) && seen.insert(neighbour) {
        candidates.push(neighbour);
      }
    }
  }
  candidates
}
