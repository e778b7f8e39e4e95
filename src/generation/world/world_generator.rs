use crate::constants::{LARGE_CITY_MIN_AREA, MEDIUM_CITY_MIN_AREA};
use crate::coords::Point;
use crate::errors::GenerationError;
use crate::generation::city::{BuildingCatalog, CityGenerator, CitySize, GeneratedCity};
use crate::generation::collision::CollisionService;
use crate::generation::lib::{shared, MapBounds, Tile};
use crate::generation::sites::SiteFinder;
use crate::generation::terrain::{TerrainGenerator, TerrainWorld};
use crate::generation::world::environment::{self, Forest, Tree};
use crate::rng::SeededRandom;
use crate::settings::Settings;
use log::*;
use serde::Serialize;
use std::collections::HashSet;

/// The complete generated world: terrain, cities, forests, and scattered trees. Plain data with
/// no rendering side effects; byte-identical across runs for the same settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
  pub terrain: TerrainWorld,
  pub cities: Vec<GeneratedCity>,
  pub forests: Vec<Forest>,
  pub trees: Vec<Tree>,
  pub seed: u32,
}

impl World {
  /// Returns the full tile record at the given coordinates, or `None` outside the generated
  /// chunks.
  pub fn tile_at(&self, x: i32, z: i32) -> Option<Tile> {
    self.terrain.tile_at(&Point::new_tile_grid(x, z))
  }

  /// Deep structural comparison, cheap because the whole model is plain data.
  pub fn structurally_equal(&self, other: &World) -> bool {
    self == other
  }

  pub fn summary(&self) -> WorldSummary {
    WorldSummary {
      chunks: self.terrain.chunks().len(),
      cities: self.cities.len(),
      total_population: self.cities.iter().map(|c| c.total_population).sum(),
      road_tiles: self.cities.iter().map(|c| c.road_network.len()).sum(),
      buildings: self.cities.iter().map(|c| c.buildings.len()).sum(),
      forests: self.forests.len(),
      trees: self.trees.len(),
    }
  }
}

/// Headline counts of a generated world, for progress UI and logs.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct WorldSummary {
  pub chunks: usize,
  pub cities: usize,
  pub total_population: i32,
  pub road_tiles: usize,
  pub buildings: usize,
  pub forests: usize,
  pub trees: usize,
}

/// The top-level pipeline: terrain, then sites, then one city per site, then forests and trees.
/// Each phase only reads the data of earlier phases, so the host may cancel between phases by
/// dropping the call.
pub struct WorldGenerator;

impl WorldGenerator {
  pub fn generate(settings: &Settings) -> Result<World, GenerationError> {
    Self::generate_with_observer(settings, &mut |_, _| {})
  }

  /// Same as [`WorldGenerator::generate`] but forwards per-chunk terrain progress to `observer`.
  pub fn generate_with_observer(
    settings: &Settings,
    observer: &mut dyn FnMut(usize, usize),
  ) -> Result<World, GenerationError> {
    settings.validate()?;
    let start_time = shared::get_time();
    let master_seed = settings.world.seed;

    let terrain = TerrainGenerator::generate_with_observer(&settings.world, observer);
    let bounds = MapBounds::from_settings(&settings.world);
    let collision = CollisionService::new(&terrain, bounds);

    // Sites are searched one chunk in from the rim so road growth has room before the map edge
    let site_bounds = bounds.inset(settings.world.chunk_size);
    let mut sites_rng = SeededRandom::new(shared::derive_seed_for(master_seed, "sites"));
    let finder = SiteFinder::new(&collision);
    let sites = finder.find(
      settings.city.target_city_count,
      settings.city.min_area_size,
      &site_bounds,
      &mut sites_rng,
    );

    let catalog = BuildingCatalog::new();
    let mut city_generator = CityGenerator::new(&collision, &catalog);
    let mut existing_names: HashSet<String> = HashSet::new();
    let mut cities: Vec<GeneratedCity> = Vec::new();
    for site in &sites {
      let size = size_for_area(site.area_size);
      let city = city_generator.generate(site.tg, size, &existing_names, master_seed)?;
      existing_names.insert(city.name.clone());
      cities.push(city);
    }

    let mut objects_rng = SeededRandom::new(shared::derive_seed_for(master_seed, "objects"));
    let forests = environment::find_forests(&terrain, &bounds, cities.len(), &settings.object, &mut objects_rng);
    let trees = environment::scatter_trees(&terrain, &bounds, &forests, settings.object.tree_probability, &mut objects_rng);

    let world = World {
      terrain,
      cities,
      forests,
      trees,
      seed: master_seed,
    };
    let summary = world.summary();
    info!(
      "Generated world with {} chunk(s), {} city(ies), {} inhabitant(s), {} forest(s) and {} tree(s) in {} ms",
      summary.chunks,
      summary.cities,
      summary.total_population,
      summary.forests,
      summary.trees,
      shared::get_time() - start_time
    );

    Ok(world)
  }
}

/// Maps the buildable area of a site to the population tier of the city placed on it.
fn size_for_area(area_size: usize) -> CitySize {
  match area_size {
    a if a >= LARGE_CITY_MIN_AREA => CitySize::Large,
    a if a >= MEDIUM_CITY_MIN_AREA => CitySize::Medium,
    _ => CitySize::Small,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coords::point::TileGrid;
  use crate::generation::lib::{get_adjacent_points, TileType};
  use crate::settings::{CityGenerationSettings, WorldGenerationSettings};

  fn test_settings() -> Settings {
    Settings {
      world: WorldGenerationSettings {
        seed: 20240,
        render_distance: 3,
        water_level: 1,
        steepness: 1,
        continuity: 8,
        max_height: 6,
        chunk_size: 8,
      },
      city: CityGenerationSettings {
        target_city_count: 2,
        min_area_size: 40,
      },
      ..Default::default()
    }
  }

  #[test]
  fn generate_rejects_invalid_settings() {
    let mut settings = test_settings();
    settings.world.render_distance = 0;
    assert!(WorldGenerator::generate(&settings).is_err());
  }

  #[test]
  fn generate_is_deterministic_for_a_seed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let settings = test_settings();
    let first = WorldGenerator::generate(&settings).expect("Failed to generate world");
    let second = WorldGenerator::generate(&settings).expect("Failed to generate world");
    assert!(first.structurally_equal(&second));
    let first_json = serde_json::to_string(&first).expect("Failed to serialise world");
    let second_json = serde_json::to_string(&second).expect("Failed to serialise world");
    assert_eq!(first_json, second_json);
  }

  #[test]
  fn terrain_slope_bound_holds_for_every_adjacent_pair() {
    let settings = test_settings();
    let world = WorldGenerator::generate(&settings).expect("Failed to generate world");
    let bounds = MapBounds::from_settings(&settings.world);
    for x in bounds.min.x..=bounds.max.x {
      for z in bounds.min.z..=bounds.max.z {
        let tg = Point::new_tile_grid(x, z);
        for (_, neighbour) in get_adjacent_points(&tg) {
          if bounds.contains(&neighbour) {
            let delta = (world.terrain.height_at(&tg) - world.terrain.height_at(&neighbour)).abs();
            assert!(delta <= settings.world.steepness);
          }
        }
      }
    }
  }

  #[test]
  fn city_names_are_unique_across_the_world() {
    let world = WorldGenerator::generate(&test_settings()).expect("Failed to generate world");
    let names: HashSet<&String> = world.cities.iter().map(|c| &c.name).collect();
    assert_eq!(names.len(), world.cities.len());
  }

  #[test]
  fn every_road_tile_is_legal_against_bare_terrain() {
    let settings = test_settings();
    let world = WorldGenerator::generate(&settings).expect("Failed to generate world");
    let bounds = MapBounds::from_settings(&settings.world);
    let collision = CollisionService::new(&world.terrain, bounds);
    let empty = crate::generation::city::RoadNetwork::new();
    for city in &world.cities {
      for tile in city.road_network.tiles() {
        let check = collision.can_place_road(&tile.tg, &empty);
        assert!(!check.has_collision, "Road tile {} collides: {:?}", tile.tg, check.collision_type);
      }
    }
  }

  #[test]
  fn every_building_is_legal() {
    let settings = test_settings();
    let world = WorldGenerator::generate(&settings).expect("Failed to generate world");
    let bounds = MapBounds::from_settings(&settings.world);
    for city in &world.cities {
      let mut claimed: HashSet<Point<TileGrid>> = HashSet::new();
      for building in &city.buildings {
        let mut touches_road = false;
        for tile in building.footprint() {
          assert!(bounds.contains(&tile));
          assert!(!world.terrain.is_water_at(&tile));
          assert!(!city.road_network.contains(&tile));
          assert!(claimed.insert(tile));
          touches_road |= get_adjacent_points(&tile)
            .iter()
            .any(|(_, n)| city.road_network.contains(n));
        }
        assert!(touches_road);
      }
    }
  }

  #[test]
  fn population_accounting_is_exact_per_city() {
    let world = WorldGenerator::generate(&test_settings()).expect("Failed to generate world");
    for city in &world.cities {
      let sum: i32 = city.buildings.iter().map(|b| b.building_type.population).sum();
      assert_eq!(city.total_population, sum);
    }
  }

  #[test]
  fn tile_at_exposes_classified_tiles() {
    let world = WorldGenerator::generate(&test_settings()).expect("Failed to generate world");
    let tile = world.tile_at(0, 0).expect("Failed to get tile at origin");
    assert_eq!(tile.tile_type, TileType::from_height(tile.height, world.terrain.water_level));
    assert!(world.tile_at(10_000, 0).is_none());
  }

  #[test]
  fn summary_counts_match_the_emitted_data() {
    let world = WorldGenerator::generate(&test_settings()).expect("Failed to generate world");
    let summary = world.summary();
    assert_eq!(summary.chunks, 25);
    assert_eq!(summary.cities, world.cities.len());
    assert_eq!(summary.trees, world.trees.len());
    assert_eq!(
      summary.total_population,
      world.cities.iter().map(|c| c.total_population).sum::<i32>()
    );
  }

  #[test]
  fn size_for_area_maps_tier_thresholds() {
    assert_eq!(size_for_area(30), CitySize::Small);
    assert_eq!(size_for_area(150), CitySize::Medium);
    assert_eq!(size_for_area(399), CitySize::Medium);
    assert_eq!(size_for_area(400), CitySize::Large);
  }

  #[test]
  fn small_tier_population_stays_within_the_tolerated_band() {
    // Flat terrain so placement is only bounded by the road network's candidate space
    let mut settings = test_settings();
    settings.world = WorldGenerationSettings {
      seed: 1,
      render_distance: 3,
      water_level: 0,
      steepness: 0,
      continuity: 10,
      max_height: 2,
      chunk_size: 8,
    };
    let terrain = TerrainGenerator::generate(&settings.world);
    let bounds = MapBounds::from_settings(&settings.world);
    let collision = CollisionService::new(&terrain, bounds);
    let catalog = BuildingCatalog::new();
    let mut within_range = 0u32;
    let trials = 100u32;
    for seed in 0..trials {
      let mut generator = CityGenerator::new(&collision, &catalog);
      let city = generator
        .generate(Point::new_tile_grid(0, 0), CitySize::Small, &HashSet::new(), seed)
        .expect("Failed to generate city");
      assert!((75..=450).contains(&city.total_population));
      if (150..=300).contains(&city.total_population) {
        within_range += 1;
      }
    }
    assert!(within_range >= trials * 8 / 10, "Only {} of {} trials in range", within_range, trials);
  }
}
