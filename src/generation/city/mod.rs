pub mod buildings;
pub mod catalog;
pub mod names;
pub mod roads;

pub use buildings::{Building, BuildingPlacement, BuildingPlacer};
pub use catalog::{BuildingCatalog, BuildingType, CitySize};
pub use names::CityNameRegistry;
pub use roads::{Connections, RoadKind, RoadNetwork, RoadNetworkBuilder, RoadTile};

use crate::coords::point::TileGrid;
use crate::coords::Point;
use crate::errors::GenerationError;
use crate::generation::collision::CollisionService;
use crate::generation::lib::shared;
use crate::rng::SeededRandom;
use log::*;
use serde::Serialize;
use std::collections::HashSet;
use xxhash_rust::xxh32::xxh32;

/// One fully generated city. `total_population` always equals the sum of the placed buildings'
/// populations; `target_population` records what the placer aimed for so shortfalls are
/// observable in data and not only in logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCity {
  pub id: String,
  pub name: String,
  pub center: Point<TileGrid>,
  pub size: CitySize,
  pub target_population: i32,
  pub road_network: RoadNetwork,
  pub buildings: Vec<Building>,
  pub total_population: i32,
}

/// Orchestrates the generation of a single city: derives a per-city PRNG, grows the road
/// network, fills it with buildings, and allocates a unique name. Failures inside the pipeline
/// degrade to a fallback city so the world's city list always has a predictable length; only an
/// out-of-bounds centre is a hard error.
pub struct CityGenerator<'a> {
  collision: &'a CollisionService<'a>,
  catalog: &'a BuildingCatalog,
  names: CityNameRegistry,
}

impl<'a> CityGenerator<'a> {
  pub fn new(collision: &'a CollisionService<'a>, catalog: &'a BuildingCatalog) -> Self {
    Self {
      collision,
      catalog,
      names: CityNameRegistry::new(),
    }
  }

  /// The name registry backing this generator, e.g. to release the name of a deleted city or to
  /// reserve names assigned outside the pipeline.
  pub fn names_mut(&mut self) -> &mut CityNameRegistry {
    &mut self.names
  }

  pub fn generate(
    &mut self,
    center: Point<TileGrid>,
    size: CitySize,
    existing_names: &HashSet<String>,
    master_seed: u32,
  ) -> Result<GeneratedCity, GenerationError> {
    if !self.collision.bounds().contains(&center) {
      return Err(GenerationError::CityCentreOutOfBounds(center.x, center.z));
    }
    // Seeded from the master seed and the centre so every city is independently reproducible
    let mut rng = SeededRandom::new(shared::derive_seed(master_seed, center.x, center.z));
    match self.try_generate(center, size, existing_names, &mut rng) {
      Ok(city) => Ok(city),
      Err(e) => {
        warn!("Failed to generate city at {}: {}; emitting fallback city", center, e);
        Ok(self.fallback_city(center, size, existing_names, &mut rng))
      }
    }
  }

  fn try_generate(
    &mut self,
    center: Point<TileGrid>,
    size: CitySize,
    existing_names: &HashSet<String>,
    rng: &mut SeededRandom,
  ) -> Result<GeneratedCity, GenerationError> {
    let start_time = shared::get_time();
    let target_population = self.catalog.generate_target_population(size, rng);
    let road_network = RoadNetworkBuilder::new(self.collision).build(center, size, rng);
    if road_network.is_empty() {
      warn!("Road network for city at {} is empty", center);
    }
    let placement = BuildingPlacer::new(self.collision, self.catalog).place(&road_network, target_population, rng)?;
    if placement.total_population * 2 < target_population {
      warn!(
        "City at {} reached only {} of its target population of {}",
        center, placement.total_population, target_population
      );
    }
    let name = self.names.generate_unique_name(existing_names, rng);
    let id = build_city_id(&name, &center, rng);
    info!(
      "Generated city [{}] at {} with {} road tile(s) and {} inhabitant(s) in {} ms",
      name,
      center,
      road_network.len(),
      placement.total_population,
      shared::get_time() - start_time
    );

    Ok(GeneratedCity {
      id,
      name,
      center,
      size,
      target_population,
      road_network,
      buildings: placement.buildings,
      total_population: placement.total_population,
    })
  }

  /// The visible contract for "generation failed but the world is still well-formed": an empty
  /// road and building set with a fresh unique name and the coordinates preserved.
  fn fallback_city(
    &mut self,
    center: Point<TileGrid>,
    size: CitySize,
    existing_names: &HashSet<String>,
    rng: &mut SeededRandom,
  ) -> GeneratedCity {
    let name = self.names.generate_unique_name(existing_names, rng);
    let id = build_city_id(&name, &center, rng);
    GeneratedCity {
      id,
      name,
      center,
      size,
      target_population: 0,
      road_network: RoadNetwork::new(),
      buildings: Vec::new(),
      total_population: 0,
    }
  }
}

fn build_city_id(name: &str, center: &Point<TileGrid>, rng: &mut SeededRandom) -> String {
  let mut position_bytes = [0u8; 8];
  position_bytes[..4].copy_from_slice(&center.x.to_le_bytes());
  position_bytes[4..].copy_from_slice(&center.z.to_le_bytes());
  format!(
    "city_{:06x}_{:06x}_{}",
    xxh32(name.as_bytes(), 0) & 0xff_ffff,
    xxh32(&position_bytes, 0) & 0xff_ffff,
    rng.next_int(1000, 9999)
  )
}
