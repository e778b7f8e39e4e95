use crate::errors::GenerationError;
use crate::rng::SeededRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// An immutable catalogue entry describing one kind of building. The footprint is `width` tiles
/// along `x` and `depth` tiles along `z`, anchored at the building's origin tile.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct BuildingType {
  pub id: &'static str,
  pub name: &'static str,
  pub population: i32,
  pub width: i32,
  pub depth: i32,
}

const BUILDING_TYPES: &[BuildingType] = &[
  BuildingType {
    id: "small_house",
    name: "Small house",
    population: 8,
    width: 1,
    depth: 1,
  },
  BuildingType {
    id: "medium_house",
    name: "Medium house",
    population: 16,
    width: 1,
    depth: 1,
  },
  BuildingType {
    id: "townhouse",
    name: "Townhouse",
    population: 20,
    width: 1,
    depth: 2,
  },
  BuildingType {
    id: "apartment_block",
    name: "Apartment block",
    population: 30,
    width: 2,
    depth: 2,
  },
  BuildingType {
    id: "large_apartment_block",
    name: "Large apartment block",
    population: 45,
    width: 2,
    depth: 3,
  },
];

/// The population tier of a city.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum CitySize {
  Small,
  Medium,
  Large,
}

impl CitySize {
  /// The inclusive target population range of this tier.
  pub fn population_range(&self) -> (i32, i32) {
    match self {
      CitySize::Small => (150, 300),
      CitySize::Medium => (300, 500),
      CitySize::Large => (500, 800),
    }
  }
}

/// The static set of building types the placer can draw from.
#[derive(Debug, Clone)]
pub struct BuildingCatalog {
  types: Vec<BuildingType>,
}

impl BuildingCatalog {
  pub fn new() -> Self {
    Self::from_types(BUILDING_TYPES.to_vec())
  }

  /// A catalogue with a custom set of types, e.g. for hosts that mod the building roster.
  pub fn from_types(types: Vec<BuildingType>) -> Self {
    Self { types }
  }

  pub fn get_all(&self) -> &[BuildingType] {
    &self.types
  }

  pub fn select_random(&self, rng: &mut SeededRandom) -> Option<&BuildingType> {
    rng.choose(&self.types)
  }

  pub fn filter_by_population(&self, lo: i32, hi: i32) -> Vec<&BuildingType> {
    self
      .types
      .iter()
      .filter(|t| t.population >= lo && t.population <= hi)
      .collect()
  }

  /// Picks a random building type whose population lies in `[lo, hi]`.
  /// # Errors
  /// If no building type falls into the range.
  pub fn select_random_by_population(&self, rng: &mut SeededRandom, lo: i32, hi: i32) -> Result<&BuildingType, GenerationError> {
    let filtered = self.filter_by_population(lo, hi);
    if filtered.is_empty() {
      return Err(GenerationError::EmptyCatalogueSelection(lo, hi));
    }
    let index = rng.next_int(0, filtered.len() as i32) as usize;
    Ok(filtered[index])
  }

  /// Draws a target population for a city of the given tier, uniformly from the tier's range.
  pub fn generate_target_population(&self, size: CitySize, rng: &mut SeededRandom) -> i32 {
    let (lo, hi) = size.population_range();
    rng.next_int_inclusive(lo, hi)
  }
}
