use crate::constants::NAME_SUFFIX_LIMIT;
use crate::rng::SeededRandom;
use log::*;
use std::collections::HashSet;

const BASE_NAMES: &[&str] = &[
  "Aldermoor",
  "Ashford",
  "Ashton",
  "Barrowdale",
  "Beechworth",
  "Bellbrook",
  "Blackmere",
  "Bramblewood",
  "Briarcliff",
  "Brookhaven",
  "Caldermill",
  "Cedarholm",
  "Clearwater",
  "Cobbleton",
  "Coldspring",
  "Cranford",
  "Crestwood",
  "Daleford",
  "Darrowmere",
  "Deerfield",
  "Dunmore",
  "Eastgate",
  "Ebonvale",
  "Elderglen",
  "Elmsworth",
  "Fairhaven",
  "Fallowfield",
  "Fernbrook",
  "Foxglove",
  "Frostholm",
  "Gildenford",
  "Glenhollow",
  "Goldcrest",
  "Granthorpe",
  "Greenbriar",
  "Greystone",
  "Hartfield",
  "Hawthorne",
  "Hazelmere",
  "Heathercombe",
  "Highmoor",
  "Hollowbrook",
  "Honeywell",
  "Huntersfield",
  "Ironbridge",
  "Ivydale",
  "Kestrelpoint",
  "Kingsmere",
  "Lakeshire",
  "Larkspur",
  "Lindenholm",
  "Longmeadow",
  "Lynnwood",
  "Maplecross",
  "Marshfield",
  "Meadowbrook",
  "Merriford",
  "Millbrook",
  "Mistvale",
  "Mossglen",
  "Netherfield",
  "Newbury",
  "Northam",
  "Oakendale",
  "Oldbridge",
  "Orchardhill",
  "Otterburn",
  "Pebbleton",
  "Pinecrest",
  "Quarryside",
  "Ravenscroft",
  "Redwillow",
  "Ridgemont",
  "Riverbend",
  "Rookfield",
  "Rosedale",
  "Rowanleigh",
  "Saltmarsh",
  "Sandhurst",
  "Shadowfen",
  "Silverbrook",
  "Snowdon",
  "Southmere",
  "Springwell",
  "Stagmoor",
  "Stonebridge",
  "Stonefield",
  "Summerfield",
  "Sunhollow",
  "Swiftwater",
  "Tanglewood",
  "Thornbury",
  "Thistledown",
  "Timberline",
  "Torwick",
  "Umberleigh",
  "Valebrook",
  "Violetholm",
  "Wakefield",
  "Wellspring",
  "Westbrook",
  "Whitmore",
  "Willowmere",
  "Windemere",
  "Winterbourne",
  "Wolfpine",
  "Woodhaven",
  "Wrenfield",
  "Yarrowdale",
];

/// The single source of truth for city name uniqueness. Hands out names from a static pool and
/// falls back to numbered variants (`"<Base> N"`, `N ≥ 1`) once the pool is exhausted. Callers
/// pass in the world's existing names so the registry can union them with its own bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct CityNameRegistry {
  used: HashSet<String>,
}

impl CityNameRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Allocates a name that is neither in `existing` nor has been handed out before.
  pub fn generate_unique_name(&mut self, existing: &HashSet<String>, rng: &mut SeededRandom) -> String {
    let candidates: Vec<&str> = BASE_NAMES
      .iter()
      .filter(|name| !self.used.contains(**name) && !existing.contains(**name))
      .copied()
      .collect();
    if let Some(name) = rng.choose(&candidates) {
      let name = name.to_string();
      self.used.insert(name.clone());
      return name;
    }

    // Pool exhausted, so append a counter to a random base name
    let base = *rng.choose(BASE_NAMES).expect("Failed to choose from base name pool");
    for n in 1..=NAME_SUFFIX_LIMIT {
      let candidate = format!("{} {}", base, n);
      if !self.used.contains(&candidate) && !existing.contains(&candidate) {
        self.used.insert(candidate.clone());
        return candidate;
      }
    }
    let candidate = format!("{} {}", base, NAME_SUFFIX_LIMIT);
    warn!("Name suffix limit reached for base name [{}]; reusing {}", base, candidate);
    self.used.insert(candidate.clone());

    candidate
  }

  /// Removes a name from the registry so it can be handed out again, e.g. after a city has been
  /// deleted by the host.
  pub fn release_name_for_reuse(&mut self, name: &str) {
    self.used.remove(name);
  }

  /// Records an externally assigned name so the registry never hands it out.
  pub fn mark_name_as_used(&mut self, name: &str) {
    self.used.insert(name.to_string());
  }
}
