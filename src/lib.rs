//! Deterministic procedural generation of a 2.5D world: a wave-function-collapse heightmap in
//! chunks, cities with grown road networks and placed buildings, and scattered forests and
//! trees. The crate is a data-producing core; rendering, game loop, and persistence live in the
//! host. Identical settings always produce structurally identical worlds.

pub mod constants;
pub mod coords;
pub mod errors;
pub mod generation;
pub mod rng;
pub mod settings;

pub use crate::errors::GenerationError;
pub use crate::generation::world::{World, WorldGenerator, WorldSummary};
pub use crate::rng::SeededRandom;
pub use crate::settings::Settings;
