pub mod environment;
mod world_generator;

pub use environment::{Forest, Tree, TreeType};
pub use world_generator::{World, WorldGenerator, WorldSummary};
