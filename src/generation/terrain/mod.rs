mod terrain_generator;
mod terrain_world;

pub use terrain_generator::TerrainGenerator;
pub use terrain_world::TerrainWorld;
