// Chunks
pub const CHUNK_SIZE: i32 = 8;
pub const MAX_HEIGHT: i32 = 20;

// Terrain
pub const DEFAULT_SEED: u32 = 1;
pub const DEFAULT_RENDER_DISTANCE: u32 = 4;
pub const DEFAULT_WATER_LEVEL: i32 = 3;
pub const DEFAULT_STEEPNESS: i32 = 2;
pub const DEFAULT_CONTINUITY: i32 = 5;

// Cities
pub const DEFAULT_TARGET_CITY_COUNT: usize = 3;
pub const DEFAULT_MIN_AREA_SIZE: usize = 60;
pub const SITE_ATTEMPTS_PER_CITY: usize = 100;
pub const LARGE_CITY_MIN_AREA: usize = 400;
pub const MEDIUM_CITY_MIN_AREA: usize = 150;
pub const NAME_SUFFIX_LIMIT: u32 = 1000;

// Objects
pub const MIN_FOREST_SIZE: usize = 6;
pub const TREE_PROBABILITY: f64 = 1. / 3.;
pub const FOREST_DENSITY_MIN: f64 = 0.4;
pub const FOREST_DENSITY_MAX: f64 = 0.8;
