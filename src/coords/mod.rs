pub mod point;

pub use point::{ChunkGrid, InternalGrid, Point, TileGrid};
