use crate::coords::point::{ChunkGrid, InternalGrid, TileGrid};
use crate::coords::Point;
use crate::generation::lib::TileType;
use serde::Serialize;

/// The emitted record of a single collapsed tile. Carries plain coordinate indices instead of
/// references back into the owning chunk so the world stays cheaply cloneable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Tile {
  pub tg: Point<TileGrid>,
  pub ig: Point<InternalGrid>,
  pub cg: Point<ChunkGrid>,
  pub height: i32,
  pub tile_type: TileType,
}
