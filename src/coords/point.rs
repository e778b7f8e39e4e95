use crate::generation::lib::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Add;

pub trait CoordType {}

/// Marker for world-wide tile coordinates i.e. the grid a renderer receives.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct TileGrid;

impl CoordType for TileGrid {}

/// Marker for chunk coordinates i.e. the grid in which one step is one chunk.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ChunkGrid;

impl CoordType for ChunkGrid {}

/// Marker for coordinates within a single chunk, ranging from `0` to `chunk_size - 1`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct InternalGrid;

impl CoordType for InternalGrid {}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Point<T: CoordType> {
  pub x: i32,
  pub z: i32,
  #[serde(skip)]
  _marker: PhantomData<T>,
}

impl<T: CoordType> fmt::Debug for Point<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.z)
  }
}

impl<T: CoordType> fmt::Display for Point<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.z)
  }
}

impl<T: CoordType> Default for Point<T> {
  fn default() -> Self {
    Self::new(0, 0)
  }
}

impl<T: CoordType> Add for Point<T> {
  type Output = Self;

  fn add(self, other: Self) -> Self {
    Self::new(self.x + other.x, self.z + other.z)
  }
}

impl<T: CoordType> Point<T> {
  pub const fn new(x: i32, z: i32) -> Self {
    Self {
      x,
      z,
      _marker: PhantomData,
    }
  }

  pub fn from_direction(direction: Direction) -> Self {
    let (x, z) = direction.offset();
    Self::new(x, z)
  }

  pub fn distance_to(&self, other: &Point<T>) -> f32 {
    (((self.x - other.x).pow(2) + (self.z - other.z).pow(2)) as f32).sqrt()
  }
}

impl Point<TileGrid> {
  pub fn new_tile_grid(x: i32, z: i32) -> Self {
    Self::new(x, z)
  }

  /// Returns the coordinates of the chunk this tile falls into.
  pub fn to_chunk_grid(self, chunk_size: i32) -> Point<ChunkGrid> {
    Point::new(self.x.div_euclid(chunk_size), self.z.div_euclid(chunk_size))
  }

  /// Returns the coordinates of this tile within its chunk.
  pub fn to_internal_grid(self, chunk_size: i32) -> Point<InternalGrid> {
    Point::new(self.x.rem_euclid(chunk_size), self.z.rem_euclid(chunk_size))
  }
}

impl Point<ChunkGrid> {
  pub fn new_chunk_grid(x: i32, z: i32) -> Self {
    Self::new(x, z)
  }

  /// Returns the tile grid coordinates of a cell in this chunk.
  pub fn to_tile_grid(self, ig: Point<InternalGrid>, chunk_size: i32) -> Point<TileGrid> {
    Point::new(self.x * chunk_size + ig.x, self.z * chunk_size + ig.z)
  }
}

impl Point<InternalGrid> {
  pub fn new_internal_grid(x: i32, z: i32) -> Self {
    Self::new(x, z)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn to_chunk_grid_uses_euclidean_division_for_negative_coordinates() {
    assert_eq!(Point::new_tile_grid(0, 0).to_chunk_grid(8), Point::new_chunk_grid(0, 0));
    assert_eq!(Point::new_tile_grid(7, 7).to_chunk_grid(8), Point::new_chunk_grid(0, 0));
    assert_eq!(Point::new_tile_grid(8, 8).to_chunk_grid(8), Point::new_chunk_grid(1, 1));
    assert_eq!(Point::new_tile_grid(-1, -8).to_chunk_grid(8), Point::new_chunk_grid(-1, -1));
    assert_eq!(Point::new_tile_grid(-9, -17).to_chunk_grid(8), Point::new_chunk_grid(-2, -3));
  }

  #[test]
  fn to_internal_grid_is_always_within_chunk_bounds() {
    assert_eq!(Point::new_tile_grid(3, 5).to_internal_grid(8), Point::new_internal_grid(3, 5));
    assert_eq!(Point::new_tile_grid(-1, -8).to_internal_grid(8), Point::new_internal_grid(7, 0));
    assert_eq!(Point::new_tile_grid(15, -9).to_internal_grid(8), Point::new_internal_grid(7, 7));
  }

  #[test]
  fn to_tile_grid_round_trips_with_chunk_and_internal_grid() {
    let tg = Point::new_tile_grid(-13, 22);
    let cg = tg.to_chunk_grid(8);
    let ig = tg.to_internal_grid(8);
    assert_eq!(cg.to_tile_grid(ig, 8), tg);
  }

  #[test]
  fn distance_to_returns_euclidean_distance() {
    let a = Point::new_tile_grid(0, 0);
    let b = Point::new_tile_grid(3, 4);
    assert_eq!(a.distance_to(&b), 5.);
  }
}
