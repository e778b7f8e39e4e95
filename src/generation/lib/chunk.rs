use crate::coords::point::{ChunkGrid, InternalGrid};
use crate::coords::Point;
use crate::generation::lib::{Cell, Tile};
use log::*;
use serde::{Deserialize, Serialize};

/// A square block of cells that is collapsed as one atomic WFC unit. A chunk is created with
/// every cell uncollapsed, collapsed exactly once, and never mutated afterwards. Cells are stored
/// row-major with `z` as the outer index, which is also the order they are emitted in.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
  pub cg: Point<ChunkGrid>,
  grid: Vec<Vec<Cell>>,
  size: i32,
  /// Whether seam constraints from already-collapsed neighbour chunks have been applied.
  pub neighbours_resolved: bool,
}

impl Chunk {
  pub fn new(cg: Point<ChunkGrid>, size: i32, max_height: i32) -> Self {
    let grid = (0..size)
      .map(|z| (0..size).map(|x| Cell::new(x, z, max_height)).collect())
      .collect();
    Chunk {
      cg,
      grid,
      size,
      neighbours_resolved: false,
    }
  }

  pub fn size(&self) -> i32 {
    self.size
  }

  pub fn get_cell(&self, ig: &Point<InternalGrid>) -> Option<&Cell> {
    self.grid.get(ig.z as usize)?.get(ig.x as usize)
  }

  pub fn get_cell_mut(&mut self, ig: &Point<InternalGrid>) -> Option<&mut Cell> {
    self.grid.get_mut(ig.z as usize)?.get_mut(ig.x as usize)
  }

  /// Returns the height of the cell at `ig` if it has been collapsed.
  pub fn collapsed_height_at(&self, ig: &Point<InternalGrid>) -> Option<i32> {
    self.get_cell(ig).filter(|c| c.is_collapsed()).map(|c| c.height())
  }

  /// Iterates all cells row-major, `z` outer.
  pub fn cells(&self) -> impl Iterator<Item = &Cell> {
    self.grid.iter().flatten()
  }

  pub fn is_fully_collapsed(&self) -> bool {
    self.cells().all(|c| c.is_collapsed())
  }

  /// Collapses any cell that survived the observation loop uncollapsed to height `0`. Returns
  /// the number of cells that had to be defaulted.
  pub fn finalise(&mut self, water_level: i32) -> usize {
    let mut defaulted = 0;
    for row in self.grid.iter_mut() {
      for cell in row.iter_mut() {
        if !cell.is_collapsed() {
          cell.collapse_to(0, water_level);
          defaulted += 1;
        }
      }
    }
    if defaulted > 0 {
      warn!("Defaulted {} uncollapsed cell(s) in chunk {} to height 0", defaulted, self.cg);
    }
    defaulted
  }

  /// Returns the emitted record of the cell at `ig`. Only meaningful once the chunk is collapsed.
  pub fn tile(&self, ig: &Point<InternalGrid>) -> Option<Tile> {
    let cell = self.get_cell(ig)?;
    Some(Tile {
      tg: self.cg.to_tile_grid(*ig, self.size),
      ig: *ig,
      cg: self.cg,
      height: cell.height(),
      tile_type: cell.tile_type(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_creates_a_square_grid_of_uncollapsed_cells() {
    let chunk = Chunk::new(Point::new_chunk_grid(0, 0), 8, 20);
    assert_eq!(chunk.cells().count(), 64);
    assert!(chunk.cells().all(|c| !c.is_collapsed()));
  }

  #[test]
  fn cells_iterate_row_major_with_z_outer() {
    let chunk = Chunk::new(Point::new_chunk_grid(0, 0), 2, 5);
    let order: Vec<_> = chunk.cells().map(|c| (c.ig.x, c.ig.z)).collect();
    assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
  }

  #[test]
  fn finalise_defaults_uncollapsed_cells_to_height_0() {
    let mut chunk = Chunk::new(Point::new_chunk_grid(1, -1), 4, 10);
    let ig = Point::new_internal_grid(2, 2);
    chunk.get_cell_mut(&ig).expect("Failed to get cell").collapse_to(5, 2);
    let defaulted = chunk.finalise(2);
    assert_eq!(defaulted, 15);
    assert!(chunk.is_fully_collapsed());
    assert_eq!(chunk.collapsed_height_at(&ig), Some(5));
    assert_eq!(chunk.collapsed_height_at(&Point::new_internal_grid(0, 0)), Some(0));
  }

  #[test]
  fn tile_carries_chunk_and_world_coordinates() {
    let mut chunk = Chunk::new(Point::new_chunk_grid(-1, 2), 8, 10);
    let ig = Point::new_internal_grid(3, 4);
    chunk.get_cell_mut(&ig).expect("Failed to get cell").collapse_to(4, 2);
    let tile = chunk.tile(&ig).expect("Failed to get tile");
    assert_eq!(tile.tg, Point::new_tile_grid(-5, 20));
    assert_eq!(tile.cg, Point::new_chunk_grid(-1, 2));
    assert_eq!(tile.height, 4);
  }
}
