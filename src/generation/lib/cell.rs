use crate::coords::point::InternalGrid;
use crate::coords::Point;
use crate::generation::lib::TileType;
use serde::{Deserialize, Serialize};

/// A single cell of a chunk during and after wave function collapse. Before collapsing, the cell
/// holds every height it may still become; observing a neighbour narrows that set. Once all
/// constraints are applied the cell is collapsed to a definite height and classified.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
  pub ig: Point<InternalGrid>,
  possible_heights: Vec<i32>,
  is_collapsed: bool,
  height: i32,
  tile_type: TileType,
}

impl Cell {
  /// Creates a new cell at the given internal grid coordinates which may still collapse to any
  /// height in `[0, max_height]`.
  pub fn new(x: i32, z: i32, max_height: i32) -> Self {
    Cell {
      ig: Point::new_internal_grid(x, z),
      possible_heights: (0..=max_height).collect(),
      is_collapsed: false,
      height: 0,
      tile_type: TileType::Water,
    }
  }

  pub fn is_collapsed(&self) -> bool {
    self.is_collapsed
  }

  /// The number of heights this cell can still collapse to.
  pub fn entropy(&self) -> usize {
    self.possible_heights.len()
  }

  pub fn possible_heights(&self) -> &[i32] {
    &self.possible_heights
  }

  /// The definite height of this cell. Only meaningful once the cell has been collapsed.
  pub fn height(&self) -> i32 {
    self.height
  }

  pub fn tile_type(&self) -> TileType {
    self.tile_type
  }

  /// Removes every height that is more than `steepness` away from the given neighbour height.
  /// Returns `true` if the set of possible heights shrank. May leave the cell without any
  /// possible heights, which the caller recovers from when the cell is observed.
  pub fn constrain_to_neighbour(&mut self, neighbour_height: i32, steepness: i32) -> bool {
    let before = self.possible_heights.len();
    self
      .possible_heights
      .retain(|h| (h - neighbour_height).abs() <= steepness);
    self.possible_heights.len() != before
  }

  /// Collapses this cell to a definite height and classifies it against the water level.
  pub fn collapse_to(&mut self, height: i32, water_level: i32) {
    self.height = height;
    self.tile_type = TileType::from_height(height, water_level);
    self.is_collapsed = true;
    self.possible_heights = vec![height];
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_starts_with_full_height_range() {
    let cell = Cell::new(0, 0, 20);
    assert!(!cell.is_collapsed());
    assert_eq!(cell.entropy(), 21);
    assert_eq!(cell.possible_heights().first(), Some(&0));
    assert_eq!(cell.possible_heights().last(), Some(&20));
  }

  #[test]
  fn constrain_to_neighbour_narrows_the_height_range() {
    let mut cell = Cell::new(0, 0, 20);
    assert!(cell.constrain_to_neighbour(5, 2));
    assert_eq!(cell.possible_heights(), &[3, 4, 5, 6, 7]);
    assert!(!cell.constrain_to_neighbour(5, 2));
  }

  #[test]
  fn constrain_to_neighbour_can_empty_the_cell() {
    let mut cell = Cell::new(0, 0, 20);
    cell.constrain_to_neighbour(0, 1);
    cell.constrain_to_neighbour(20, 1);
    assert_eq!(cell.entropy(), 0);
  }

  #[test]
  fn collapse_to_fixes_height_and_classifies_the_tile() {
    let mut cell = Cell::new(3, 4, 20);
    cell.collapse_to(2, 3);
    assert!(cell.is_collapsed());
    assert_eq!(cell.height(), 2);
    assert_eq!(cell.tile_type(), TileType::Water);
    assert_eq!(cell.possible_heights(), &[2]);

    let mut cell = Cell::new(3, 4, 20);
    cell.collapse_to(5, 3);
    assert_eq!(cell.tile_type(), TileType::Grass);
  }
}
