use crate::coords::point::{CoordType, Point};

/// A cardinal direction on the tile grid. `North` is negative `z`, `South` positive `z`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
  North,
  East,
  South,
  West,
}

impl Direction {
  pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

  pub fn offset(&self) -> (i32, i32) {
    match self {
      Direction::North => (0, -1),
      Direction::East => (1, 0),
      Direction::South => (0, 1),
      Direction::West => (-1, 0),
    }
  }

  pub fn opposite(&self) -> Self {
    match self {
      Direction::North => Direction::South,
      Direction::East => Direction::West,
      Direction::South => Direction::North,
      Direction::West => Direction::East,
    }
  }

  /// Returns the two directions perpendicular to this one.
  pub fn perpendicular(&self) -> [Direction; 2] {
    match self {
      Direction::North | Direction::South => [Direction::East, Direction::West],
      Direction::East | Direction::West => [Direction::North, Direction::South],
    }
  }

  /// The canonical connection bit of this direction: `N=1`, `E=2`, `S=4`, `W=8`.
  pub fn bit(&self) -> u8 {
    match self {
      Direction::North => 1,
      Direction::East => 2,
      Direction::South => 4,
      Direction::West => 8,
    }
  }
}

/// Returns the four orthogonal neighbours of a point in the fixed `E, W, S, N` order that all
/// adjacency queries iterate in.
pub fn get_adjacent_points<T: CoordType>(point: &Point<T>) -> [(Direction, Point<T>); 4] {
  let p = point;
  [
    (Direction::East, Point::new(p.x + 1, p.z)),
    (Direction::West, Point::new(p.x - 1, p.z)),
    (Direction::South, Point::new(p.x, p.z + 1)),
    (Direction::North, Point::new(p.x, p.z - 1)),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coords::Point;

  #[test]
  fn opposite_inverts_every_direction() {
    for direction in Direction::ALL {
      assert_ne!(direction, direction.opposite());
      assert_eq!(direction, direction.opposite().opposite());
    }
  }

  #[test]
  fn perpendicular_never_contains_self_or_opposite() {
    for direction in Direction::ALL {
      let perpendicular = direction.perpendicular();
      assert!(!perpendicular.contains(&direction));
      assert!(!perpendicular.contains(&direction.opposite()));
    }
  }

  #[test]
  fn bits_are_unique_and_canonical() {
    assert_eq!(Direction::North.bit(), 1);
    assert_eq!(Direction::East.bit(), 2);
    assert_eq!(Direction::South.bit(), 4);
    assert_eq!(Direction::West.bit(), 8);
  }

  #[test]
  fn offsets_cancel_out_with_opposites() {
    for direction in Direction::ALL {
      let (x, z) = direction.offset();
      let (ox, oz) = direction.opposite().offset();
      assert_eq!((x + ox, z + oz), (0, 0));
    }
  }

  #[test]
  fn get_adjacent_points_returns_east_west_south_north_order() {
    let point = Point::new_tile_grid(2, 3);
    let points = get_adjacent_points(&point);
    assert_eq!(points[0], (Direction::East, Point::new(3, 3)));
    assert_eq!(points[1], (Direction::West, Point::new(1, 3)));
    assert_eq!(points[2], (Direction::South, Point::new(2, 4)));
    assert_eq!(points[3], (Direction::North, Point::new(2, 2)));
  }
}
