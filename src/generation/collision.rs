use crate::coords::point::TileGrid;
use crate::coords::Point;
use crate::generation::city::roads::RoadNetwork;
use crate::generation::lib::{get_adjacent_points, MapBounds};
use crate::generation::terrain::TerrainWorld;
use serde::Serialize;
use std::collections::HashSet;
use strum::Display;

/// What a placement query collided with, if anything.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Display, Serialize)]
pub enum CollisionKind {
  #[default]
  None,
  Road,
  Building,
  Terrain,
  Water,
  Bounds,
  Impassable,
}

/// The result envelope of every collision query. Collisions are plain data, never errors; a
/// caller that cannot place something simply moves on.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct CollisionCheck {
  pub has_collision: bool,
  pub collision_type: CollisionKind,
  pub message: Option<String>,
}

impl CollisionCheck {
  pub fn ok() -> Self {
    Self::default()
  }

  pub fn collision(collision_type: CollisionKind, message: impl Into<String>) -> Self {
    Self {
      has_collision: true,
      collision_type,
      message: Some(message.into()),
    }
  }
}

/// Stateless placement and passability queries against the terrain and the configured map
/// bounds. The mutable placement state (roads placed so far, building-occupied tiles) is always
/// passed in by the caller.
pub struct CollisionService<'a> {
  terrain: &'a TerrainWorld,
  bounds: MapBounds,
}

impl<'a> CollisionService<'a> {
  pub fn new(terrain: &'a TerrainWorld, bounds: MapBounds) -> Self {
    Self { terrain, bounds }
  }

  pub fn bounds(&self) -> &MapBounds {
    &self.bounds
  }

  pub fn can_place_road(&self, tg: &Point<TileGrid>, roads: &RoadNetwork) -> CollisionCheck {
    if !self.bounds.contains(tg) {
      return CollisionCheck::collision(CollisionKind::Bounds, format!("Tile {} is outside the map bounds", tg));
    }
    if self.terrain.is_water_at(tg) {
      return CollisionCheck::collision(CollisionKind::Water, format!("Tile {} is water", tg));
    }
    if roads.contains(tg) {
      return CollisionCheck::collision(CollisionKind::Road, format!("Tile {} is already occupied by a road", tg));
    }
    CollisionCheck::ok()
  }

  pub fn can_place_building(
    &self,
    tg: &Point<TileGrid>,
    roads: &RoadNetwork,
    buildings: &HashSet<Point<TileGrid>>,
  ) -> CollisionCheck {
    if !self.bounds.contains(tg) {
      return CollisionCheck::collision(CollisionKind::Bounds, format!("Tile {} is outside the map bounds", tg));
    }
    if self.terrain.is_water_at(tg) {
      return CollisionCheck::collision(CollisionKind::Water, format!("Tile {} is water", tg));
    }
    if roads.contains(tg) {
      return CollisionCheck::collision(CollisionKind::Road, format!("Tile {} is already occupied by a road", tg));
    }
    if buildings.contains(tg) {
      return CollisionCheck::collision(
        CollisionKind::Building,
        format!("Tile {} is already occupied by a building", tg),
      );
    }
    CollisionCheck::ok()
  }

  /// Validates that a `width × depth` footprint anchored at `tg` sits on ground that is flat
  /// enough: no corner may be water and the corner heights may differ by at most one.
  pub fn validate_building_terrain(&self, tg: &Point<TileGrid>, width: i32, depth: i32) -> CollisionCheck {
    let corners = [
      *tg,
      Point::new_tile_grid(tg.x + width - 1, tg.z),
      Point::new_tile_grid(tg.x, tg.z + depth - 1),
      Point::new_tile_grid(tg.x + width - 1, tg.z + depth - 1),
    ];
    let mut min_height = i32::MAX;
    let mut max_height = i32::MIN;
    for corner in &corners {
      if self.terrain.is_water_at(corner) {
        return CollisionCheck::collision(CollisionKind::Water, format!("Footprint corner {} is water", corner));
      }
      let height = self.terrain.height_at(corner);
      min_height = min_height.min(height);
      max_height = max_height.max(height);
    }
    if max_height - min_height > 1 {
      return CollisionCheck::collision(
        CollisionKind::Terrain,
        format!("Footprint at {} spans heights {} to {}", tg, min_height, max_height),
      );
    }
    CollisionCheck::ok()
  }

  /// Whether the slope between two tiles can be walked or built over.
  pub fn is_passable(&self, a: &Point<TileGrid>, b: &Point<TileGrid>) -> bool {
    (self.terrain.height_at(a) - self.terrain.height_at(b)).abs() <= 1
  }

  /// Whether `to` is dry land reachable from `from` without a forbidden slope.
  pub fn is_buildable_land(&self, from: &Point<TileGrid>, to: &Point<TileGrid>) -> bool {
    !self.terrain.is_water_at(to) && self.is_passable(from, to)
  }

  /// Walks the integer tiles along a straight or diagonal segment (max-delta interpolation) and
  /// returns the first collision against terrain or already-placed roads.
  pub fn check_road_overlap(&self, start: &Point<TileGrid>, end: &Point<TileGrid>, roads: &RoadNetwork) -> CollisionCheck {
    let dx = end.x - start.x;
    let dz = end.z - start.z;
    let steps = dx.abs().max(dz.abs());
    for i in 0..=steps {
      let t = if steps == 0 { 0. } else { i as f64 / steps as f64 };
      let tile = Point::new_tile_grid(
        start.x + (dx as f64 * t).round() as i32,
        start.z + (dz as f64 * t).round() as i32,
      );
      if self.terrain.is_water_at(&tile) {
        return CollisionCheck::collision(CollisionKind::Water, format!("Segment tile {} is water", tile));
      }
      if roads.contains(&tile) {
        return CollisionCheck::collision(CollisionKind::Road, format!("Segment tile {} is already a road", tile));
      }
    }
    CollisionCheck::ok()
  }

  /// Bounds check on both endpoints plus [`CollisionService::check_road_overlap`].
  pub fn validate_road_segment(&self, start: &Point<TileGrid>, end: &Point<TileGrid>, roads: &RoadNetwork) -> CollisionCheck {
    for endpoint in [start, end] {
      if !self.bounds.contains(endpoint) {
        return CollisionCheck::collision(
          CollisionKind::Bounds,
          format!("Segment endpoint {} is outside the map bounds", endpoint),
        );
      }
    }
    self.check_road_overlap(start, end, roads)
  }

  /// Whether placing something at `tg` would sit in the runway of a dead end: true iff some
  /// dead end of the network is orthogonally aligned with `tg` at Euclidean distance ≤ 2.
  pub fn would_block_road_extension(&self, tg: &Point<TileGrid>, roads: &RoadNetwork) -> bool {
    roads.dead_ends.iter().any(|dead_end| {
      let dx = (tg.x - dead_end.x).abs();
      let dz = (tg.z - dead_end.z).abs();
      (dz == 0 && (1..=2).contains(&dx)) || (dx == 0 && (1..=2).contains(&dz))
    })
  }

  pub fn is_adjacent_to_road(&self, tg: &Point<TileGrid>, roads: &RoadNetwork) -> bool {
    get_adjacent_points(tg).iter().any(|(_, neighbour)| roads.contains(neighbour))
  }

  /// The four orthogonal neighbours of a tile in the fixed `E, W, S, N` query order.
  pub fn get_adjacent_positions(&self, tg: &Point<TileGrid>) -> [Point<TileGrid>; 4] {
    let points = get_adjacent_points(tg);
    [points[0].1, points[1].1, points[2].1, points[3].1]
  }
}
