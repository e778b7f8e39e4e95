use crate::coords::point::TileGrid;
use crate::coords::Point;
use crate::generation::city::CitySize;
use crate::generation::collision::CollisionService;
use crate::generation::lib::{get_adjacent_points, Direction};
use crate::rng::SeededRandom;
use log::*;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use strum::Display;

/// The canonical direction bitset of a road tile: `N=1`, `E=2`, `S=4`, `W=8`. Renderers read it
/// to orient road meshes without re-deriving adjacency.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct Connections(u8);

impl Connections {
  pub fn none() -> Self {
    Self(0)
  }

  pub fn add(&mut self, direction: Direction) {
    self.0 |= direction.bit();
  }

  pub fn has(&self, direction: Direction) -> bool {
    self.0 & direction.bit() != 0
  }

  pub fn count(&self) -> u32 {
    self.0.count_ones()
  }

  pub fn bits(&self) -> u8 {
    self.0
  }

  /// Whether the connections form a straight line i.e. exactly north/south or east/west.
  pub fn is_straight_pair(&self) -> bool {
    self.0 == Direction::North.bit() | Direction::South.bit() || self.0 == Direction::East.bit() | Direction::West.bit()
  }
}

/// The render variant of a road tile, derived purely from its connection bits.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, Serialize)]
pub enum RoadKind {
  Horizontal,
  Vertical,
  Corner,
  Intersection,
  DeadEnd,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct RoadTile {
  pub tg: Point<TileGrid>,
  pub connections: Connections,
  pub is_intersection: bool,
  pub is_corner: bool,
  pub is_dead_end: bool,
}

impl RoadTile {
  pub fn kind(&self) -> RoadKind {
    match self.connections.count() {
      0 | 1 => RoadKind::DeadEnd,
      2 if self.connections.bits() == Direction::East.bit() | Direction::West.bit() => RoadKind::Horizontal,
      2 if self.connections.bits() == Direction::North.bit() | Direction::South.bit() => RoadKind::Vertical,
      2 => RoadKind::Corner,
      _ => RoadKind::Intersection,
    }
  }
}

/// The road network of a single city. Tiles are kept in placement order so emitted data is
/// byte-stable; the lookup index is rebuilt from that order and never serialised.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoadNetwork {
  tiles: Vec<RoadTile>,
  #[serde(skip)]
  index: HashMap<Point<TileGrid>, usize>,
  pub intersections: Vec<Point<TileGrid>>,
  pub dead_ends: Vec<Point<TileGrid>>,
  pub corners: Vec<Point<TileGrid>>,
}

impl RoadNetwork {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.tiles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tiles.is_empty()
  }

  pub fn contains(&self, tg: &Point<TileGrid>) -> bool {
    self.index.contains_key(tg)
  }

  pub fn get(&self, tg: &Point<TileGrid>) -> Option<&RoadTile> {
    self.index.get(tg).map(|i| &self.tiles[*i])
  }

  /// All tiles in the order they were placed in.
  pub fn tiles(&self) -> &[RoadTile] {
    &self.tiles
  }

  /// Adds a road tile and links its connection bits with every orthogonally adjacent tile that
  /// is already part of the network, in both directions.
  pub fn insert_tile(&mut self, tg: Point<TileGrid>) {
    if self.contains(&tg) {
      error!("Attempted to insert a second road tile at {} - this is a bug", tg);
      return;
    }
    let mut connections = Connections::none();
    for (direction, neighbour_tg) in get_adjacent_points(&tg) {
      if let Some(i) = self.index.get(&neighbour_tg) {
        connections.add(direction);
        self.tiles[*i].connections.add(direction.opposite());
      }
    }
    self.index.insert(tg, self.tiles.len());
    self.tiles.push(RoadTile {
      tg,
      connections,
      is_intersection: false,
      is_corner: false,
      is_dead_end: false,
    });
  }

  /// Classifies every tile from its final connection bits and fills the intersection, dead end,
  /// and corner lists in placement order. Call once after growth has finished.
  pub fn finalise(&mut self) {
    self.intersections.clear();
    self.dead_ends.clear();
    self.corners.clear();
    for tile in self.tiles.iter_mut() {
      let count = tile.connections.count();
      tile.is_intersection = count >= 3;
      tile.is_dead_end = count == 1;
      tile.is_corner = count == 2 && !tile.connections.is_straight_pair();
      if tile.is_intersection {
        self.intersections.push(tile.tg);
      }
      if tile.is_dead_end {
        self.dead_ends.push(tile.tg);
      }
      if tile.is_corner {
        self.corners.push(tile.tg);
      }
    }
  }
}

/// Per-tier tuning of the road growth.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RoadBuilderConfig {
  /// Arms at this branching depth no longer grow.
  pub max_depth: u32,
  /// Number of tiles between intersections along an arm.
  pub block_spacing: u32,
  /// Maximum number of tiles a single arm can place.
  pub max_arm_length: u32,
}

impl RoadBuilderConfig {
  pub fn for_size(size: CitySize) -> Self {
    match size {
      CitySize::Small => Self {
        max_depth: 2,
        block_spacing: 3,
        max_arm_length: 10,
      },
      CitySize::Medium => Self {
        max_depth: 3,
        block_spacing: 4,
        max_arm_length: 14,
      },
      CitySize::Large => Self {
        max_depth: 4,
        block_spacing: 5,
        max_arm_length: 18,
      },
    }
  }
}

/// One growth frontier of the network: a single arm extending tile by tile in its direction
/// until it is blocked by a collision, reaches its length cap, or exceeds the branching depth.
#[derive(Debug, Clone, Copy)]
struct Arm {
  position: Point<TileGrid>,
  direction: Direction,
  depth: u32,
  length: u32,
}

/// Grows an orthogonal road network outward from a city centre. Arms are processed breadth-first
/// through a FIFO queue and all branching choices are drawn from the provided PRNG, so the
/// resulting network is a pure function of terrain, centre, tier, and seed.
pub struct RoadNetworkBuilder<'a> {
  collision: &'a CollisionService<'a>,
}

impl<'a> RoadNetworkBuilder<'a> {
  pub fn new(collision: &'a CollisionService<'a>) -> Self {
    Self { collision }
  }

  pub fn build(&self, centre: Point<TileGrid>, size: CitySize, rng: &mut SeededRandom) -> RoadNetwork {
    let config = RoadBuilderConfig::for_size(size);
    let mut network = RoadNetwork::new();
    let initial_check = self.collision.can_place_road(&centre, &network);
    if initial_check.has_collision {
      warn!(
        "Cannot start road network at {}: {}",
        centre,
        initial_check.message.unwrap_or_default()
      );
      return network;
    }
    network.insert_tile(centre);

    let mut queue: VecDeque<Arm> = Direction::ALL
      .iter()
      .map(|direction| Arm {
        position: centre,
        direction: *direction,
        depth: 0,
        length: 0,
      })
      .collect();
    while let Some(mut arm) = queue.pop_front() {
      if arm.depth >= config.max_depth || arm.length >= config.max_arm_length {
        continue;
      }
      let next = arm.position + Point::from_direction(arm.direction);
      let check = self.collision.can_place_road(&next, &network);
      if check.has_collision || !self.collision.is_passable(&arm.position, &next) {
        continue;
      }
      network.insert_tile(next);
      arm.position = next;
      arm.length += 1;
      if arm.length % config.block_spacing == 0 {
        self.spawn_branches(&arm, &mut queue, rng);
      }
      queue.push_back(arm);
    }
    network.finalise();
    debug!(
      "Built road network at {} with {} tile(s), {} intersection(s) and {} dead end(s)",
      centre,
      network.len(),
      network.intersections.len(),
      network.dead_ends.len()
    );

    network
  }

  /// Spawns up to two perpendicular arms at an intersection. The side that branches first is
  /// drawn from the PRNG; the opposite side follows half of the time.
  fn spawn_branches(&self, arm: &Arm, queue: &mut VecDeque<Arm>, rng: &mut SeededRandom) {
    let sides = arm.direction.perpendicular();
    let first = if rng.next_boolean(0.5) { sides[0] } else { sides[1] };
    queue.push_back(Arm {
      position: arm.position,
      direction: first,
      depth: arm.depth + 1,
      length: 0,
    });
    if rng.next_boolean(0.5) {
      queue.push_back(Arm {
        position: arm.position,
        direction: first.opposite(),
        depth: arm.depth + 1,
        length: 0,
      });
    }
  }
}
