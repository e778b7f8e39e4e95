use crate::coords::point::{ChunkGrid, InternalGrid};
use crate::coords::Point;
use crate::generation::lib::{get_adjacent_points, shared, Chunk, Direction};
use crate::generation::terrain::TerrainWorld;
use crate::rng::SeededRandom;
use crate::settings::WorldGenerationSettings;
use log::*;

/// Produces a [`TerrainWorld`] by collapsing chunks one at a time along an outward square
/// spiral. The spiral order is part of the deterministic contract: reordering chunks changes the
/// output for the same seed because seam constraints and random draws happen in visit order.
pub struct TerrainGenerator;

impl TerrainGenerator {
  pub fn generate(settings: &WorldGenerationSettings) -> TerrainWorld {
    Self::generate_with_observer(settings, &mut |_, _| {})
  }

  /// Same as [`TerrainGenerator::generate`] but invokes `observer(completed, total)` after each
  /// chunk has been fully collapsed. The world is always in a consistent seam state when the
  /// observer runs, so a host may use it to drive progress reporting or to cancel between
  /// chunks by dropping the result.
  pub fn generate_with_observer(
    settings: &WorldGenerationSettings,
    observer: &mut dyn FnMut(usize, usize),
  ) -> TerrainWorld {
    let start_time = shared::get_time();
    let mut world = TerrainWorld::new(settings);
    let mut rng = SeededRandom::new(settings.seed);
    let spiral = spiral_chunk_coords(settings.render_distance);
    let total = spiral.len();
    for (i, cg) in spiral.into_iter().enumerate() {
      let chunk = collapse_chunk(&world, cg, settings, &mut rng, i == 0);
      world.insert_chunk(chunk);
      observer(i + 1, total);
    }
    info!("Generated {} chunk(s) in {} ms", total, shared::get_time() - start_time);

    world
  }
}

/// Returns the chunk coordinates to generate, walking an outward square spiral from the origin.
/// `render_distance` counts rings, so `1` yields only the origin chunk and `2` a 3×3 square.
fn spiral_chunk_coords(render_distance: u32) -> Vec<Point<ChunkGrid>> {
  let radius = render_distance as i32 - 1;
  let side = (2 * radius + 1) as usize;
  let total = side * side;
  let mut coords = Vec::with_capacity(total);
  coords.push(Point::new_chunk_grid(0, 0));

  let directions = [(1, 0), (0, 1), (-1, 0), (0, -1)];
  let (mut x, mut z): (i32, i32) = (0, 0);
  let mut direction = 0;
  let mut leg = 1;
  while coords.len() < total {
    for _ in 0..2 {
      let (dx, dz) = directions[direction % 4];
      for _ in 0..leg {
        x += dx;
        z += dz;
        if x.abs() <= radius && z.abs() <= radius {
          coords.push(Point::new_chunk_grid(x, z));
        }
        if coords.len() == total {
          return coords;
        }
      }
      direction += 1;
    }
    leg += 1;
  }

  coords
}

fn collapse_chunk(
  world: &TerrainWorld,
  cg: Point<ChunkGrid>,
  settings: &WorldGenerationSettings,
  rng: &mut SeededRandom,
  is_first_chunk: bool,
) -> Chunk {
  let size = settings.chunk_size;
  let mut chunk = Chunk::new(cg, size, settings.max_height);
  apply_seam_constraints(world, &mut chunk, settings);

  for iteration in 0..(size * size) {
    if is_first_chunk && iteration == 0 {
      // The very first cell of the world is fixed so the determinism contract has a hard anchor
      let ig = Point::new_internal_grid(size / 2, size / 2);
      let height = (settings.water_level + 2).clamp(0, settings.max_height);
      collapse_and_propagate(&mut chunk, &ig, height, settings);
      continue;
    }

    let Some(ig) = select_next_cell(world, &chunk, rng) else {
      break;
    };
    let possible = chunk
      .get_cell(&ig)
      .expect("Failed to get selected cell")
      .possible_heights()
      .to_vec();
    let height = if possible.is_empty() {
      recover_from_contradiction(&chunk, &ig, settings)
    } else {
      let neighbour_heights = collapsed_neighbour_heights(world, &chunk, &ig);
      weighted_height(&possible, &neighbour_heights, settings.continuity, rng)
    };
    collapse_and_propagate(&mut chunk, &ig, height, settings);
  }
  chunk.finalise(settings.water_level);

  chunk
}

/// Intersects the possible heights of every boundary cell with the steepness window around the
/// adjacent cell of each already-collapsed neighbour chunk.
fn apply_seam_constraints(world: &TerrainWorld, chunk: &mut Chunk, settings: &WorldGenerationSettings) {
  let size = settings.chunk_size;
  for (direction, neighbour_cg) in get_adjacent_points(&chunk.cg) {
    let Some(neighbour) = world.chunk_at(&neighbour_cg) else {
      continue;
    };
    for i in 0..size {
      let (own_ig, their_ig) = seam_pair(direction, i, size);
      if let Some(neighbour_height) = neighbour.collapsed_height_at(&their_ig) {
        chunk
          .get_cell_mut(&own_ig)
          .expect("Failed to get boundary cell")
          .constrain_to_neighbour(neighbour_height, settings.steepness);
      }
    }
  }
  chunk.neighbours_resolved = true;
}

/// Returns the pair of facing boundary cells for the `i`-th cell along the seam in the given
/// direction: the cell in the chunk being collapsed and the touching cell in the neighbour.
fn seam_pair(direction: Direction, i: i32, size: i32) -> (Point<InternalGrid>, Point<InternalGrid>) {
  match direction {
    Direction::East => (Point::new_internal_grid(size - 1, i), Point::new_internal_grid(0, i)),
    Direction::West => (Point::new_internal_grid(0, i), Point::new_internal_grid(size - 1, i)),
    Direction::South => (Point::new_internal_grid(i, size - 1), Point::new_internal_grid(i, 0)),
    Direction::North => (Point::new_internal_grid(i, 0), Point::new_internal_grid(i, size - 1)),
  }
}

/// Picks the next cell to observe: minimum entropy among the non-collapsed cells, preferring
/// cells that already touch a collapsed cell in this chunk or an existing neighbour chunk.
fn select_next_cell(world: &TerrainWorld, chunk: &Chunk, rng: &mut SeededRandom) -> Option<Point<InternalGrid>> {
  let mut lowest_entropy = usize::MAX;
  let mut candidates: Vec<Point<InternalGrid>> = Vec::new();
  for cell in chunk.cells() {
    if cell.is_collapsed() {
      continue;
    }
    let entropy = cell.entropy();
    if entropy < lowest_entropy {
      lowest_entropy = entropy;
      candidates = vec![cell.ig];
    } else if entropy == lowest_entropy {
      candidates.push(cell.ig);
    }
  }
  if candidates.is_empty() {
    return None;
  }

  let preferred: Vec<Point<InternalGrid>> = candidates
    .iter()
    .filter(|ig| !collapsed_neighbour_heights(world, chunk, ig).is_empty())
    .copied()
    .collect();
  let pool = if preferred.is_empty() { candidates } else { preferred };

  rng.choose(&pool).copied()
}

/// Returns the heights of all collapsed 4-neighbours of the cell at `ig`, both within the chunk
/// being collapsed and across seams into already-generated chunks, in `E, W, S, N` order.
fn collapsed_neighbour_heights(world: &TerrainWorld, chunk: &Chunk, ig: &Point<InternalGrid>) -> Vec<i32> {
  let size = chunk.size();
  let tg = chunk.cg.to_tile_grid(*ig, size);
  let mut heights = Vec::with_capacity(4);
  for (_, neighbour_tg) in get_adjacent_points(&tg) {
    let neighbour_cg = neighbour_tg.to_chunk_grid(size);
    let neighbour_ig = neighbour_tg.to_internal_grid(size);
    let height = if neighbour_cg == chunk.cg {
      chunk.collapsed_height_at(&neighbour_ig)
    } else {
      world.chunk_at(&neighbour_cg).and_then(|c| c.collapsed_height_at(&neighbour_ig))
    };
    if let Some(height) = height {
      heights.push(height);
    }
  }

  heights
}

/// Draws a height from the cell's possible heights, weighted towards the heights of collapsed
/// neighbours: `weight(h) = 1 + Σ max(0, continuity − |h − nh| + 1)²` over all collapsed
/// 4-neighbours `nh`.
fn weighted_height(possible: &[i32], neighbour_heights: &[i32], continuity: i32, rng: &mut SeededRandom) -> i32 {
  let weights: Vec<i64> = possible
    .iter()
    .map(|h| {
      1 + neighbour_heights
        .iter()
        .map(|nh| {
          let affinity = (continuity - (h - nh).abs() + 1).max(0) as i64;
          affinity * affinity
        })
        .sum::<i64>()
    })
    .collect();
  let total: i64 = weights.iter().sum();
  let mut target = (rng.next_float() * total as f64) as i64;
  for (height, weight) in possible.iter().zip(weights.iter()) {
    if target < *weight {
      return *height;
    }
    target -= weight;
  }

  *possible.last().expect("Failed to select a weighted height")
}

/// A cell with no possible heights left. Falls back to the integer mean of the collapsed
/// in-chunk neighbours, or just above the water level if the cell has none, and keeps going.
fn recover_from_contradiction(chunk: &Chunk, ig: &Point<InternalGrid>, settings: &WorldGenerationSettings) -> i32 {
  let mut neighbour_heights = Vec::with_capacity(4);
  for (_, neighbour_ig) in get_adjacent_points(ig) {
    if let Some(height) = chunk.collapsed_height_at(&neighbour_ig) {
      neighbour_heights.push(height);
    }
  }
  let height = if neighbour_heights.is_empty() {
    settings.water_level + 1
  } else {
    neighbour_heights.iter().sum::<i32>() / neighbour_heights.len() as i32
  };
  let height = height.clamp(0, settings.max_height);
  warn!("Contradiction at {:?} in chunk {}; recovered with height {}", ig, chunk.cg, height);

  height
}

fn collapse_and_propagate(chunk: &mut Chunk, ig: &Point<InternalGrid>, height: i32, settings: &WorldGenerationSettings) {
  chunk
    .get_cell_mut(ig)
    .expect("Failed to get cell to collapse")
    .collapse_to(height, settings.water_level);
  for (_, neighbour_ig) in get_adjacent_points(ig) {
    if let Some(neighbour) = chunk.get_cell_mut(&neighbour_ig) {
      if !neighbour.is_collapsed() {
        neighbour.constrain_to_neighbour(height, settings.steepness);
      }
    }
  }
}
