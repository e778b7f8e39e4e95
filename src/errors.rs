use thiserror::Error;

/// Hard failures that cross the crate boundary. Recoverable conditions such as site starvation,
/// placement shortfalls, or WFC contradictions are logged and reflected in the emitted data
/// instead; only configuration and invariant errors surface as `Err`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GenerationError {
  #[error("render distance must be between 1 and 8 but was {0}")]
  InvalidRenderDistance(u32),
  #[error("steepness must be at least 1 but was {0}")]
  InvalidSteepness(i32),
  #[error("continuity must not be negative but was {0}")]
  InvalidContinuity(i32),
  #[error("max height must be between 1 and {1} but was {0}")]
  InvalidMaxHeight(i32, i32),
  #[error("chunk size must be at least 2 but was {0}")]
  InvalidChunkSize(i32),
  #[error("minimum site area must be at least 1")]
  InvalidMinAreaSize,
  #[error("city centre ({0}, {1}) is outside the map bounds")]
  CityCentreOutOfBounds(i32, i32),
  #[error("no building type has a population between {0} and {1}")]
  EmptyCatalogueSelection(i32, i32),
}
