use std::time::{SystemTime, UNIX_EPOCH};
use xxhash_rust::xxh32::xxh32;

/// Returns the current time in milliseconds since the epoch. Only used to log how long
/// generation stages took; never feeds into any random stream.
pub fn get_time() -> u128 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .expect("Failed to get duration since epoch")
    .as_millis()
}

/// Derives a child seed from the master seed and a pair of coordinates, so that each consumer
/// (per-city RNG, site finder, object scattering) draws from its own reproducible stream.
pub fn derive_seed(master_seed: u32, x: i32, z: i32) -> u32 {
  let mut bytes = [0u8; 8];
  bytes[..4].copy_from_slice(&x.to_le_bytes());
  bytes[4..].copy_from_slice(&z.to_le_bytes());
  master_seed ^ xxh32(&bytes, master_seed)
}

/// Derives a child seed from the master seed and a label naming the consumer.
pub fn derive_seed_for(master_seed: u32, label: &str) -> u32 {
  master_seed ^ xxh32(label.as_bytes(), master_seed)
}
