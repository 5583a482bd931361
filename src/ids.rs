use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

use crate::cell::CellId;

/// Source of fresh cell identifiers (version-4 UUIDs).
///
/// Unseeded generators draw from `thread_rng()`; seeded ones from a
/// `StdRng` so that a scripted session hands out the same ids every run.
#[derive(Debug, Clone, Default)]
pub struct CellIdGenerator {
  seeded: Option<StdRng>,
}

impl CellIdGenerator {
  pub fn random() -> Self {
    Self { seeded: None }
  }

  pub fn seeded(seed: u64) -> Self {
    Self {
      seeded: Some(StdRng::seed_from_u64(seed)),
    }
  }

  pub fn from_seed(seed: Option<u64>) -> Self {
    seed.map_or_else(Self::random, Self::seeded)
  }

  pub fn is_seeded(&self) -> bool {
    self.seeded.is_some()
  }

  /// Execute a closure with the generator's current RNG.
  fn with_rng<F, R>(&mut self, f: F) -> R
  where
    F: FnOnce(&mut dyn RngCore) -> R,
  {
    match self.seeded {
      Some(ref mut seeded) => f(seeded),
      None => f(&mut rand::thread_rng()),
    }
  }

  pub fn next_id(&mut self) -> CellId {
    let mut bytes = [0u8; 16];
    self.with_rng(|rng| rng.fill_bytes(&mut bytes));
    let uuid: Uuid = Builder::from_random_bytes(bytes).into_uuid();
    CellId::from_uuid(uuid)
  }
}
