//! No-repeat random picker
//!
//! Draws items from a fixed list without replacement. The ids still in play
//! (the pool) are persisted after every draw and reset, so a restarted picker
//! resumes the same cycle. Every item comes up exactly once before the pool
//! runs dry; after that `pick` yields nothing until `reset`.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::persistence::{KeyValueStore, PoolStore};

/// Whether any draws are left in the current cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// At least one item left to draw
    Active,
    /// Every item has been drawn; only `reset` starts a new cycle
    Exhausted,
}

/// Draws items without replacement, persisting the remaining pool.
pub struct Picker<T, S> {
    items: Vec<T>,
    pool: Vec<usize>,
    store: PoolStore<S>,
    rng: Pcg32,
}

impl<T, S: KeyValueStore> Picker<T, S> {
    /// Open a picker over `items`, seeding the RNG from OS entropy.
    pub fn new(items: Vec<T>, store: S, key: &str) -> Self {
        Self::with_rng(items, store, key, Pcg32::from_os_rng())
    }

    /// Open a picker with a fixed seed (reproducible draws)
    pub fn with_seed(items: Vec<T>, store: S, key: &str, seed: u64) -> Self {
        Self::with_rng(items, store, key, Pcg32::seed_from_u64(seed))
    }

    /// Open a picker over `items`, restoring the pool persisted under `key`.
    ///
    /// A missing or unusable stored pool starts a fresh, fully shuffled cycle.
    pub fn with_rng(items: Vec<T>, store: S, key: &str, rng: Pcg32) -> Self {
        let store = PoolStore::new(store, key, items.len());
        let mut picker = Self {
            items,
            pool: Vec::new(),
            store,
            rng,
        };

        match picker.store.load() {
            Ok(pool) => {
                log::info!(
                    "Restored pool: {} of {} remaining",
                    pool.len(),
                    picker.items.len()
                );
                picker.pool = pool;
            }
            Err(e) => {
                log::info!("Starting a fresh cycle ({})", e);
                picker.reset();
            }
        }

        picker
    }

    /// Draw one item at random and remove it from the pool.
    ///
    /// Returns `None` once the pool is exhausted.
    pub fn pick(&mut self) -> Option<&T> {
        let id = self.pick_id()?;
        self.items.get(id)
    }

    /// Draw one id at random and remove it from the pool.
    pub fn pick_id(&mut self) -> Option<usize> {
        if self.pool.is_empty() {
            return None;
        }

        let slot = self.rng.random_range(0..self.pool.len());
        // Pool order carries no meaning, so swap_remove is fine
        let id = self.pool.swap_remove(slot);
        self.persist();

        log::debug!("Picked #{} ({} remaining)", id, self.pool.len());
        Some(id)
    }

    /// Refill the pool with every id in fresh random order.
    pub fn reset(&mut self) {
        self.pool = (0..self.items.len()).collect();
        self.pool.shuffle(&mut self.rng);
        self.persist();
        log::info!("Pool reset ({} items)", self.pool.len());
    }

    /// Number of items left in the current cycle
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn state(&self) -> PickerState {
        if self.pool.is_empty() {
            PickerState::Exhausted
        } else {
            PickerState::Active
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == PickerState::Exhausted
    }

    /// Total number of items, drawn or not
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: usize) -> Option<&T> {
        self.items.get(id)
    }

    /// Ids not yet drawn this cycle (unordered)
    pub fn pool(&self) -> &[usize] {
        &self.pool
    }

    /// Write the pool through. Failures leave the in-memory pool authoritative.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.pool) {
            log::warn!("Failed to save pool under '{}': {}", self.store.key(), e);
        }
    }
}

/// Shuffled copy of `items` (Fisher-Yates)
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
