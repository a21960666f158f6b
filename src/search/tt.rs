use crate::board::{GameState, Player};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub value: i32,
    pub bound: Bound,
}

/// Positions are keyed by their canonical pile multiset and the side to
/// move. Keys are exact, so a hit can never alias another position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    piles: Vec<u32>,
    to_move: Player,
}

impl Key {
    pub fn of(state: &GameState) -> Self {
        Self { piles: state.piles().canonical(), to_move: state.to_move() }
    }
}

const DEFAULT_CAPACITY: usize = 1 << 20;

/// Transposition table shared by the workers of one search. Values are
/// only meaningful for the perspective that search was started with.
pub struct Tt {
    map: Mutex<HashMap<Key, Entry>>,
    capacity: usize,
}

impl Default for Tt {
    fn default() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }
}

impl Tt {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { map: Mutex::new(HashMap::new()), capacity: capacity.max(1) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Key, Entry>> {
        self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &Key) -> Option<Entry> {
        self.lock().get(key).copied()
    }

    pub fn len(&self) -> usize { self.lock().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn clear(&self) { self.lock().clear(); }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn put(&self, key: Key, e: Entry) {
        let mut g = self.lock();
        if let Some(cur) = g.get_mut(&key) {
            // Never trade an exact value for a bound
            if cur.bound != Bound::Exact || e.bound == Bound::Exact { *cur = e; }
            return;
        }
        // Full table: keep what we have; the search stays exact without it
        if g.len() >= self.capacity { return; }
        g.insert(key, e);
    }
}
