//! Key types shared by the cache unit tests.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Key whose `Hash` can be made to panic after it is stored.
///
/// Clones share the switch, so breaking the caller's copy also breaks the
/// copy held inside a store.
#[derive(Debug, Clone)]
pub struct FragileKey {
    id: u32,
    broken: Arc<AtomicBool>,
}

impl FragileKey {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            broken: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn break_hash(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn repair_hash(&self) {
        self.broken.store(false, Ordering::SeqCst);
    }
}

impl PartialEq for FragileKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FragileKey {}

impl Hash for FragileKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.broken.load(Ordering::SeqCst) {
            panic!("hash failure for key {}", self.id);
        }
        self.id.hash(state);
    }
}
