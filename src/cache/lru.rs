//! LRU Store Module
//!
//! Fixed-capacity recency store that reports what it evicts.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Sentinel for "no neighbour" in the intrusive list.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

// == LRU Store ==
/// Bounded key/value store ordered by recency of use.
///
/// Nodes live in a slab (`Vec` plus free list) and are linked by index:
/// - `head` = Most recently used
/// - `tail` = Least recently used
///
/// Every operation is O(1) amortized. Inserting past capacity evicts the
/// tail and hands it back to the caller instead of dropping it silently.
#[derive(Debug)]
pub struct LruStore<K, V> {
    index: HashMap<K, usize>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    capacity: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one; callers validate it beforehand.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            capacity,
        }
    }

    // == Insert ==
    /// Inserts or overwrites `key`, marking it most recently used.
    ///
    /// Returns the least recently used entry when the insert pushed the store
    /// over capacity. Overwriting an existing key never evicts.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&slot) = self.index.get(&key) {
            self.node_mut(slot).value = value;
            self.promote(slot);
            return None;
        }

        let node = Node {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.index.insert(key, slot);
        self.push_front(slot);

        if self.index.len() > self.capacity {
            self.pop_oldest()
        } else {
            None
        }
    }

    // == Get ==
    /// Returns the value for `key` and promotes it to most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.promote(slot);
        Some(&self.node(slot).value)
    }

    // == Peek ==
    /// Returns the value for `key` without touching recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.node(slot).value)
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        Some(self.release(slot).1)
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        if self.tail == NIL {
            return None;
        }
        let slot = self.tail;
        // Drop the index entry first: hashing the key is the step that can
        // panic, and it must do so before the list is touched.
        if let Some(node) = self.slots[slot].as_ref() {
            self.index.remove(&node.key);
        }
        Some(self.release(slot))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        (self.tail != NIL).then(|| &self.node(self.tail).key)
    }

    /// Drops every entry, keeping the capacity.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            store: self,
            cursor: self.head,
        }
    }

    // == List Plumbing ==
    fn node(&self, slot: usize) -> &Node<K, V> {
        self.slots[slot]
            .as_ref()
            .unwrap_or_else(|| unreachable!("index points at a free slot"))
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<K, V> {
        self.slots[slot]
            .as_mut()
            .unwrap_or_else(|| unreachable!("index points at a free slot"))
    }

    fn promote(&mut self, slot: usize) {
        if self.head == slot {
            return;
        }
        self.unlink(slot);
        self.push_front(slot);
    }

    fn push_front(&mut self, slot: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(slot);
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            self.node_mut(old_head).prev = slot;
        } else {
            self.tail = slot;
        }
        self.head = slot;
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };
        if prev != NIL {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }
    }

    /// Unlinks `slot` and returns its node to the free list.
    /// The caller is responsible for the `index` entry.
    fn release(&mut self, slot: usize) -> (K, V) {
        self.unlink(slot);
        let node = self.slots[slot]
            .take()
            .unwrap_or_else(|| unreachable!("released a free slot"));
        self.free.push(slot);
        (node.key, node.value)
    }
}

/// Iterator over keys in recency order, see [`LruStore::keys`].
pub struct Keys<'a, K, V> {
    store: &'a LruStore<K, V>,
    cursor: usize,
}

impl<'a, K, V> Iterator for Keys<'a, K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = self.store.node(self.cursor);
        self.cursor = node.next;
        Some(&node.key)
    }
}
