//! Keyed circular buffer with a resumable cursor.
//!
//! Slots form a ring through a sentinel head that never holds a value.
//! Slots are only ever appended, so they live in a `Vec` and link forward by
//! index, with the tail tracked separately for appends. There is no internal
//! locking: callers hold the enclosing lock for every call, including the
//! cursor-moving ones.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A position in the ring: the sentinel or a slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pos {
    Head,
    Slot(usize),
}

#[derive(Debug)]
struct Slot<V> {
    value: V,
    next: Pos,
}

/// Ring of values in insertion order, indexed by key.
///
/// Invariant: `index.len() == slots.len()` and every slot is reachable from
/// the head by following `next`.
#[derive(Debug)]
pub struct IndexedCircularBuffer<K, V> {
    slots: Vec<Slot<V>>,
    index: HashMap<K, usize>,
    /// First slot after the head.
    first: Pos,
    /// Last slot before the head.
    last: Pos,
    current: Pos,
}

impl<K, V> Default for IndexedCircularBuffer<K, V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            first: Pos::Head,
            last: Pos::Head,
            current: Pos::Head,
        }
    }
}

impl<K: Eq + Hash, V> IndexedCircularBuffer<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_of(&self, pos: Pos) -> Pos {
        match pos {
            Pos::Head => self.first,
            Pos::Slot(i) => self.slots[i].next,
        }
    }

    /// Append `item` under `key` just before the head. Returns false, leaving
    /// the buffer untouched, if `key` is already present.
    pub fn add(&mut self, key: K, item: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.slots.len();
        self.slots.push(Slot {
            value: item,
            next: Pos::Head,
        });
        match self.last {
            Pos::Head => self.first = Pos::Slot(id),
            Pos::Slot(prev) => self.slots[prev].next = Pos::Slot(id),
        }
        self.last = Pos::Slot(id);
        self.index.insert(key, id);
        true
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| &self.slots[i].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = *self.index.get(key)?;
        Some(&mut self.slots[i].value)
    }

    /// Look up `key`, appending `make()` if it is missing. The flag tells
    /// whether the value already existed.
    pub fn get_or_insert_with<Q, F>(&mut self, key: &Q, make: F) -> (&mut V, bool)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce() -> V,
    {
        if let Some(&i) = self.index.get(key) {
            return (&mut self.slots[i].value, true);
        }
        let i = self.slots.len();
        self.add(key.to_owned(), make());
        (&mut self.slots[i].value, false)
    }

    /// Step the cursor one slot forward, skipping the head, and return the
    /// value there. `None` only when the buffer is empty.
    pub fn advance(&mut self) -> Option<&V> {
        if self.next_of(self.current) == Pos::Head {
            self.current = Pos::Head;
        }
        self.current = self.next_of(self.current);
        match self.current {
            Pos::Head => None,
            Pos::Slot(i) => Some(&self.slots[i].value),
        }
    }

    /// Visit every value in insertion order until `visit` returns false.
    /// The cursor is not touched.
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&V) -> bool,
    {
        let mut pos = self.first;
        while let Pos::Slot(i) = pos {
            if !visit(&self.slots[i].value) {
                return;
            }
            pos = self.slots[i].next;
        }
    }

    /// Visit every value once, starting just after the cursor and wrapping
    /// around, so the slot under the cursor comes last.
    ///
    /// When `visit` returns false the cursor parks on that slot and the next
    /// call resumes after it. A full pass leaves the cursor where it was.
    pub fn range_next<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut V) -> bool,
    {
        let start = self.current;
        let mut pos = self.next_of(start);
        while pos != start {
            if let Pos::Slot(i) = pos {
                if !visit(&mut self.slots[i].value) {
                    self.current = pos;
                    return;
                }
            }
            pos = self.next_of(pos);
        }
        if let Pos::Slot(i) = start {
            visit(&mut self.slots[i].value);
        }
    }

    pub fn is_current_at_head(&self) -> bool {
        self.current == Pos::Head
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
