//! `STable`: the open-addressed, symbol-keyed map reused for the module
//! registry, per-module symbols, the global symbol table, and
//! qualified-name sub-maps.

use c3c_data_structures::FxIndexMap;
use c3c_interface::Symbol;

/// A symbol-table entry that can represent "ambiguous" without a second
/// lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot<V> {
    Unique(V),
    Poisoned,
}

impl<V> Slot<V> {
    pub fn is_poisoned(&self) -> bool {
        matches!(self, Slot::Poisoned)
    }

    pub fn unique(&self) -> Option<&V> {
        match self {
            Slot::Unique(v) => Some(v),
            Slot::Poisoned => None,
        }
    }
}

/// Open-addressed map keyed by interned symbol identity.
///
/// Backed by an `IndexMap` keyed on `Symbol`'s content hash (which agrees
/// with pointer identity), so insertion order is preserved across inserts.
pub struct STable<V> {
    map: FxIndexMap<Symbol, V>,
}

impl<V> Default for STable<V> {
    fn default() -> Self {
        Self { map: FxIndexMap::default() }
    }
}

impl<V> STable<V> {
    /// `capacity` is a hint only; the table grows past it as needed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { map: FxIndexMap::with_capacity_and_hasher(capacity, Default::default()) }
    }

    pub fn get(&self, key: Symbol) -> Option<&V> {
        self.map.get(&key)
    }

    pub fn get_mut(&mut self, key: Symbol) -> Option<&mut V> {
        self.map.get_mut(&key)
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    pub fn set(&mut self, key: Symbol, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    pub fn contains(&self, key: Symbol) -> bool {
        self.map.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &V)> {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_returns_previous_value() {
        let mut t: STable<i32> = STable::default();
        let (foo, _) = Symbol::intern("foo");
        assert_eq!(t.set(foo, 1), None);
        assert_eq!(t.set(foo, 2), Some(1));
        assert_eq!(t.get(foo), Some(&2));
    }
}
