use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, Hash},
    iter, mem,
};

use crate::{
    config::{MapConfig, threshold_for},
    probe::ProbeSequence,
    slot::Slot,
};

/// Hasher builder used when none is supplied. Keys hash the same way on every run.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// A hash map using open addressing with a fixed probe step.
///
/// Collisions are resolved by stepping [`GAP`](crate::GAP) slots at a time
/// through a single backing store. Removed entries leave tombstones so that
/// later lookups keep walking past them. Once the number of live entries
/// reaches `floor(load_factor * capacity)`, the store doubles and every live
/// entry is reinserted; tombstones are dropped at that point. The store never
/// shrinks.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share
/// it between threads.
#[derive(Clone)]
pub struct ProbingMap<K, V, S = DefaultHashBuilder> {
    /// The slots holding the entries
    store: Box<[Slot<K, V>]>,
    /// Current number of live entries
    size: usize,
    /// Ratio of live entries to slots at which the store grows
    load_factor: f64,
    /// Live-entry count that triggers growth of the current store
    threshold: usize,
    /// Builds the hasher applied to every key
    hash_builder: S,
}

impl<K, V, S> Default for ProbingMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for ProbingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V> ProbingMap<K, V, DefaultHashBuilder> {
    /// Creates a map with the default capacity (1000) and load factor (0.5)
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(MapConfig::default())
    }

    /// Creates a map with the given capacity and the default load factor.
    ///
    /// A zero capacity is replaced by the default.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(MapConfig::default().with_capacity(capacity))
    }

    /// Creates a map with the default capacity and the given load factor.
    ///
    /// A load factor outside `(0, 1]` is replaced by the default.
    #[must_use]
    pub fn with_load_factor(load_factor: f64) -> Self {
        Self::from_config(MapConfig::default().with_load_factor(load_factor))
    }

    /// Creates a map with the given capacity and load factor, each normalized independently
    #[must_use]
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self::from_config(MapConfig::new(capacity, load_factor))
    }

    /// Creates a map from a prepared configuration
    #[must_use]
    pub fn from_config(config: MapConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ProbingMap<K, V, S> {
    /// Creates a map with default parameters that hashes keys with `hash_builder`
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(MapConfig::default(), hash_builder)
    }

    /// Creates a map from a configuration and a hasher builder
    #[must_use]
    pub fn with_config_and_hasher(config: MapConfig, hash_builder: S) -> Self {
        Self {
            store: empty_store(config.capacity()),
            size: 0,
            load_factor: config.load_factor(),
            threshold: config.threshold(),
            hash_builder,
        }
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the backing store
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Returns the configured load factor
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the live-entry count at which the store next doubles
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Removes every entry and tombstone, keeping the current capacity
    pub fn clear(&mut self) {
        for slot in self.store.iter_mut() {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns an iterator over the live entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.store.iter() }
    }

    /// Returns an iterator over the keys of the live entries
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the live entries
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the backing store
    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.store
    }
}

impl<K, V, S> ProbingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Computes the hash for a key
    pub(crate) fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        self.hash_builder.hash_one(key)
    }

    /// Finds the slot holding `key`.
    ///
    /// Walks past tombstones and slots of other keys, and gives up at the
    /// first empty slot or once every slot has been visited.
    fn locate_existing<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        for index in ProbeSequence::new(hash, self.store.len()) {
            let slot = self.store.get(index)?;
            if matches!(slot, Slot::Empty) {
                return None;
            }
            if slot.key().is_some_and(|candidate| candidate.borrow() == key) {
                return Some(index);
            }
        }
        None
    }

    /// Finds the first slot on the probe sequence that holds no live entry.
    ///
    /// Tombstones qualify, so a freed slot is reused before the chain grows.
    fn locate_insertion_point(&self, hash: u64) -> Option<usize> {
        ProbeSequence::new(hash, self.store.len())
            .find(|&index| self.store.get(index).is_some_and(|slot| !slot.is_occupied()))
    }

    /// Inserts a key-value pair, returning the previous value of the key
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash(&key);

        if let Some(current) = self
            .locate_existing(hash, &key)
            .and_then(|index| self.store.get_mut(index))
            .and_then(Slot::value_mut)
        {
            return Some(mem::replace(current, value));
        }

        self.insert_new(hash, key, value);
        None
    }

    /// Places a key known to be absent, growing the store once the threshold is reached
    fn insert_new(&mut self, hash: u64, key: K, value: V) {
        let Some(slot) =
            self.locate_insertion_point(hash).and_then(|index| self.store.get_mut(index))
        else {
            // No slot left without a live entry: grow, then retry in the larger store.
            self.rehash();
            return self.insert_new(hash, key, value);
        };

        *slot = Slot::Occupied { key, value };
        self.size = self.size.saturating_add(1);

        if self.size >= self.threshold {
            self.rehash();
        }
    }

    /// Retrieves the value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        self.locate_existing(hash, key)
            .and_then(|index| self.store.get(index))
            .and_then(Slot::entry)
            .map(|(_, value)| value)
    }

    /// Retrieves a mutable reference to the value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        self.locate_existing(hash, key)
            .and_then(|index| self.store.get_mut(index))
            .and_then(Slot::value_mut)
    }

    /// Returns true if the map holds an entry for the key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        self.locate_existing(hash, key).is_some()
    }

    /// Removes the entry for a key, leaving a tombstone in its slot
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        let index = self.locate_existing(hash, key)?;
        let value = self.store.get_mut(index)?.bury()?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Doubles the store and reinserts every live entry, dropping tombstones
    fn rehash(&mut self) {
        let capacity = self.store.len().saturating_mul(2);
        let old_store = mem::replace(&mut self.store, empty_store(capacity));
        self.threshold = threshold_for(self.load_factor, capacity);
        self.size = 0;

        for (key, value) in old_store.into_vec().into_iter().filter_map(Slot::into_entry) {
            self.put(key, value);
        }
    }
}

/// Allocates a store of `capacity` empty slots
fn empty_store<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

impl<K, V, S> fmt::Debug for ProbingMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Lists every slot of the store: `null` when empty, `deleted` for a
/// tombstone, `{key=.., value=..}` for a live entry.
impl<K, V, S> fmt::Display for ProbingMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, slot) in self.store.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Slot::Empty => f.write_str("null")?,
                Slot::Tombstone => f.write_str("deleted")?,
                Slot::Occupied { key, value } => write!(f, "{{key={key}, value={value}}}")?,
            }
        }
        f.write_str("]")
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of a map
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Remaining slots of the store
    slots: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| slot.entry())
    }
}

/// Iterator over the keys of a map
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    /// Entry iterator the keys are taken from
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Iterator over the values of a map
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    /// Entry iterator the values are taken from
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}
