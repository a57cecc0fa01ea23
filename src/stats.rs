//! Probe-length and slot-usage statistics for inspecting a map

use std::{
    fmt,
    hash::{BuildHasher, Hash},
};

use crate::{ProbingMap, probe::ProbeSequence, slot::Slot};

/// Snapshot of how a map's store is used
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeStats {
    /// Number of slots in the store
    pub capacity: usize,
    /// Slots holding a live entry
    pub live: usize,
    /// Slots holding a tombstone
    pub tombstones: usize,
    /// Slots never written since the store was allocated
    pub empty: usize,
    /// Live-entry count at which the store doubles
    pub threshold: usize,
    /// Average number of slots visited to reach a live entry
    pub mean_probe_length: f64,
    /// Largest number of slots visited to reach a live entry
    pub max_probe_length: usize,
}

impl<K, V, S> ProbingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Collects slot counts and probe lengths.
    ///
    /// The probe length of an entry is the number of slots its lookup
    /// visits, counting the slot it is found in. Takes time proportional to
    /// the sum of all probe lengths.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
    pub fn probe_stats(&self) -> ProbeStats {
        let slots = self.slots();
        let capacity = slots.len();
        let mut stats = ProbeStats {
            capacity,
            live: 0,
            tombstones: 0,
            empty: 0,
            threshold: self.threshold(),
            mean_probe_length: 0.0,
            max_probe_length: 0,
        };
        let mut total_probes: usize = 0;

        for (index, slot) in slots.iter().enumerate() {
            match slot {
                Slot::Empty => stats.empty += 1,
                Slot::Tombstone => stats.tombstones += 1,
                Slot::Occupied { key, .. } => {
                    stats.live += 1;
                    let probes = ProbeSequence::new(self.hash(key), capacity)
                        .position(|candidate| candidate == index)
                        .map_or(capacity, |position| position + 1);
                    total_probes = total_probes.saturating_add(probes);
                    stats.max_probe_length = stats.max_probe_length.max(probes);
                }
            }
        }

        if stats.live > 0 {
            stats.mean_probe_length = total_probes as f64 / stats.live as f64;
        }
        stats
    }
}

impl ProbeStats {
    /// Fraction of slots holding a live entry
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 { 0.0 } else { self.live as f64 / self.capacity as f64 }
    }
}

impl fmt::Display for ProbeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Slots: {} live, {} deleted, {} empty of {} ({:.2}% occupied)",
            self.live,
            self.tombstones,
            self.empty,
            self.capacity,
            self.occupancy() * 100.0
        )?;
        writeln!(f, "Growth threshold: {}", self.threshold)?;
        write!(f, "Probe length: mean {:.2}, max {}", self.mean_probe_length, self.max_probe_length)
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasherDefault, Hasher};

    use crate::MapConfig;

    use super::*;

    #[derive(Default)]
    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, _bytes: &[u8]) {}

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    fn identity_map(capacity: usize) -> ProbingMap<u64, (), BuildHasherDefault<IdentityHasher>> {
        ProbingMap::with_config_and_hasher(MapConfig::new(capacity, 1.0), BuildHasherDefault::default())
    }

    #[test]
    fn test_empty_map() {
        let map: ProbingMap<u64, ()> = ProbingMap::with_capacity(8);
        let stats = map.probe_stats();
        assert_eq!(stats.capacity, 8);
        assert_eq!(stats.empty, 8);
        assert_eq!(stats.live, 0);
        assert_eq!(stats.max_probe_length, 0);
        assert!(stats.mean_probe_length.abs() < f64::EPSILON);
        assert!(stats.occupancy().abs() < f64::EPSILON);
    }

    #[test]
    fn test_probe_lengths_of_colliding_keys() {
        let mut map = identity_map(10);
        map.put(0, ());
        map.put(10, ());
        map.put(20, ());
        map.put(5, ());

        let stats = map.probe_stats();
        assert_eq!(stats.live, 4);
        assert_eq!(stats.empty, 6);
        assert_eq!(stats.max_probe_length, 3);
        assert!((stats.mean_probe_length - 7.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_tombstones() {
        let mut map = identity_map(10);
        map.put(1, ());
        map.put(2, ());
        map.remove(&1);

        let stats = map.probe_stats();
        assert_eq!(stats.live, 1);
        assert_eq!(stats.tombstones, 1);
        assert_eq!(stats.empty, 8);
        assert_eq!(stats.threshold, 10);
    }

    #[test]
    fn test_display() {
        let mut map = identity_map(4);
        map.put(0, ());
        let report = map.probe_stats().to_string();
        assert!(report.contains("1 live, 0 deleted, 3 empty of 4 (25.00% occupied)"));
        assert!(report.contains("Probe length: mean 1.00, max 1"));
    }
}
