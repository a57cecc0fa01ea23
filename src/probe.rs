//! Fixed-step probe sequence over the slots of a store

/// Distance between consecutive probes.
///
/// Prime, so it is coprime with every capacity that is not a multiple of it.
/// Construction never yields such a capacity and doubling never creates one,
/// which makes every probe sequence a permutation of the store's indices.
pub const GAP: usize = 307;

/// Returns the slot a key with the given hash is probed from first
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
pub(crate) fn home_slot(hash: u64, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    // The remainder is below `capacity`, so it fits back into `usize`.
    (hash % capacity as u64) as usize
}

/// Iterator over the slot indices visited for one key.
///
/// Yields exactly `capacity` indices and then stops, so a walk over a store
/// with no empty slot ends instead of cycling.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSequence {
    /// Next index to yield
    index: usize,
    /// `GAP` reduced modulo the capacity
    step: usize,
    /// Number of slots in the store
    capacity: usize,
    /// Indices still to be yielded
    remaining: usize,
}

impl ProbeSequence {
    /// Starts a sequence at the home slot of `hash`
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        let step = if capacity == 0 { 0 } else { GAP % capacity };
        Self { index: home_slot(hash, capacity), step, capacity, remaining: capacity }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.index;
        // `index + step` may not fit in `usize` for huge stores, so wrap first.
        let until_wrap = self.capacity - self.step;
        self.index = if current >= until_wrap { current - until_wrap } else { current + self.step };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
