//! Construction parameters for [`ProbingMap`](crate::ProbingMap)
//!
//! Out-of-range parameters are never rejected. Each one is replaced by its
//! default independently, so every combination of inputs yields a usable map.

use crate::probe::GAP;

/// Capacity used when the requested capacity is zero
pub const DEFAULT_CAPACITY: usize = 1000;

/// Load factor used when the requested load factor lies outside `(0, 1]`
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

/// Normalized capacity and load factor of a map
///
/// ```rust
/// use probing_map::MapConfig;
///
/// let config = MapConfig::new(0, 1.5);
/// assert_eq!(config.capacity(), 1000);
/// assert!((config.load_factor() - 0.5).abs() < f64::EPSILON);
/// assert_eq!(config.threshold(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Number of slots in the initial store
    capacity: usize,
    /// Ratio of live entries to slots at which the store doubles
    load_factor: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, load_factor: DEFAULT_LOAD_FACTOR }
    }
}

impl MapConfig {
    /// Creates a configuration, substituting defaults for invalid values
    #[must_use]
    pub fn new(capacity: usize, load_factor: f64) -> Self {
        Self { capacity: normalize_capacity(capacity), load_factor: normalize_load_factor(load_factor) }
    }

    /// Replaces the capacity, keeping the load factor
    #[must_use]
    pub fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity: normalize_capacity(capacity), ..self }
    }

    /// Replaces the load factor, keeping the capacity
    #[must_use]
    pub fn with_load_factor(self, load_factor: f64) -> Self {
        Self { load_factor: normalize_load_factor(load_factor), ..self }
    }

    /// Returns the initial number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the load factor, always in `(0, 1]`
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the live-entry count that triggers growth of the initial store
    #[must_use]
    pub fn threshold(&self) -> usize {
        threshold_for(self.load_factor, self.capacity)
    }
}

/// Computes `floor(load_factor * capacity)`
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]
pub fn threshold_for(load_factor: f64, capacity: usize) -> usize {
    (load_factor * capacity as f64).floor() as usize
}

/// Maps zero to the default and steps off multiples of [`GAP`]
#[allow(clippy::arithmetic_side_effects)]
fn normalize_capacity(capacity: usize) -> usize {
    let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
    // A multiple of GAP would make the probe step revisit a strict subset of slots.
    if capacity % GAP == 0 { capacity.saturating_add(1) } else { capacity }
}

/// Maps anything outside `(0, 1]`, NaN included, to the default
fn normalize_load_factor(load_factor: f64) -> f64 {
    if load_factor > 0.0 && load_factor <= 1.0 { load_factor } else { DEFAULT_LOAD_FACTOR }
}
