//! # Probing Map
//!
//! A Rust implementation of an open addressing hash map with a fixed probe step.
//!
//! Every entry lives directly in a single backing store. A key starts at its
//! home slot `hash mod capacity` and collisions step forward by the prime
//! [`GAP`] with wrap-around. Removal leaves a tombstone so lookups for other
//! keys keep walking past it, and inserts reuse tombstones. When the number of
//! live entries reaches `floor(load_factor * capacity)` the store doubles and
//! the live entries are reinserted, discarding all tombstones.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probing_map::ProbingMap;
//!
//! // Create a new map with the default capacity and load factor
//! let mut map = ProbingMap::new();
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values, getting the old one back
//! assert_eq!(map.put("apple".to_string(), 10), Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(map.remove("apple"), Some(10));
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.size(), 1);
//! ```
//!
//! ## Configuration
//!
//! Capacity and load factor are both optional. Values out of range fall back
//! to the defaults instead of failing.
//!
//! ```rust
//! use probing_map::ProbingMap;
//!
//! let mut map = ProbingMap::with_capacity_and_load_factor(4, 0.5);
//! assert_eq!(map.threshold(), 2);
//!
//! map.put(1, "one");
//! map.put(2, "two");
//! map.put(3, "three");
//! assert_eq!(map.capacity(), 8);
//!
//! let lenient: ProbingMap<u8, u8> = ProbingMap::with_capacity_and_load_factor(0, 4.0);
//! assert_eq!(lenient.capacity(), 1000);
//! assert_eq!(lenient.threshold(), 500);
//! ```

/// Construction parameters and their normalization
mod config;
/// The fixed-step probe sequence
mod probe;
/// The open addressing map itself
mod probing_map;
/// Tri-state slots of the backing store
mod slot;
/// Probe-length statistics for diagnostics
mod stats;

pub use config::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MapConfig};
pub use probe::GAP;
pub use probing_map::{DefaultHashBuilder, Iter, Keys, ProbingMap, Values};
pub use stats::ProbeStats;
