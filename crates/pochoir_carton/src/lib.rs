//! Carton - The artist's toolbox for Pochoir.
//!
//! This crate provides the small shared utilities every other Pochoir crate
//! reaches for: fast hash maps, compact strings, stack-optimized vectors and
//! a handful of string helpers used by the observer and the template compiler.
//!
//! # Example
//!
//! ```
//! use pochoir_carton::{split_path, FxHashMap, String};
//!
//! let mut map: FxHashMap<String, u32> = FxHashMap::default();
//! map.insert(String::from("count"), 1);
//! assert_eq!(map.len(), 1);
//!
//! let segments = split_path(" user.name ");
//! assert_eq!(segments.as_slice(), &["user", "name"]);
//! ```

pub mod general;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;
pub use compact_str::CompactString as String;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

pub use general::*;
