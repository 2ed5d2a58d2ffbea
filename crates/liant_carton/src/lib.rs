//! Carton - The binder's toolbox for Liant.
//!
//! This crate provides the small shared utilities and collection types used across
//! the Liant crates, much like a carton holds the tools a bookbinder reaches for on
//! every job.
//!
//! # Modules
//!
//! - **Collections**: fast hash maps, compact strings and stack-optimized vectors
//! - **Tokens**: helpers for array-index reference tokens shared by paths and trees
//!
//! # Example
//!
//! ```
//! use liant_carton::{parse_array_index, FxHashMap, SmallVec};
//!
//! let mut depth: FxHashMap<u64, usize> = FxHashMap::default();
//! depth.insert(7, 2);
//! assert_eq!(depth.get(&7), Some(&2));
//!
//! let tokens: SmallVec<[&str; 4]> = SmallVec::from_slice(&["users", "0"]);
//! assert_eq!(parse_array_index(tokens[1]), Some(0));
//! ```

pub mod token;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;
pub use compact_str::ToCompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

pub use token::*;
