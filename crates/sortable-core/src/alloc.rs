//! Hash collections for engine bookkeeping.
//!
//! Re-exports of AHash-backed collections; keys in this workspace are small
//! integer ids, where AHash beats SipHash comfortably.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
