//! Sortable Core
//!
//! Value types and ambient utilities shared by the sortable drag-reflow engine:
//! geometry, identifiers, hash collections, logging and profiling hooks.

pub mod alloc;
pub mod geometry;
pub mod id;
pub mod logging;
pub mod math;
pub mod profiling;
