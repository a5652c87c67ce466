//! Test utilities for the sortable drag-reflow engine.
//!
//! This crate provides a recording, flow-layout implementation of
//! [`LayoutHost`](sortable_dnd::LayoutHost) so engine behavior can be tested
//! without a real view layer.
//!
//! # Overview
//!
//! - `MockLayoutHost` - containers with explicit frames whose children stack
//!   along the container axis (requires `mock` feature)
//! - `HostCall` - every read and write the engine issued, in order
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use sortable_core::geometry::{Axis, Rect, Size};
//! use sortable_dnd::LayoutHost;
//! use sortable_test_utils::MockLayoutHost;
//!
//! let mut host = MockLayoutHost::new();
//! let column = host.add_container(Rect::new(0.0, 100.0, 200.0, 400.0), Axis::Vertical);
//! let a = host.add_item(column, Size::new(200.0, 40.0));
//! let b = host.add_item(column, Size::new(200.0, 40.0));
//!
//! assert_eq!(host.bounding_rect(b), Rect::new(0.0, 140.0, 200.0, 40.0));
//! assert_eq!(host.count_rect_reads(), 1);
//! # let _ = a;
//! # }
//! ```
//!
//! # Design
//!
//! Reads take `&self` but still have to be recorded, so the call log lives in
//! a `parking_lot::Mutex`. Node state itself is only touched by the `&mut self`
//! write methods.

#[cfg(feature = "mock")]
pub mod mock_host;

#[cfg(feature = "mock")]
pub use mock_host::{HostCall, MockLayoutHost};
