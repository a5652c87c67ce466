//! Profiling hooks based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the macros expand to nothing, so call
//! sites never need their own `cfg` attributes.

#[cfg(feature = "profiling")]
pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Turn puffin scope collection on or off.
#[cfg(feature = "profiling")]
pub fn set_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
    tracing::info!("Puffin scopes {}", if enabled { "enabled" } else { "disabled" });
}

/// Mark the start of a new frame for profiling.
///
/// `DragDropContext::update` calls this before running its tasks.
#[cfg(feature = "profiling")]
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __sortable_profile_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::__sortable_profile_noop as profile_function;
#[cfg(not(feature = "profiling"))]
pub use crate::__sortable_profile_noop as profile_scope;

#[cfg(not(feature = "profiling"))]
pub fn set_enabled(_enabled: bool) {}

#[cfg(not(feature = "profiling"))]
#[inline]
pub fn new_frame() {}
