/// Fast 2D math using SIMD-accelerated `glam` types.
///
/// Pointer deltas, scroll offsets and translations are all plain [`Vec2`]s.
///
/// # Examples
///
/// ```
/// use sortable_core::math::Vec2;
///
/// let start = Vec2::new(10.0, 20.0);
/// let now = Vec2::new(14.0, 50.0);
/// assert_eq!(now - start, Vec2::new(4.0, 30.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::{Vec2, vec2};
}

pub use fast::*;
