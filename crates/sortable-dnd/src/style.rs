//! Typed inline style declarations written during a drag.
//!
//! The engine only ever writes a small, fixed vocabulary of drag-only
//! properties. Keeping them typed lets hosts translate them however they like
//! (CSS text for a DOM, field writes for a retained tree) and lets tests assert
//! on exact values.

use crate::host::{LayoutHost, NodeHandle, PositionKind};
use bitflags::bitflags;
use indexmap::IndexMap;
use sortable_core::math::Vec2;
use std::fmt;
use std::time::Duration;

bitflags! {
    /// Properties covered by a [`Transition`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TransitionProperty: u8 {
        const TRANSFORM = 1 << 0;
        const TOP = 1 << 1;
        const LEFT = 1 << 2;
        const MAX_WIDTH = 1 << 3;
        const MAX_HEIGHT = 1 << 4;
    }
}

impl TransitionProperty {
    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            (Self::TRANSFORM, "transform"),
            (Self::TOP, "top"),
            (Self::LEFT, "left"),
            (Self::MAX_WIDTH, "max-width"),
            (Self::MAX_HEIGHT, "max-height"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }
}

/// Transition timing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimingFunction {
    /// Linear interpolation
    Linear,
    /// Slow start and end, fast middle
    Ease,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Slow start and end
    #[default]
    EaseInOut,
}

impl TimingFunction {
    /// Apply the timing function to a normalized time value (0.0 to 1.0).
    ///
    /// Hosts without a native transition engine can sample this per frame.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            TimingFunction::Linear => t,
            TimingFunction::Ease => {
                // Cubic approximation of cubic-bezier(0.25, 0.1, 0.25, 1.0)
                let inv = 1.0 - t;
                3.0 * inv * inv * t * 0.1 + 3.0 * inv * t * t + t * t * t
            }
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            TimingFunction::Linear => "linear",
            TimingFunction::Ease => "ease",
            TimingFunction::EaseIn => "ease-in",
            TimingFunction::EaseOut => "ease-out",
            TimingFunction::EaseInOut => "ease-in-out",
        }
    }
}

/// A transition over a set of properties sharing one duration and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub properties: TransitionProperty,
    pub duration: Duration,
    pub timing: TimingFunction,
}

impl Transition {
    pub fn new(properties: TransitionProperty, duration: Duration, timing: TimingFunction) -> Self {
        Self {
            properties,
            duration,
            timing,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.duration.as_millis();
        for (i, name) in self.properties.names().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}ms {}", name, ms, self.timing.as_css())?;
        }
        Ok(())
    }
}

/// Key of an inline style declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Position,
    Top,
    Left,
    ZIndex,
    Width,
    Height,
    MaxWidth,
    MaxHeight,
    Flex,
    Transform,
    TransformOrigin,
    Transition,
}

impl StyleKey {
    pub fn as_css(&self) -> &'static str {
        match self {
            StyleKey::Position => "position",
            StyleKey::Top => "top",
            StyleKey::Left => "left",
            StyleKey::ZIndex => "z-index",
            StyleKey::Width => "width",
            StyleKey::Height => "height",
            StyleKey::MaxWidth => "max-width",
            StyleKey::MaxHeight => "max-height",
            StyleKey::Flex => "flex",
            StyleKey::Transform => "transform",
            StyleKey::TransformOrigin => "transform-origin",
            StyleKey::Transition => "transition",
        }
    }
}

/// One inline style declaration with its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleProp {
    Position(PositionKind),
    Top(f32),
    Left(f32),
    ZIndex(i32),
    Width(f32),
    Height(f32),
    MaxWidth(f32),
    MaxHeight(f32),
    /// `flex: 0 0 auto`; the node neither grows nor shrinks.
    FlexNone,
    /// Translation in pixels.
    Transform(Vec2),
    TransformOrigin(Vec2),
    /// `None` renders as `transition: none`.
    Transition(Option<Transition>),
}

impl StyleProp {
    pub fn key(&self) -> StyleKey {
        match self {
            StyleProp::Position(_) => StyleKey::Position,
            StyleProp::Top(_) => StyleKey::Top,
            StyleProp::Left(_) => StyleKey::Left,
            StyleProp::ZIndex(_) => StyleKey::ZIndex,
            StyleProp::Width(_) => StyleKey::Width,
            StyleProp::Height(_) => StyleKey::Height,
            StyleProp::MaxWidth(_) => StyleKey::MaxWidth,
            StyleProp::MaxHeight(_) => StyleKey::MaxHeight,
            StyleProp::FlexNone => StyleKey::Flex,
            StyleProp::Transform(_) => StyleKey::Transform,
            StyleProp::TransformOrigin(_) => StyleKey::TransformOrigin,
            StyleProp::Transition(_) => StyleKey::Transition,
        }
    }
}

impl fmt::Display for StyleProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.key().as_css())?;
        match self {
            StyleProp::Position(p) => f.write_str(p.as_str()),
            StyleProp::Top(v)
            | StyleProp::Left(v)
            | StyleProp::Width(v)
            | StyleProp::Height(v)
            | StyleProp::MaxWidth(v)
            | StyleProp::MaxHeight(v) => write!(f, "{}px", v),
            StyleProp::ZIndex(z) => write!(f, "{}", z),
            StyleProp::FlexNone => f.write_str("0 0 auto"),
            StyleProp::Transform(t) => write!(f, "translate3d({}px, {}px, 0px)", t.x, t.y),
            StyleProp::TransformOrigin(o) => write!(f, "{}px {}px", o.x, o.y),
            StyleProp::Transition(Some(t)) => write!(f, "{}", t),
            StyleProp::Transition(None) => f.write_str("none"),
        }
    }
}

/// Ordered set of inline declarations on one node.
///
/// Hosts that keep styles as data (and the mock host) store one of these per
/// node; re-setting a property keeps its place, like the CSSOM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: IndexMap<StyleKey, StyleProp>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, prop: StyleProp) {
        self.declarations.insert(prop.key(), prop);
    }

    pub fn remove(&mut self, key: StyleKey) -> Option<StyleProp> {
        self.declarations.shift_remove(&key)
    }

    pub fn get(&self, key: StyleKey) -> Option<&StyleProp> {
        self.declarations.get(&key)
    }

    pub fn contains(&self, key: StyleKey) -> bool {
        self.declarations.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProp> {
        self.declarations.values()
    }

    /// Current translation, if a transform is set.
    pub fn transform(&self) -> Option<Vec2> {
        match self.get(StyleKey::Transform) {
            Some(StyleProp::Transform(t)) => Some(*t),
            _ => None,
        }
    }

    /// Value of a length property (`top`, `width`, `max-height`, ...).
    pub fn length(&self, key: StyleKey) -> Option<f32> {
        match self.get(key)? {
            StyleProp::Top(v)
            | StyleProp::Left(v)
            | StyleProp::Width(v)
            | StyleProp::Height(v)
            | StyleProp::MaxWidth(v)
            | StyleProp::MaxHeight(v) => Some(*v),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<PositionKind> {
        match self.get(StyleKey::Position) {
            Some(StyleProp::Position(p)) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, prop) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{};", prop)?;
        }
        Ok(())
    }
}

/// Styles applied to the lifted node for the duration of a drag.
pub const LIFTED_STYLE_KEYS: &[StyleKey] = &[
    StyleKey::Position,
    StyleKey::Top,
    StyleKey::Left,
    StyleKey::ZIndex,
    StyleKey::Width,
    StyleKey::Height,
    StyleKey::Transform,
    StyleKey::Transition,
    StyleKey::TransformOrigin,
];

/// Styles applied to displaced siblings.
pub const DISPLACEMENT_STYLE_KEYS: &[StyleKey] = &[StyleKey::Transition, StyleKey::Transform];

pub(crate) fn set_styles(
    host: &mut dyn LayoutHost,
    node: NodeHandle,
    props: impl IntoIterator<Item = StyleProp>,
) {
    for prop in props {
        host.set_style(node, prop);
    }
}

pub(crate) fn remove_styles(host: &mut dyn LayoutHost, node: NodeHandle, keys: &[StyleKey]) {
    for key in keys {
        host.remove_style(node, *key);
    }
}
