// placement/geometry.rs

use bevy::math::Vec2;
use std::fmt;

/// Which of the two greeting controls a rectangle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// The stationary "yes" control
    Accept,
    /// The control that keeps running away
    Evade,
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlId::Accept => write!(f, "accept"),
            ControlId::Evade => write!(f, "evade"),
        }
    }
}

/// Width/height of the container (placement bounds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }

    /// Zero-sized or not-yet-laid-out bounds can't be sampled
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle in container-relative coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl ControlRect {
    pub fn from_center(center: Vec2, size: Size) -> Self {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        ControlRect {
            left: center.x - half_w,
            top: center.y - half_h,
            right: center.x + half_w,
            bottom: center.y + half_h,
            width: size.width,
            height: size.height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Overlap test with `pad` of slack on every edge.
    ///
    /// Touching edges (gap exactly `pad`) count as intersecting.
    pub fn intersects(&self, other: &ControlRect, pad: f32) -> bool {
        !(self.right + pad < other.left
            || self.left - pad > other.right
            || self.bottom + pad < other.top
            || self.top - pad > other.bottom)
    }
}

/// Why a geometry query could not be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    ContainerUnavailable,
    ControlUnavailable(ControlId),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ContainerUnavailable => write!(f, "container has no measurable size"),
            GeometryError::ControlUnavailable(id) => {
                write!(f, "{} control has not been laid out", id)
            }
        }
    }
}

/// Fresh, uncached view of the rendering layer's geometry.
///
/// Every call re-reads the layout; implementors must not hand back
/// rectangles measured in an earlier frame.
pub trait GeometryProvider {
    fn container_bounds(&self) -> Result<Size, GeometryError>;

    fn control_bounds(&self, id: ControlId) -> Result<ControlRect, GeometryError>;

    /// Viewport is below the narrow breakpoint
    fn narrow_layout(&self) -> bool;
}

/// Clamp that never panics: when `min > max` the lower bound wins.
pub fn clamp(n: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(n))
}

/// Allowed center range `[min, max]` on both axes so a control of `size`
/// stays `pad` away from every container edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterRange {
    pub min: Vec2,
    pub max: Vec2,
}

impl CenterRange {
    pub fn new(container: Size, size: Size, pad: f32) -> Self {
        CenterRange {
            min: Vec2::new(pad + size.width / 2.0, pad + size.height / 2.0),
            max: Vec2::new(
                container.width - pad - size.width / 2.0,
                container.height - pad - size.height / 2.0,
            ),
        }
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(point.x, self.min.x, self.max.x),
            clamp(point.y, self.min.y, self.max.y),
        )
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Interpolate inside the range; `t` components in `[0, 1)`
    pub fn lerp(&self, t: Vec2) -> Vec2 {
        self.clamp(self.min + (self.max - self.min) * t)
    }
}
