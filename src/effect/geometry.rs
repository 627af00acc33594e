//! Unit-square geometry for the shimmer gradient.
//!
//! Points are fractions of the content's bounding box with (0, 0) at the top
//! left. Values outside 0.0-1.0 lie beyond the box edges, which is how the
//! band starts and finishes off-screen.

use serde::Serialize;

/// A point in unit-square coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct UnitPoint {
    pub x: f32,
    pub y: f32,
}

impl UnitPoint {
    pub const TOP_LEFT: Self = Self::new(0.0, 0.0);
    pub const TOP_RIGHT: Self = Self::new(1.0, 0.0);
    pub const BOTTOM_LEFT: Self = Self::new(0.0, 1.0);
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`; `t` is not clamped.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Reading direction of the hosting environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    /// Parses "ltr"/"rtl" (or the long snake_case names).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ltr" | "left_to_right" => Some(Self::LeftToRight),
            "rtl" | "right_to_left" => Some(Self::RightToLeft),
            _ => None,
        }
    }
}

/// Lifecycle phase of one attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    /// Before the content has appeared.
    #[default]
    Initial,
    /// After the appearance notification; never left again.
    Settled,
}

/// Start and end point of the mask gradient axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GradientEndpoints {
    pub start: UnitPoint,
    pub end: UnitPoint,
}

impl GradientEndpoints {
    pub const fn new(start: UnitPoint, end: UnitPoint) -> Self {
        Self { start, end }
    }

    /// Interpolates both points towards `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            start: self.start.lerp(other.start, t),
            end: self.end.lerp(other.end, t),
        }
    }
}

/// Computes the gradient endpoints for a phase and layout direction.
///
/// Left-to-right sweeps from above-left of the content to below-right;
/// right-to-left mirrors the sweep horizontally.
pub fn gradient_endpoints(
    phase: AnimationPhase,
    direction: LayoutDirection,
    band_size: f32,
) -> GradientEndpoints {
    let min = -band_size;
    let max = 1.0 + band_size;

    let (start, end) = match (direction, phase) {
        (LayoutDirection::LeftToRight, AnimationPhase::Initial) => {
            (UnitPoint::new(min, min), UnitPoint::TOP_LEFT)
        }
        (LayoutDirection::LeftToRight, AnimationPhase::Settled) => {
            (UnitPoint::BOTTOM_RIGHT, UnitPoint::new(max, max))
        }
        (LayoutDirection::RightToLeft, AnimationPhase::Initial) => {
            (UnitPoint::new(max, min), UnitPoint::TOP_RIGHT)
        }
        (LayoutDirection::RightToLeft, AnimationPhase::Settled) => {
            (UnitPoint::BOTTOM_LEFT, UnitPoint::new(min, max))
        }
    };

    GradientEndpoints::new(start, end)
}
