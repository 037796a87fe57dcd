#![forbid(unsafe_code)]

//! Renderer-provided slider geometry.
//!
//! The models never lay anything out themselves. The host renderer describes
//! the groove and handle rectangles through [`SliderGeometry`]; the
//! interaction controller only ever reads them. [`LinearGeometry`] is a
//! stock implementation for a straight groove with fixed-size handles.

use slidekit_core::geometry::{Point, Rect};

use crate::mapper;

/// Axis the slider travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Coordinate of `point` along this axis.
    #[inline]
    #[must_use]
    pub const fn pick(self, point: Point) -> i32 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Leading edge of `rect` along this axis.
    #[inline]
    #[must_use]
    pub const fn pick_start(self, rect: &Rect) -> i32 {
        match self {
            Self::Horizontal => rect.x,
            Self::Vertical => rect.y,
        }
    }

    /// Extent of `rect` along this axis.
    #[inline]
    #[must_use]
    pub const fn pick_len(self, rect: &Rect) -> i32 {
        match self {
            Self::Horizontal => rect.width,
            Self::Vertical => rect.height,
        }
    }
}

/// Geometry queries the interaction controller needs from the renderer.
pub trait SliderGeometry {
    /// Axis of travel.
    fn orientation(&self) -> Orientation;

    /// Bounds of the groove the handles travel in.
    fn groove_rect(&self) -> Rect;

    /// Bounds of a handle sitting at `value` in `[minimum, maximum]`.
    fn handle_rect(&self, value: f64, minimum: f64, maximum: f64) -> Rect;

    /// Whether the maximum sits at the leading (left/top) edge.
    fn upside_down(&self) -> bool;

    /// Handle extent along the axis of travel.
    fn handle_length(&self) -> i32 {
        self.orientation()
            .pick_len(&self.handle_rect(0.0, 0.0, 1.0))
    }

    /// Pixels the handle's leading edge can travel.
    fn span(&self) -> i32 {
        let orientation = self.orientation();
        (orientation.pick_len(&self.groove_rect()) - self.handle_length()).max(0)
    }

    /// Value whose handle leading edge sits at `pixel` (an absolute
    /// coordinate along the axis).
    fn value_at(&self, pixel: i32, minimum: f64, maximum: f64) -> f64 {
        let start = self.orientation().pick_start(&self.groove_rect());
        mapper::pixel_to_value(
            f64::from(pixel.saturating_sub(start)),
            f64::from(self.span()),
            minimum,
            maximum,
            self.upside_down(),
        )
    }
}

/// A straight groove with fixed-size handles.
///
/// Handles are `handle_length` pixels long along the axis and centered
/// across it. A horizontal slider is upside down when its appearance is
/// inverted; a vertical one is upside down unless it is, so that by
/// default the maximum sits on the right or at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearGeometry {
    orientation: Orientation,
    groove: Rect,
    handle_length: i32,
    handle_thickness: Option<i32>,
    inverted_appearance: bool,
}

impl LinearGeometry {
    /// A horizontal groove.
    #[must_use]
    pub fn horizontal(groove: Rect, handle_length: i32) -> Self {
        Self::new(Orientation::Horizontal, groove, handle_length)
    }

    /// A vertical groove.
    #[must_use]
    pub fn vertical(groove: Rect, handle_length: i32) -> Self {
        Self::new(Orientation::Vertical, groove, handle_length)
    }

    /// A groove along `orientation`.
    #[must_use]
    pub fn new(orientation: Orientation, groove: Rect, handle_length: i32) -> Self {
        Self {
            orientation,
            groove,
            handle_length: handle_length.max(0),
            handle_thickness: None,
            inverted_appearance: false,
        }
    }

    /// Set the handle size across the axis. Defaults to the groove's.
    #[must_use]
    pub fn with_handle_thickness(mut self, thickness: i32) -> Self {
        self.handle_thickness = Some(thickness.max(0));
        self
    }

    /// Flip which end of the groove shows the maximum.
    #[must_use]
    pub fn with_inverted_appearance(mut self, inverted: bool) -> Self {
        self.inverted_appearance = inverted;
        self
    }

    /// Whether the appearance is inverted.
    #[must_use]
    pub fn inverted_appearance(&self) -> bool {
        self.inverted_appearance
    }

    /// Replace the groove bounds (for example after a resize).
    pub fn set_groove(&mut self, groove: Rect) {
        self.groove = groove;
    }
}

impl SliderGeometry for LinearGeometry {
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn groove_rect(&self) -> Rect {
        self.groove
    }

    fn handle_rect(&self, value: f64, minimum: f64, maximum: f64) -> Rect {
        let span = f64::from(self.span());
        let offset =
            mapper::value_to_pixel(value, minimum, maximum, span, self.upside_down()).round() as i32;
        let g = self.groove;
        match self.orientation {
            Orientation::Horizontal => {
                let thickness = self.handle_thickness.unwrap_or(g.height);
                Rect::new(
                    g.x + offset,
                    g.y + (g.height - thickness) / 2,
                    self.handle_length,
                    thickness,
                )
            }
            Orientation::Vertical => {
                let thickness = self.handle_thickness.unwrap_or(g.width);
                Rect::new(
                    g.x + (g.width - thickness) / 2,
                    g.y + offset,
                    thickness,
                    self.handle_length,
                )
            }
        }
    }

    fn upside_down(&self) -> bool {
        match self.orientation {
            Orientation::Horizontal => self.inverted_appearance,
            Orientation::Vertical => !self.inverted_appearance,
        }
    }

    fn handle_length(&self) -> i32 {
        self.handle_length
    }
}
