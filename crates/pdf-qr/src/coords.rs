//! Visual (top-left origin) and native (bottom-left origin) positions
//!
//! Front-ends that let users pick a spot "as seen on screen" hold a
//! [`VisualPosition`]. The core only accepts a [`NativePosition`]; the single
//! way across is [`VisualPosition::to_native`].

use crate::units::{Measurement, Unit};

/// Lower-left corner of the QR square in PDF user space (origin at the
/// bottom-left, Y growing upward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativePosition {
    pub x: Measurement,
    pub y: Measurement,
}

impl NativePosition {
    pub fn new(x: Measurement, y: Measurement) -> Self {
        Self { x, y }
    }

    /// Both coordinates given in the same unit
    pub fn in_unit(x: f64, y: f64, unit: Unit) -> Self {
        Self::new(Measurement::new(x, unit), Measurement::new(y, unit))
    }

    pub fn to_points(&self) -> (f64, f64) {
        (self.x.to_points(), self.y.to_points())
    }
}

/// Top-left corner of the QR square as seen on screen (origin at the
/// top-left, Y growing downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualPosition {
    pub x: Measurement,
    pub y: Measurement,
}

impl VisualPosition {
    pub fn new(x: Measurement, y: Measurement) -> Self {
        Self { x, y }
    }

    pub fn in_unit(x: f64, y: f64, unit: Unit) -> Self {
        Self::new(Measurement::new(x, unit), Measurement::new(y, unit))
    }

    /// Flip onto the native axis: `y_native = page_height - y_visual - side`.
    ///
    /// `page_height_pt` is the height the user was looking at. The result is
    /// expressed in points.
    pub fn to_native(&self, page_height_pt: f64, side: Measurement) -> NativePosition {
        let x_pt = self.x.to_points();
        let y_top_pt = self.y.to_points();
        let y_bottom_pt = page_height_pt - y_top_pt - side.to_points();
        NativePosition::new(Measurement::pt(x_pt), Measurement::pt(y_bottom_pt))
    }
}
