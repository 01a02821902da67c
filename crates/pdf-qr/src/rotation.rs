//! Page `/Rotate` handling

use std::fmt;

/// Canonical display rotation of a page, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Whether viewers show this page with width and height exchanged
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }

    pub fn is_rotated(self) -> bool {
        self != Rotation::None
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Resolve a raw `/Rotate` value to one of 0/90/180/270.
///
/// Values off a 90° boundary snap to the nearest multiple of 90, with halves
/// rounding to the even multiple (45 -> 0, 135 -> 180).
pub fn resolve_rotation(raw: i64) -> Rotation {
    let normalized = raw.rem_euclid(360);
    let snapped = if normalized % 90 == 0 {
        normalized
    } else {
        let quarter_turns = (normalized as f64 / 90.0).round_ties_even() as i64;
        (quarter_turns * 90).rem_euclid(360)
    };

    match snapped {
        90 => Rotation::Clockwise90,
        180 => Rotation::Clockwise180,
        270 => Rotation::Clockwise270,
        _ => Rotation::None,
    }
}

/// Width and height as a viewer displays them
pub fn visible_dimensions(width_pt: f64, height_pt: f64, rotation: Rotation) -> (f64, f64) {
    if rotation.swaps_axes() {
        (height_pt, width_pt)
    } else {
        (width_pt, height_pt)
    }
}
