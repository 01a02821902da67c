//! Paper size classification against the supported standards

use crate::constants::{A4_DIMENSIONS_PT, LETTER_DIMENSIONS_PT};
use crate::types::{QrError, Result};
use std::fmt;

/// Reference paper sizes, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperStandard {
    A4,
    Letter,
}

impl PaperStandard {
    /// All standards in declared (matching) order
    pub const ALL: [PaperStandard; 2] = [PaperStandard::A4, PaperStandard::Letter];

    /// Reference dimensions in portrait orientation (width < height)
    pub fn dimensions_pt(self) -> (f64, f64) {
        match self {
            PaperStandard::A4 => A4_DIMENSIONS_PT,
            PaperStandard::Letter => LETTER_DIMENSIONS_PT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperStandard::A4 => "A4",
            PaperStandard::Letter => "LETTER",
        }
    }
}

impl fmt::Display for PaperStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of comparing a width/height pair with the references.
///
/// `rotated` means the compared axes were swapped relative to the standard's
/// portrait orientation. It says nothing about the page's `/Rotate` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Standard {
        standard: PaperStandard,
        rotated: bool,
    },
    Unrecognized,
}

impl Classification {
    pub fn standard(self) -> Option<PaperStandard> {
        match self {
            Classification::Standard { standard, .. } => Some(standard),
            Classification::Unrecognized => None,
        }
    }

    pub fn is_rotated(self) -> bool {
        matches!(self, Classification::Standard { rotated: true, .. })
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Classification::Unrecognized)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Standard {
                standard,
                rotated: false,
            } => write!(f, "{}", standard),
            Classification::Standard {
                standard,
                rotated: true,
            } => write!(f, "{}(rotated)", standard),
            Classification::Unrecognized => f.write_str("unrecognized"),
        }
    }
}

#[inline]
fn close(a: f64, b: f64, tolerance_pt: f64) -> bool {
    (a - b).abs() <= tolerance_pt
}

/// Tolerances must be finite and non-negative; zero means exact equality
pub fn check_tolerance(tolerance_pt: f64) -> Result<()> {
    if !tolerance_pt.is_finite() || tolerance_pt < 0.0 {
        return Err(QrError::Config(format!(
            "Tolerance must be a non-negative number of points, got {}",
            tolerance_pt
        )));
    }
    Ok(())
}

/// Classify a page size against A4 and LETTER.
///
/// Each standard is tried as-is, then with its axes swapped; the first match
/// wins. An invalid tolerance is rejected by [`check_tolerance`].
pub fn classify(width_pt: f64, height_pt: f64, tolerance_pt: f64) -> Result<Classification> {
    check_tolerance(tolerance_pt)?;
    let tol = tolerance_pt;

    for standard in PaperStandard::ALL {
        let (ref_w, ref_h) = standard.dimensions_pt();
        if close(width_pt, ref_w, tol) && close(height_pt, ref_h, tol) {
            return Ok(Classification::Standard {
                standard,
                rotated: false,
            });
        }
        if close(width_pt, ref_h, tol) && close(height_pt, ref_w, tol) {
            return Ok(Classification::Standard {
                standard,
                rotated: true,
            });
        }
    }

    Ok(Classification::Unrecognized)
}
