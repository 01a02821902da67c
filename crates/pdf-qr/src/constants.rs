//! Shared constants for QR placement
//!
//! This module centralizes the unit factors, reference paper sizes and
//! default parameters used throughout the pipeline.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch (the PDF user-space unit is 1/72 inch)
pub const PT_PER_INCH: f64 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Points per millimeter (≈ 2.83465)
pub const POINTS_PER_MM: f64 = PT_PER_INCH / MM_PER_INCH;

/// Points per centimeter (≈ 28.3465)
pub const POINTS_PER_CM: f64 = PT_PER_INCH / CM_PER_INCH;

// =============================================================================
// Reference Paper Sizes (portrait, points)
// =============================================================================

/// A4: 210 × 297 mm
pub const A4_DIMENSIONS_PT: (f64, f64) = (595.275590551, 841.88976378);

/// US Letter: 8.5 × 11 in
pub const LETTER_DIMENSIONS_PT: (f64, f64) = (612.0, 792.0);

// =============================================================================
// Validation
// =============================================================================

/// Default tolerance when comparing page sizes against references (points)
pub const DEFAULT_TOLERANCE_PT: f64 = 3.0;

// =============================================================================
// QR Raster
// =============================================================================

/// Pixels per QR module
pub const DEFAULT_MODULE_PX: u32 = 10;

/// Quiet zone around the symbol, in modules
pub const DEFAULT_BORDER_MODULES: u32 = 2;

/// Largest raster side accepted, in pixels
pub const MAX_RASTER_SIDE_PX: u32 = 4096;

/// Resource name of the QR image inside the overlay page
pub const QR_IMAGE_NAME: &str = "Qr";

/// Prefix for the overlay form XObject registered on the target page
pub const OVERLAY_XOBJECT_PREFIX: &str = "QrOverlay";
