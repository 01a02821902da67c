//! QR raster generation
//!
//! Encoding is delegated to `qrcode`; the module matrix is painted into a
//! grayscale image here so that scale and quiet zone are fixed parameters
//! and the output is deterministic for identical input.

use crate::constants::{DEFAULT_BORDER_MODULES, DEFAULT_MODULE_PX, MAX_RASTER_SIDE_PX};
use crate::types::{QrError, Result};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

/// Error-correction level of the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// Fixed encoding parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QrStyle {
    pub error_correction: ErrorCorrection,
    /// Pixels per module
    pub module_px: u32,
    /// Quiet zone, in modules
    pub border_modules: u32,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::M,
            module_px: DEFAULT_MODULE_PX,
            border_modules: DEFAULT_BORDER_MODULES,
        }
    }
}

/// Square black-on-white raster of a QR symbol
#[derive(Debug, Clone, PartialEq)]
pub struct QrRaster {
    image: GrayImage,
    modules: u32,
}

impl QrRaster {
    /// Side length in pixels
    pub fn side_px(&self) -> u32 {
        self.image.width()
    }

    /// Symbol width in modules, without the quiet zone
    pub fn modules(&self) -> u32 {
        self.modules
    }

    /// 8-bit gray samples, row-major from the top-left pixel
    pub fn as_gray_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// PNG encoding of the raster
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| QrError::Config(format!("Failed to encode QR image: {}", e)))?;
        Ok(buf.into_inner())
    }
}

/// Encode `text` as a QR symbol and paint it as a raster.
pub fn generate_qr_raster(text: &str, style: &QrStyle) -> Result<QrRaster> {
    if style.module_px == 0 {
        return Err(QrError::Config(
            "QR module size must be at least 1 pixel".to_string(),
        ));
    }

    let code = QrCode::with_error_correction_level(text.as_bytes(), style.error_correction.into())?;
    let modules = code.width() as u32;
    let colors = code.to_colors();

    let scale = style.module_px;
    let side_px = raster_side_px(modules, style)?;
    let border_px = style.border_modules * scale;

    let mut image = GrayImage::from_pixel(side_px, side_px, Luma([255u8]));

    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = (i as u32) % modules;
        let my = (i as u32) / modules;
        let x0 = border_px + mx * scale;
        let y0 = border_px + my * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                image.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
            }
        }
    }

    Ok(QrRaster { image, modules })
}

/// `(modules + 2 * border) * module_px`, bounded by [`MAX_RASTER_SIDE_PX`]
fn raster_side_px(modules: u32, style: &QrStyle) -> Result<u32> {
    let side_px = style
        .border_modules
        .checked_mul(2)
        .and_then(|border| border.checked_add(modules))
        .and_then(|total| total.checked_mul(style.module_px))
        .filter(|&side| side <= MAX_RASTER_SIDE_PX);

    side_px.ok_or_else(|| {
        QrError::Config(format!(
            "QR raster of {} modules at {} px per module with a {}-module border exceeds {} px",
            modules, style.module_px, style.border_modules, MAX_RASTER_SIDE_PX
        ))
    })
}
