//! Paper-size and rotation validation across pages

use crate::diagnostics::Diagnostics;
use crate::geometry::{PageGeometry, page_geometry};
use crate::options::PaperValidation;
use crate::paper::{Classification, classify};
use crate::types::*;
use lopdf::Document;

/// Classification of a single page under a given dimension mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCheck {
    /// 1-based page number
    pub page: usize,
    pub geometry: PageGeometry,
    /// Width/height that were compared against the references
    pub checked_dimensions: (f64, f64),
    pub classification: Classification,
}

/// Classify one page without emitting diagnostics
pub fn check_page(
    doc: &Document,
    page: usize,
    tolerance_pt: f64,
    paper_dim_mode: PaperDimMode,
) -> Result<PageCheck> {
    let page_id = crate::geometry::page_id(doc, page)?;
    let geometry = page_geometry(doc, page_id)?;

    let checked_dimensions = match paper_dim_mode {
        PaperDimMode::Visible => geometry.visible_dimensions(),
        PaperDimMode::Mediabox => geometry.mediabox_dimensions(),
    };
    let classification = classify(checked_dimensions.0, checked_dimensions.1, tolerance_pt)?;

    Ok(PageCheck {
        page,
        geometry,
        checked_dimensions,
        classification,
    })
}

/// Validate the pages in scope, in page order.
///
/// Pushes a warning for every rotated page, an info line for every
/// recognized page and a warning for every unrecognized one. With
/// [`PaperCheck::Strict`] the first unrecognized page aborts with
/// [`QrError::PaperMismatch`].
pub fn validate_pages(
    doc: &Document,
    target_page: usize,
    settings: &PaperValidation,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    settings.validate()?;

    let page_count = doc.get_pages().len();
    let pages: Vec<usize> = match settings.page_scope {
        PageScope::AllPages => (1..=page_count).collect(),
        PageScope::TargetPage => vec![target_page],
    };

    for page in pages {
        let check = check_page(doc, page, settings.tolerance_pt, settings.paper_dim_mode)?;
        let (w_chk, h_chk) = check.checked_dimensions;
        let (w_mb, h_mb) = check.geometry.mediabox_dimensions();
        let rotation = check.geometry.rotation;

        if rotation.is_rotated() {
            diagnostics.warning(
                page,
                format!(
                    "/Rotate={}. The origin (0,0) and the visual orientation may not match \
                     your intuition if you take coordinates as seen on screen.",
                    rotation
                ),
            );
        }

        match check.classification {
            Classification::Unrecognized => {
                let message = format!(
                    "checked size {:.2} x {:.2} pt (MediaBox {:.2} x {:.2} pt, Rotate {}, mode={}) \
                     matches neither A4 nor LETTER (tolerance ±{:.2} pt).",
                    w_chk, h_chk, w_mb, h_mb, rotation, settings.paper_dim_mode, settings.tolerance_pt
                );
                match settings.paper_check {
                    PaperCheck::Strict => {
                        diagnostics.error(page, message.clone());
                        return Err(QrError::PaperMismatch { page, message });
                    }
                    PaperCheck::Warn => diagnostics.warning(page, message),
                }
            }
            classification => {
                diagnostics.info(
                    page,
                    format!(
                        "detected {} (checked {:.2} x {:.2} pt, MediaBox {:.2} x {:.2} pt, \
                         Rotate {}, mode={}, tol ±{:.2} pt).",
                        classification,
                        w_chk,
                        h_chk,
                        w_mb,
                        h_mb,
                        rotation,
                        settings.paper_dim_mode,
                        settings.tolerance_pt
                    ),
                );
            }
        }
    }

    Ok(())
}
