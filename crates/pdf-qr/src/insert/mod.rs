//! QR insertion - the end-to-end pipeline
//!
//! 1. Validate the request and open the source document
//! 2. Check the target page exists
//! 3. Validate paper size and rotation of the pages in scope
//! 4. Convert position and size to points
//! 5. Generate the QR raster
//! 6. Build the overlay for the target page and merge it
//! 7. Write every page, in order, to the destination

mod io;

pub use io::{load_pdf, save_pdf};

use crate::diagnostics::Diagnostics;
use crate::geometry::{page_geometry, page_id};
use crate::options::InsertionRequest;
use crate::merge::merge_overlay;
use crate::overlay::build_overlay;
use crate::qr::generate_qr_raster;
use crate::types::*;
use crate::validate::validate_pages;
use io::{load_pdf_blocking, save_pdf_blocking};
use std::path::PathBuf;

/// Where the QR square ended up, in native points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_pt: f64,
    pub y_pt: f64,
    pub side_pt: f64,
}

/// Outcome of a successful insertion
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionReport {
    pub output_pdf: PathBuf,
    pub page: usize,
    pub page_count: usize,
    pub placement: Placement,
    pub diagnostics: Diagnostics,
}

/// Insert a QR code as described by `request`.
///
/// The pipeline runs on a blocking thread. Diagnostics emitted before a
/// failure are still visible through the `log` facade.
pub async fn insert_qr(request: &InsertionRequest) -> Result<InsertionReport> {
    let request = request.clone();

    tokio::task::spawn_blocking(move || {
        let mut diagnostics = Diagnostics::new();
        insert_qr_blocking(&request, &mut diagnostics)
    })
    .await?
}

/// Synchronous insertion. `diagnostics` receives every line in emission
/// order and keeps them when an error is returned; the report carries a copy.
pub fn insert_qr_blocking(
    request: &InsertionRequest,
    diagnostics: &mut Diagnostics,
) -> Result<InsertionReport> {
    request.validate()?;

    let mut doc = load_pdf_blocking(&request.input_pdf)?;

    let page_count = doc.get_pages().len();
    log::debug!(
        "Loaded {} ({} pages)",
        request.input_pdf.display(),
        page_count
    );
    let target_id = page_id(&doc, request.page)?;

    validate_pages(&doc, request.page, &request.validation, diagnostics)?;

    let (x_pt, y_pt) = request.position.to_points();
    let side_pt = request.size.to_points();

    let raster = generate_qr_raster(&request.url, &request.qr_style)?;

    // Overlay uses the raw MediaBox, never the rotated view
    let geometry = page_geometry(&doc, target_id)?;
    let (page_w, page_h) = geometry.mediabox_dimensions();
    let overlay = build_overlay(page_w, page_h, &raster, x_pt, y_pt, side_pt)?;
    merge_overlay(&mut doc, target_id, &overlay)?;

    save_pdf_blocking(doc, &request.output_pdf)?;
    log::info!(
        "QR placed on page {} at ({:.2}, {:.2}) pt, side {:.2} pt -> {}",
        request.page,
        x_pt,
        y_pt,
        side_pt,
        request.output_pdf.display()
    );

    Ok(InsertionReport {
        output_pdf: request.output_pdf.clone(),
        page: request.page,
        page_count,
        placement: Placement {
            x_pt,
            y_pt,
            side_pt,
        },
        diagnostics: diagnostics.clone(),
    })
}
