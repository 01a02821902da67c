//! Reading page geometry (MediaBox and /Rotate) from a document

use crate::rotation::{Rotation, resolve_rotation, visible_dimensions};
use crate::types::{QrError, Result};
use lopdf::{Document, Object, ObjectId};

/// Stored dimensions and rotation of one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub mediabox_width_pt: f64,
    pub mediabox_height_pt: f64,
    pub rotation: Rotation,
}

impl PageGeometry {
    pub fn mediabox_dimensions(&self) -> (f64, f64) {
        (self.mediabox_width_pt, self.mediabox_height_pt)
    }

    /// MediaBox with width and height swapped for 90°/270° pages
    pub fn visible_dimensions(&self) -> (f64, f64) {
        visible_dimensions(
            self.mediabox_width_pt,
            self.mediabox_height_pt,
            self.rotation,
        )
    }
}

/// Object id of the 1-based `page`, or `PageOutOfRange`
pub fn page_id(doc: &Document, page: usize) -> Result<ObjectId> {
    let pages = doc.get_pages();
    let page_count = pages.len();
    if page == 0 || page > page_count {
        return Err(QrError::PageOutOfRange { page, page_count });
    }
    pages
        .get(&(page as u32))
        .copied()
        .ok_or(QrError::PageOutOfRange { page, page_count })
}

/// Read the geometry of a page, following `/Parent` for inherited entries.
///
/// A page without a readable four-number `/MediaBox` on itself or any
/// ancestor is an `InvalidMediaBox` error.
pub fn page_geometry(doc: &Document, page_id: ObjectId) -> Result<PageGeometry> {
    let (mediabox_width_pt, mediabox_height_pt) = resolve_inherited(doc, page_id, b"MediaBox")?
        .and_then(|obj| box_dimensions(doc, obj))
        .ok_or(QrError::InvalidMediaBox { page_id })?;

    let rotation = resolve_inherited(doc, page_id, b"Rotate")?
        .and_then(|obj| extract_integer(deref(doc, obj)))
        .map(resolve_rotation)
        .unwrap_or_default();

    Ok(PageGeometry {
        mediabox_width_pt,
        mediabox_height_pt,
        rotation,
    })
}

/// Look up `key` on the page dictionary, then up the page tree
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current_id = page_id;
    // Guard against /Parent cycles in damaged files
    for _ in 0..64 {
        let dict = doc.get_dictionary(current_id)?;
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => current_id = parent_id,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

fn deref<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Width and height of a `[x1 y1 x2 y2]` box with a non-empty area
fn box_dimensions(doc: &Document, obj: &Object) -> Option<(f64, f64)> {
    let array = deref(doc, obj).as_array().ok()?;
    if array.len() != 4 {
        return None;
    }
    let mut coords = [0.0; 4];
    for (slot, item) in coords.iter_mut().zip(array) {
        *slot = extract_number(deref(doc, item))?;
    }
    let [x1, y1, x2, y2] = coords;
    let (width, height) = ((x2 - x1).abs(), (y2 - y1).abs());
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        .then_some((width, height))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// `/Rotate` is an integer; reals from sloppy writers are truncated
fn extract_integer(obj: &Object) -> Option<i64> {
    match obj {
        Object::Integer(i) => Some(*i),
        Object::Real(r) if r.is_finite() => Some(r.trunc() as i64),
        _ => None,
    }
}
