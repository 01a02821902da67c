//! Single-page overlay carrying the QR image
//!
//! The overlay page has the target page's raw MediaBox size and draws the
//! QR raster in native PDF coordinates (origin bottom-left, Y up). Callers
//! convert units and flip visual coordinates before getting here.

use crate::constants::QR_IMAGE_NAME;
use crate::qr::QrRaster;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// In-memory overlay document, consumed by the merge step
#[derive(Debug, Clone)]
pub struct Overlay {
    document: Document,
    page_id: ObjectId,
    width_pt: f64,
    height_pt: f64,
}

impl Overlay {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page_id(&self) -> ObjectId {
        self.page_id
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width_pt, self.height_pt)
    }

    /// Serialize the overlay as a standalone PDF
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut document = self.document.clone();
        let mut writer = Vec::new();
        document.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Build the overlay page for a `page_width_pt` × `page_height_pt` page with
/// the QR square's lower-left corner at (`x_pt`, `y_pt`).
pub fn build_overlay(
    page_width_pt: f64,
    page_height_pt: f64,
    raster: &QrRaster,
    x_pt: f64,
    y_pt: f64,
    side_pt: f64,
) -> Result<Overlay> {
    if !(page_width_pt.is_finite() && page_width_pt > 0.0)
        || !(page_height_pt.is_finite() && page_height_pt > 0.0)
    {
        return Err(QrError::Config(format!(
            "Overlay page size must be positive, got {} x {}",
            page_width_pt, page_height_pt
        )));
    }
    if !side_pt.is_finite() || side_pt <= 0.0 {
        return Err(QrError::Config(format!(
            "QR size must be positive, got {} pt",
            side_pt
        )));
    }
    if !x_pt.is_finite() || !y_pt.is_finite() {
        return Err(QrError::Config("QR position must be finite".to_string()));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(image_xobject(raster)?);

    let mut xobjects = Dictionary::new();
    xobjects.set(QR_IMAGE_NAME, Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        side_pt, side_pt, x_pt, y_pt, QR_IMAGE_NAME
    );
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt as _),
            Object::Real(page_height_pt as _),
        ]),
    );
    page_dict.set("Resources", Object::Dictionary(resources));
    page_dict.set("Contents", Object::Reference(content_id));
    let page_id = doc.add_object(page_dict);

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    pages_dict.set("Count", Object::Integer(1));
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    Ok(Overlay {
        document: doc,
        page_id,
        width_pt: page_width_pt,
        height_pt: page_height_pt,
    })
}

/// Grayscale image XObject holding the raster samples
fn image_xobject(raster: &QrRaster) -> Result<Stream> {
    let side = raster.side_px() as i64;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(side));
    dict.set("Height", Object::Integer(side));
    dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));

    let mut stream = Stream::new(dict, raster.as_gray_bytes().to_vec());
    stream.compress()?;
    Ok(stream)
}
