//! Compositing an overlay page onto an existing page
//!
//! The overlay page becomes a Form XObject inside the target document. The
//! target page keeps its original content streams, wrapped in `q ... Q` so
//! any graphics state they leave behind cannot leak into the overlay, and a
//! final stream paints the form on top.

use crate::constants::OVERLAY_XOBJECT_PREFIX;
use crate::overlay::Overlay;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// Merge
// =============================================================================

/// Paint `overlay` over the page `page_id` of `doc`.
pub fn merge_overlay(doc: &mut Document, page_id: ObjectId, overlay: &Overlay) -> Result<()> {
    let form_id = import_overlay_form(doc, overlay)?;

    let mut resources = effective_resources(doc, page_id)?;
    let mut xobjects = resolve_dictionary(doc, resources.get(b"XObject").ok())?;
    let name = unused_name(&xobjects);
    xobjects.set(name.as_bytes(), Object::Reference(form_id));
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut contents = existing_content_refs(doc, page_id)?;
    let open_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let draw = format!("\nQ\nq 1 0 0 1 0 0 cm /{} Do Q\n", name);
    let draw_id = doc.add_object(Stream::new(Dictionary::new(), draw.into_bytes()));
    contents.insert(0, Object::Reference(open_id));
    contents.push(Object::Reference(draw_id));

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Resources", Object::Dictionary(resources));
    page.set("Contents", Object::Array(contents));
    Ok(())
}

/// First `QrOverlayN` name not already present
fn unused_name(xobjects: &Dictionary) -> String {
    (0..)
        .map(|n| format!("{}{}", OVERLAY_XOBJECT_PREFIX, n))
        .find(|name| !xobjects.has(name.as_bytes()))
        .unwrap_or_else(|| OVERLAY_XOBJECT_PREFIX.to_string())
}

// =============================================================================
// Page Resources and Contents
// =============================================================================

/// The page's resource dictionary as an owned value, following references
/// and `/Parent` inheritance
fn effective_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut current_id = page_id;
    for _ in 0..64 {
        let dict = doc.get_dictionary(current_id)?;
        if let Ok(resources) = dict.get(b"Resources") {
            return resolve_dictionary(doc, Some(resources));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => current_id = parent_id,
            Err(_) => break,
        }
    }
    Ok(Dictionary::new())
}

/// Clone a dictionary object, dereferencing one level if needed
fn resolve_dictionary(doc: &Document, obj: Option<&Object>) -> Result<Dictionary> {
    match obj {
        Some(Object::Dictionary(dict)) => Ok(dict.clone()),
        Some(Object::Reference(id)) => Ok(doc.get_dictionary(*id)?.clone()),
        _ => Ok(Dictionary::new()),
    }
}

/// Existing `/Contents` as a list of stream references
fn existing_content_refs(doc: &mut Document, page_id: ObjectId) -> Result<Vec<Object>> {
    let contents = doc.get_dictionary(page_id)?.get(b"Contents").ok().cloned();

    let refs = match contents {
        Some(Object::Reference(id)) => match doc.get_object(id)? {
            // An indirect array of streams
            Object::Array(arr) => arr.clone(),
            _ => vec![Object::Reference(id)],
        },
        Some(Object::Array(arr)) => arr,
        Some(Object::Stream(stream)) => vec![Object::Reference(doc.add_object(stream))],
        _ => Vec::new(),
    };
    Ok(refs)
}

// =============================================================================
// Overlay Import
// =============================================================================

/// Add the overlay page to `doc` as a Form XObject spanning `[0 0 w h]`
fn import_overlay_form(doc: &mut Document, overlay: &Overlay) -> Result<ObjectId> {
    let source = overlay.document();
    let (width_pt, height_pt) = overlay.dimensions();
    let content = source.get_page_content(overlay.page_id())?;

    let mut imported = HashMap::new();
    let resources = match source.get_dictionary(overlay.page_id())?.get(b"Resources") {
        Ok(resources) => import_object(doc, source, resources, &mut imported)?,
        Err(_) => Object::Dictionary(Dictionary::new()),
    };

    let form = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Form".to_vec())),
        ("FormType", Object::Integer(1)),
        (
            "BBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt as _),
                Object::Real(height_pt as _),
            ]),
        ),
        ("Resources", resources),
    ]);
    Ok(doc.add_object(Stream::new(form, content)))
}

/// Copy `obj` from the overlay document into `doc`.
///
/// Indirect objects get fresh ids in `doc`; `imported` maps overlay ids to
/// those ids so every object is brought over once.
fn import_object(
    doc: &mut Document,
    source: &Document,
    obj: &Object,
    imported: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    Ok(match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = imported.get(id) {
                return Ok(Object::Reference(new_id));
            }
            let new_id = doc.new_object_id();
            imported.insert(*id, new_id);
            let copy = import_object(doc, source, source.get_object(*id)?, imported)?;
            doc.objects.insert(new_id, copy);
            Object::Reference(new_id)
        }
        Object::Dictionary(dict) => Object::Dictionary(import_dictionary(doc, source, dict, imported)?),
        Object::Array(items) => Object::Array(
            items
                .iter()
                .map(|item| import_object(doc, source, item, imported))
                .collect::<Result<_>>()?,
        ),
        Object::Stream(stream) => {
            let mut copy = stream.clone();
            copy.dict = import_dictionary(doc, source, &stream.dict, imported)?;
            Object::Stream(copy)
        }
        other => other.clone(),
    })
}

fn import_dictionary(
    doc: &mut Document,
    source: &Document,
    dict: &Dictionary,
    imported: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut copy = Dictionary::new();
    for (key, value) in dict.iter() {
        copy.set(key.clone(), import_object(doc, source, value, imported)?);
    }
    Ok(copy)
}
