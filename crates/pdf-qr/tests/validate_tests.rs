use lopdf::{Dictionary, Document, Object, Stream};
use pdf_qr::*;

/// One page per `(width, height, rotate)` entry
fn create_test_pdf(pages: &[(f64, f64, i64)]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &(width, height, rotate) in pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width as _),
                    Object::Real(height as _),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        if rotate != 0 {
            page.set("Rotate", Object::Integer(rotate));
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(pages.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn settings(paper_check: PaperCheck, scope: PageScope, mode: PaperDimMode) -> PaperValidation {
    PaperValidation {
        tolerance_pt: 3.0,
        paper_check,
        page_scope: scope,
        paper_dim_mode: mode,
    }
}

#[test]
fn test_a4_page_single_info_line() {
    let doc = create_test_pdf(&[(595.28, 841.89, 0)]);
    let mut diagnostics = Diagnostics::new();

    validate_pages(&doc, 1, &PaperValidation::default(), &mut diagnostics).unwrap();

    assert_eq!(diagnostics.len(), 1);
    let line = &diagnostics.entries()[0];
    assert_eq!(line.level, DiagnosticLevel::Info);
    assert_eq!(line.page, Some(1));
    assert!(line.message.starts_with("detected A4 "));
    assert!(line.to_string().starts_with("[INFO] Page 1: detected A4"));
}

#[test]
fn test_rotated_letter_visible_mode() {
    let doc = create_test_pdf(&[(612.0, 792.0, 90)]);
    let check = check_page(&doc, 1, 3.0, PaperDimMode::Visible).unwrap();
    assert_eq!(check.checked_dimensions, (792.0, 612.0));
    assert_eq!(check.classification.to_string(), "LETTER(rotated)");
    assert_eq!(check.geometry.rotation, Rotation::Clockwise90);
}

#[test]
fn test_rotated_letter_mediabox_mode() {
    let doc = create_test_pdf(&[(612.0, 792.0, 90)]);
    let check = check_page(&doc, 1, 3.0, PaperDimMode::Mediabox).unwrap();
    assert_eq!(check.checked_dimensions, (612.0, 792.0));
    assert_eq!(check.classification.to_string(), "LETTER");
}

#[test]
fn test_rotation_warning_precedes_classification() {
    let doc = create_test_pdf(&[(612.0, 792.0, 270)]);
    let mut diagnostics = Diagnostics::new();

    validate_pages(&doc, 1, &PaperValidation::default(), &mut diagnostics).unwrap();

    let levels: Vec<_> = diagnostics.iter().map(|d| d.level).collect();
    assert_eq!(levels, vec![DiagnosticLevel::Warning, DiagnosticLevel::Info]);
    assert!(diagnostics.entries()[0].message.contains("/Rotate=270°"));
    assert!(diagnostics.entries()[1].message.contains("LETTER(rotated)"));
}

#[test]
fn test_warn_mode_continues_past_unrecognized_pages() {
    let doc = create_test_pdf(&[
        (500.0, 700.0, 0),
        (612.0, 792.0, 0),
        (400.0, 400.0, 0),
    ]);
    let mut diagnostics = Diagnostics::new();
    let settings = settings(PaperCheck::Warn, PageScope::AllPages, PaperDimMode::Visible);

    validate_pages(&doc, 2, &settings, &mut diagnostics).unwrap();

    let pages: Vec<_> = diagnostics.iter().map(|d| d.page).collect();
    assert_eq!(pages, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(diagnostics.count(DiagnosticLevel::Warning), 2);
    assert_eq!(diagnostics.count(DiagnosticLevel::Info), 1);
    assert!(diagnostics.entries()[0].message.contains("matches neither A4 nor LETTER"));
    assert!(diagnostics.entries()[0].message.contains("500.00 x 700.00"));
}

#[test]
fn test_strict_mode_aborts_on_first_unrecognized_page() {
    let doc = create_test_pdf(&[
        (612.0, 792.0, 0),
        (500.0, 700.0, 0),
        (400.0, 400.0, 0),
    ]);
    let mut diagnostics = Diagnostics::new();
    let settings = settings(PaperCheck::Strict, PageScope::AllPages, PaperDimMode::Visible);

    let result = validate_pages(&doc, 1, &settings, &mut diagnostics);

    match result {
        Err(QrError::PaperMismatch { page, message }) => {
            assert_eq!(page, 2);
            assert!(message.contains("500.00 x 700.00"));
            assert_eq!(message, diagnostics.entries()[1].message);
        }
        other => panic!("Expected PaperMismatch, got {:?}", other),
    }
    let err = validate_pages(&doc, 1, &settings, &mut Diagnostics::new()).unwrap_err();
    assert_eq!(err.to_string(), diagnostics.entries()[1].to_string());
    assert!(err.to_string().starts_with("[ERROR] Page 2: checked size 500.00 x 700.00"));
    // Page 3 was never examined
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.entries()[1].level, DiagnosticLevel::Error);
}

#[test]
fn test_target_page_scope_ignores_other_pages() {
    let doc = create_test_pdf(&[(500.0, 700.0, 0), (595.28, 841.89, 0)]);
    let mut diagnostics = Diagnostics::new();
    let settings = settings(PaperCheck::Strict, PageScope::TargetPage, PaperDimMode::Visible);

    validate_pages(&doc, 2, &settings, &mut diagnostics).unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.entries()[0].page, Some(2));
}

#[test]
fn test_negative_tolerance_rejected() {
    let doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    let mut diagnostics = Diagnostics::new();
    let settings = PaperValidation {
        tolerance_pt: -1.0,
        ..PaperValidation::default()
    };

    assert!(matches!(
        validate_pages(&doc, 1, &settings, &mut diagnostics),
        Err(QrError::Config(_))
    ));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_check_page_rejects_negative_tolerance() {
    let doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    assert!(matches!(
        check_page(&doc, 1, -0.1, PaperDimMode::Visible),
        Err(QrError::Config(_))
    ));
}

#[test]
fn test_page_out_of_range() {
    let doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    assert!(matches!(
        check_page(&doc, 2, 3.0, PaperDimMode::Visible),
        Err(QrError::PageOutOfRange {
            page: 2,
            page_count: 1
        })
    ));
    assert!(matches!(
        page_id(&doc, 0),
        Err(QrError::PageOutOfRange { page: 0, .. })
    ));
}

#[test]
fn test_inherited_mediabox_and_rotate() {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
    ]));
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
        ("Rotate", Object::Integer(-90)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let geometry = page_geometry(&doc, page_id).unwrap();
    assert_eq!(geometry.mediabox_dimensions(), (612.0, 792.0));
    assert_eq!(geometry.rotation, Rotation::Clockwise270);
    assert_eq!(geometry.visible_dimensions(), (792.0, 612.0));
}

#[test]
fn test_mediabox_with_offset_origin() {
    let mut doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    let id = page_id(&doc, 1).unwrap();
    doc.get_object_mut(id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(10),
                Object::Integer(20),
                Object::Integer(622),
                Object::Integer(812),
            ]),
        );

    let geometry = page_geometry(&doc, id).unwrap();
    assert_eq!(geometry.mediabox_dimensions(), (612.0, 792.0));
}

fn set_mediabox(doc: &mut Document, page: usize, mediabox: Option<Object>) {
    let id = page_id(doc, page).unwrap();
    let dict = doc.get_object_mut(id).unwrap().as_dict_mut().unwrap();
    match mediabox {
        Some(mediabox) => dict.set("MediaBox", mediabox),
        None => {
            dict.remove(b"MediaBox");
        }
    }
}

#[test]
fn test_unreadable_mediabox_is_fatal_in_strict_mode() {
    let mut doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    set_mediabox(
        &mut doc,
        1,
        Some(Object::Array(vec![Object::Name(b"bogus".to_vec())])),
    );
    let mut diagnostics = Diagnostics::new();
    let settings = settings(PaperCheck::Strict, PageScope::TargetPage, PaperDimMode::Visible);

    let result = validate_pages(&doc, 1, &settings, &mut diagnostics);

    assert!(matches!(result, Err(QrError::InvalidMediaBox { .. })));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_unreadable_mediabox_is_fatal_in_warn_mode() {
    let mut doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    set_mediabox(
        &mut doc,
        1,
        Some(Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Name(b"wide".to_vec()),
            Object::Integer(792),
        ])),
    );

    assert!(matches!(
        validate_pages(&doc, 1, &PaperValidation::default(), &mut Diagnostics::new()),
        Err(QrError::InvalidMediaBox { .. })
    ));
}

#[test]
fn test_missing_mediabox_on_page_and_ancestors() {
    let mut doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    set_mediabox(&mut doc, 1, None);
    let id = page_id(&doc, 1).unwrap();

    match page_geometry(&doc, id) {
        Err(QrError::InvalidMediaBox { page_id }) => assert_eq!(page_id, id),
        other => panic!("Expected InvalidMediaBox, got {:?}", other),
    }
}

#[test]
fn test_empty_mediabox_rejected() {
    let mut doc = create_test_pdf(&[(612.0, 792.0, 0)]);
    set_mediabox(
        &mut doc,
        1,
        Some(Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(792),
        ])),
    );

    assert!(matches!(
        check_page(&doc, 1, 3.0, PaperDimMode::Mediabox),
        Err(QrError::InvalidMediaBox { .. })
    ));
}
