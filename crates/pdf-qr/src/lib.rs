pub mod config;
pub mod constants;
mod coords;
mod diagnostics;
mod geometry;
pub mod insert;
mod merge;
mod options;
mod overlay;
mod paper;
mod qr;
mod rotation;
mod types;
mod units;
mod validate;

pub use config::{PlacementDefaults, QrConfig, ValidationDefaults};
pub use coords::{NativePosition, VisualPosition};
pub use diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use geometry::{PageGeometry, page_geometry, page_id};
pub use insert::{InsertionReport, Placement, insert_qr, insert_qr_blocking, load_pdf, save_pdf};
pub use merge::merge_overlay;
pub use options::*;
pub use overlay::{Overlay, build_overlay};
pub use paper::{Classification, PaperStandard, check_tolerance, classify};
pub use qr::{ErrorCorrection, QrRaster, QrStyle, generate_qr_raster};
pub use rotation::{Rotation, resolve_rotation, visible_dimensions};
pub use types::*;
pub use units::{Measurement, Unit, from_points, to_points};
pub use validate::{PageCheck, check_page, validate_pages};
