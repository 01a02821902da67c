use crate::constants::DEFAULT_TOLERANCE_PT;
use crate::coords::NativePosition;
use crate::paper::check_tolerance;
use crate::qr::QrStyle;
use crate::types::*;
use crate::units::Measurement;
use std::path::PathBuf;

/// Paper-size and rotation checks applied before placing the QR code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperValidation {
    /// Allowed deviation from the reference sizes, in points
    pub tolerance_pt: f64,
    pub paper_check: PaperCheck,
    pub page_scope: PageScope,
    pub paper_dim_mode: PaperDimMode,
}

impl Default for PaperValidation {
    fn default() -> Self {
        Self {
            tolerance_pt: DEFAULT_TOLERANCE_PT,
            paper_check: PaperCheck::Warn,
            page_scope: PageScope::TargetPage,
            paper_dim_mode: PaperDimMode::Visible,
        }
    }
}

impl PaperValidation {
    pub fn validate(&self) -> Result<()> {
        check_tolerance(self.tolerance_pt)
    }
}

/// Everything one insertion needs
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionRequest {
    // Files
    pub input_pdf: PathBuf,
    pub output_pdf: PathBuf,

    // Content
    pub url: String,

    // Placement
    /// 1-based target page
    pub page: usize,
    pub position: NativePosition,
    /// Side length of the QR square
    pub size: Measurement,

    // Paper validation
    pub validation: PaperValidation,

    // Encoding
    pub qr_style: QrStyle,
}

impl InsertionRequest {
    /// Request with the default validation settings
    pub fn new(
        input_pdf: impl Into<PathBuf>,
        output_pdf: impl Into<PathBuf>,
        url: impl Into<String>,
        page: usize,
        position: NativePosition,
        size: Measurement,
    ) -> Self {
        Self {
            input_pdf: input_pdf.into(),
            output_pdf: output_pdf.into(),
            url: url.into(),
            page,
            position,
            size,
            validation: PaperValidation::default(),
            qr_style: QrStyle::default(),
        }
    }

    /// Validate the request before any document is opened
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(QrError::Config("A URL to encode is required".to_string()));
        }

        self.validation.validate()?;

        let side_pt = self.size.to_points();
        if !side_pt.is_finite() || side_pt <= 0.0 {
            return Err(QrError::Config(format!(
                "QR size must be positive, got {}",
                self.size
            )));
        }

        let (x_pt, y_pt) = self.position.to_points();
        if !x_pt.is_finite() || !y_pt.is_finite() {
            return Err(QrError::Config(
                "QR position must be finite".to_string(),
            ));
        }

        if same_file(&self.input_pdf, &self.output_pdf) {
            return Err(QrError::Config(
                "Output PDF must differ from the input PDF".to_string(),
            ));
        }

        Ok(())
    }
}

fn same_file(a: &std::path::Path, b: &std::path::Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
