use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("Unsupported unit: {0}. Use cm, mm or pt.")]
    UnsupportedUnit(String),
    #[error("Page {page} is out of range. The PDF has {page_count} pages.")]
    PageOutOfRange { page: usize, page_count: usize },
    #[error("[ERROR] Page {page}: {message}")]
    PaperMismatch { page: usize, message: String },
    #[error("Page object {page_id:?} has no readable /MediaBox")]
    InvalidMediaBox { page_id: lopdf::ObjectId },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("QR encoding error: {0}")]
    Qr(#[from] qrcode::types::QrError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, QrError>;

/// What happens when a page matches neither A4 nor LETTER
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PaperCheck {
    /// Record a warning and keep going
    #[default]
    Warn,
    /// Abort the whole operation
    Strict,
}

/// Which dimensions are compared against the paper references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PaperDimMode {
    /// MediaBox with width/height swapped for pages rotated 90° or 270°
    #[default]
    Visible,
    /// Raw MediaBox, ignoring /Rotate
    Mediabox,
}

/// Pages covered by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageScope {
    /// Only the page receiving the QR code
    #[default]
    TargetPage,
    /// Every page of the document
    AllPages,
}

impl PageScope {
    pub fn from_check_all(check_all_pages: bool) -> Self {
        if check_all_pages {
            PageScope::AllPages
        } else {
            PageScope::TargetPage
        }
    }
}

impl std::fmt::Display for PaperCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaperCheck::Warn => f.write_str("warn"),
            PaperCheck::Strict => f.write_str("strict"),
        }
    }
}

impl std::fmt::Display for PaperDimMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaperDimMode::Visible => f.write_str("visible"),
            PaperDimMode::Mediabox => f.write_str("mediabox"),
        }
    }
}
