//! Ordered, human-readable diagnostics produced during an insertion
//!
//! Every entry is also forwarded to the `log` facade so that front-ends with
//! a logger installed see diagnostics as they happen, even when the run
//! aborts before a report is returned.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl DiagnosticLevel {
    pub fn tag(self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "INFO",
            DiagnosticLevel::Warning => "WARNING",
            DiagnosticLevel::Error => "ERROR",
        }
    }

    fn log_level(self) -> log::Level {
        match self {
            DiagnosticLevel::Info => log::Level::Info,
            DiagnosticLevel::Warning => log::Level::Warn,
            DiagnosticLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// 1-based page the entry refers to
    pub page: Option<usize>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "[{}] Page {}: {}", self.level.tag(), page, self.message),
            None => write!(f, "[{}] {}", self.level.tag(), self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: DiagnosticLevel, page: Option<usize>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            level,
            page,
            message: message.into(),
        };
        log::log!(target: "pdf_qr", diagnostic.level.log_level(), "{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn info(&mut self, page: usize, message: impl Into<String>) {
        self.push(DiagnosticLevel::Info, Some(page), message);
    }

    pub fn warning(&mut self, page: usize, message: impl Into<String>) {
        self.push(DiagnosticLevel::Warning, Some(page), message);
    }

    pub fn error(&mut self, page: usize, message: impl Into<String>) {
        self.push(DiagnosticLevel::Error, Some(page), message);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.entries.iter().filter(|d| d.level == level).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// One rendered line per entry, in emission order
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
