//! Error types shared by the pipeline, the collaborator client and the UI.

use thiserror::Error;

/// Errors surfaced by persona operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The generator service call failed or answered non-2xx.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// The export service call failed or answered non-2xx.
    #[error("export failed: {0}")]
    ExportFailed(String),

    /// Export was requested with nothing to export.
    #[error("no records to export")]
    EmptyExport,

    /// Writing to the system clipboard failed.
    #[error("clipboard write failed: {0}")]
    ClipboardWriteFailed(String),

    /// Two sort keys of different kinds were compared.
    #[error("cannot compare {left} with {right}")]
    InvalidSortComparison {
        left: &'static str,
        right: &'static str,
    },

    /// Config file could not be read or written.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Message suitable for the alert/toast line.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::GenerationFailed(_) => "Error generating profiles. Please try again.",
            Self::ExportFailed(_) => "שגיאה בהורדת הקובץ. אנא נסה שוב.",
            Self::EmptyExport => "אין נתונים להורדה. אנא צור פרופילים קודם.",
            Self::ClipboardWriteFailed(_) => "ההעתקה ללוח נכשלה",
            Self::InvalidSortComparison { .. } | Self::Config(_) => {
                "An unexpected error occurred."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
