//! Error types for cards, import, export and the session controller

use thiserror::Error;

/// A card that cannot enter the deck
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("The {0} field is required")]
    MissingField(&'static str),

    #[error("Unknown word type '{0}' (expected verb, noun, adjective or adverb)")]
    UnknownWordType(String),
}

/// Errors that can occur while reading a tabular file
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No sheets found in workbook")]
    NoSheets,

    #[error("Row {row}: {source}")]
    MalformedRow {
        row: usize,
        #[source]
        source: CardError,
    },

    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("File has no extension")]
    MissingExtension,

    #[error("No vocabulary cards found in file")]
    Empty,
}

/// Errors that can occur while writing a tabular file or print page
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Rejected session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No card is selected")]
    NoCurrentCard,

    #[error("Built-in card '{0}' cannot be deleted")]
    BuiltinCard(String),

    #[error("A confirmation is waiting for an answer")]
    ConfirmationPending,

    #[error("Nothing is waiting for confirmation")]
    NoPendingConfirmation,

    #[error(transparent)]
    InvalidCard(#[from] CardError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl From<SessionError> for String {
    fn from(err: SessionError) -> Self {
        err.to_string()
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
