use std::path::PathBuf;
use thiserror::Error;

pub type TabResult<T> = Result<T, TabError>;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("No input provided: pass --path or pipe a path on stdin")]
    NoInput,

    #[error("File '{}' does not exist", .0.display())]
    NoFile(PathBuf),

    #[error("File '{}' is not a {expected} file", path.display())]
    InvalidFileType {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("Failed to read path from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("Failed to read '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to replace '{}': {source}", path.display())]
    MoveFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Row {row} has {found} columns but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column {column} has an empty name and cannot be written as an XML element")]
    InvalidElementName { column: usize },

    #[error("{failed} of {total} XML file(s) could not be formatted")]
    BatchFailed { failed: usize, total: usize },
}

impl TabError {
    /// Process exit code for this error.
    ///
    /// Codes are stable so that calling scripts can branch on them:
    /// 1 read, 2 write, 3 read/write, 4 move, 5 stdin, 6 stdout,
    /// 7 no input, 8 missing file, 9 wrong extension, 10 parse.
    pub fn exit_code(&self) -> u8 {
        match self {
            TabError::ReadFile { .. } => 1,
            TabError::WriteFile { .. } => 2,
            TabError::Io(_) => 3,
            TabError::MoveFile { .. } => 4,
            TabError::Stdin(_) => 5,
            TabError::Stdout(_) => 6,
            TabError::NoInput => 7,
            TabError::NoFile(_) => 8,
            TabError::InvalidFileType { .. } => 9,
            TabError::Spreadsheet(_)
            | TabError::Csv(_)
            | TabError::Xml(_)
            | TabError::SheetNotFound(_)
            | TabError::RaggedRow { .. }
            | TabError::InvalidElementName { .. }
            | TabError::BatchFailed { .. } => 10,
        }
    }
}
