//! Command configuration
//!
//! Each subcommand gets one plain struct, built once in `main` from the parsed
//! command line and handed to its handler by value.

use crate::error::{TabError, TabResult};
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

/// `xlsx-to-xml`
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub path: PathBuf,
    /// Sheet to convert; the first sheet when `None`
    pub sheet: Option<String>,
    /// Destination file; stdout when `None`
    pub output: Option<PathBuf>,
}

/// `sheets`
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub path: PathBuf,
}

/// `csv-rename-dupes` and `csv-trim`
#[derive(Debug, Clone)]
pub struct CsvConfig {
    pub path: PathBuf,
}

/// `xml-format`
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// A single `.xml` file or a directory of them
    pub path: PathBuf,
}

/// Resolve the input path: the `--path` flag wins, otherwise one line is read
/// from stdin when stdin is piped.
pub fn resolve_input(flag: Option<PathBuf>) -> TabResult<PathBuf> {
    let stdin = io::stdin();
    let piped = !stdin.is_terminal();
    resolve_input_from(flag, piped, stdin.lock())
}

/// [`resolve_input`] over an arbitrary reader
pub fn resolve_input_from<R: BufRead>(
    flag: Option<PathBuf>,
    piped: bool,
    mut reader: R,
) -> TabResult<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if !piped {
        return Err(TabError::NoInput);
    }

    let mut line = String::new();
    reader.read_line(&mut line).map_err(TabError::Stdin)?;
    let line = line.trim();
    if line.is_empty() {
        return Err(TabError::NoInput);
    }

    debug!(path = line, "Read input path from stdin");
    Ok(PathBuf::from(line))
}
