//! Concurrent per-file processing
//!
//! One blocking task per file on the tokio runtime. Tasks share nothing, a
//! failure is recorded against its own file, and outcomes come back in
//! completion order.

use crate::error::{TabError, TabResult};
use crate::files::{ensure_exists, has_extension};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

pub const XML_EXTENSION: &str = ".xml";

/// Result of processing one file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: TabResult<()>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Files to format: a directory's `*.xml` entries (not recursive, sorted by
/// name) or a single `.xml` file.
pub fn discover_xml_files(path: &Path) -> TabResult<Vec<PathBuf>> {
    ensure_exists(path)?;

    if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|source| TabError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| TabError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            let file = entry.path();
            if file.is_file() && has_extension(&file, XML_EXTENSION) {
                files.push(file);
            }
        }
        files.sort();
        return Ok(files);
    }

    if has_extension(path, XML_EXTENSION) {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(TabError::InvalidFileType {
            path: path.to_path_buf(),
            expected: "XML",
        })
    }
}

/// Run `task` once per file and collect every outcome.
///
/// A task that panics is logged and has no outcome.
pub async fn run_batch<F>(files: Vec<PathBuf>, task: F) -> Vec<FileOutcome>
where
    F: Fn(&Path) -> TabResult<()> + Send + Sync + 'static,
{
    let task = Arc::new(task);
    let mut set = JoinSet::new();

    for path in files {
        let task = Arc::clone(&task);
        set.spawn_blocking(move || {
            let result = task(&path);
            FileOutcome { path, result }
        });
    }

    let mut outcomes = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(outcome) => {
                match &outcome.result {
                    Ok(()) => info!(path = %outcome.path.display(), "Processed"),
                    Err(e) => error!(path = %outcome.path.display(), error = %e, "Failed"),
                }
                outcomes.push(outcome);
            }
            Err(e) => error!(error = %e, "Task did not finish"),
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_sorted_xml_only() {
        let dir = TempDir::new().unwrap();
        for name in ["b.xml", "a.xml", "notes.txt", "c.XML"] {
            fs::write(dir.path().join(name), "<x/>").unwrap();
        }
        fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let files = discover_xml_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.xml", "b.xml"]);
    }

    #[test]
    fn test_discover_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("one.xml");
        fs::write(&file, "<x/>").unwrap();
        assert_eq!(discover_xml_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_discover_rejects_other_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("one.json");
        fs::write(&file, "{}").unwrap();
        assert!(matches!(
            discover_xml_files(&file),
            Err(TabError::InvalidFileType { expected: "XML", .. })
        ));
        assert!(matches!(
            discover_xml_files(&dir.path().join("missing")),
            Err(TabError::NoFile(_))
        ));
    }

    #[tokio::test]
    async fn test_run_batch_isolates_failures() {
        let files: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("f{i}.xml"))).collect();

        let outcomes = run_batch(files, |path: &Path| {
            if path == Path::new("f3.xml") {
                Err(TabError::NoFile(path.to_path_buf()))
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(outcomes.len(), 5);
        let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_ok()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].path, PathBuf::from("f3.xml"));
    }

    #[tokio::test]
    async fn test_run_batch_empty() {
        let outcomes = run_batch(Vec::new(), |_: &Path| Ok(())).await;
        assert!(outcomes.is_empty());
    }
}
