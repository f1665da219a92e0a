//! Batch runner
//!
//! Files are independent units: each one is read, transformed and written back
//! on its own rayon task. A failing file is recorded and never stops the batch.

use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

use crate::diagnostics::{Diagnostic, TransformError};
use crate::options::TransformOptions;
use crate::transform::{transform, TransformOutput};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Transform(#[from] TransformError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: String,
    pub changed: bool,
    pub migrated_elements: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn changed_files(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    pub fn migrated_elements(&self) -> usize {
        self.files.iter().map(|f| f.migrated_elements).sum()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.error.is_some())
    }

    pub fn has_failures(&self) -> bool {
        self.failed_files().next().is_some()
    }
}

/// Migrates `files` in parallel. With `dry_run` nothing is written.
///
/// Reports come back in the order of `files`.
pub fn run(files: &[PathBuf], options: &TransformOptions, dry_run: bool) -> BatchReport {
    let files = files
        .par_iter()
        .map(|path| process_file(path, options, dry_run))
        .collect();
    BatchReport { files }
}

fn process_file(path: &Path, options: &TransformOptions, dry_run: bool) -> FileReport {
    let display = path.to_string_lossy().to_string();
    match migrate_file(path, options, dry_run) {
        Ok(output) => FileReport {
            path: display,
            changed: output.changed,
            migrated_elements: output.migrated_elements,
            diagnostics: output.diagnostics,
            error: None,
        },
        Err(e) => {
            error!("{}", e);
            FileReport {
                path: display,
                changed: false,
                migrated_elements: 0,
                diagnostics: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Reads, transforms and (unless `dry_run`) rewrites a single file.
pub fn migrate_file(
    path: &Path,
    options: &TransformOptions,
    dry_run: bool,
) -> Result<TransformOutput, RunError> {
    let source = fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let output = transform(&source, &path.to_string_lossy(), options)?;

    if output.changed && !dry_run {
        fs::write(path, &output.code).map_err(|source| RunError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    if output.changed {
        info!(
            file = %path.display(),
            elements = output.migrated_elements,
            dry_run,
            "migrated"
        );
    }
    Ok(output)
}
