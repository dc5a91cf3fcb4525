//! File discovery module for SOS response files
//!
//! Expands the inputs given on the command line (files, directories, glob
//! patterns) into a sorted, de-duplicated list of XML files.

use crate::constants::XML_EXTENSION;
use crate::error::{ProcessingError, ProcessingResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File discovery component for SOS inputs
#[derive(Debug)]
pub struct FileDiscovery {
    inputs: Vec<String>,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Discover every input file
    ///
    /// Files are taken as given, directories are walked recursively for
    /// `*.xml`, anything else is treated as a glob pattern.
    pub fn discover_xml_files(&self) -> ProcessingResult<Vec<PathBuf>> {
        let mut files = BTreeSet::new();

        for input in &self.inputs {
            let path = Path::new(input);
            if path.is_file() {
                files.insert(path.to_path_buf());
            } else if path.is_dir() {
                let found = discover_directory(path)?;
                debug!("Found {} XML files in {}", found.len(), path.display());
                files.extend(found);
            } else if is_glob_pattern(input) {
                let found = discover_pattern(input)?;
                debug!("Pattern {} matched {} files", input, found.len());
                files.extend(found);
            } else {
                return Err(ProcessingError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("input not found: {}", input),
                )));
            }
        }

        if files.is_empty() {
            return Err(ProcessingError::NoInputs {
                inputs: self.inputs.join(", "),
            });
        }

        debug!("Discovered {} input files", files.len());
        Ok(files.into_iter().collect())
    }
}

/// Walk a directory recursively for XML files
fn discover_directory(root: &Path) -> ProcessingResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && is_xml_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn discover_pattern(pattern: &str) -> ProcessingResult<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| ProcessingError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| ProcessingError::Io(e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(&['*', '?', '['][..])
}

/// Check if a path is an XML file
fn is_xml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(XML_EXTENSION))
}
