//! Site configuration file storage.
//!
//! # Responsibilities
//! - Read, write and delete configuration files under sites-available
//! - List stored configuration names in alphabetical order
//! - Extract the upstream server address from file content (display only)
//!
//! # Design Decisions
//! - No caching: every read hits the filesystem, writes are immediately
//!   visible to subsequent reads
//! - Delete is idempotent; a missing file is not an error
//! - Upstream extraction is a narrow single-line parser, not a config
//!   language parser -- it only serves the detail view

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::sites::name::SiteName;
use crate::sites::types::{SiteError, SiteResult};

/// Stores site configuration files in a single directory.
#[derive(Debug, Clone)]
pub struct SiteStore {
    dir: PathBuf,
}

impl SiteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Absolute path of the backing file for a name.
    pub fn path_for(&self, name: &SiteName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    pub fn exists(&self, name: &SiteName) -> bool {
        self.path_for(name).is_file()
    }

    /// Read the exact file content as last written.
    pub fn read(&self, name: &SiteName) -> SiteResult<String> {
        match fs::read_to_string(self.path_for(name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SiteError::NotFound(name.to_string()))
            }
            Err(e) => Err(SiteError::Io(e)),
        }
    }

    /// Create or overwrite the backing file.
    pub fn write(&self, name: &SiteName, content: &str) -> SiteResult<()> {
        fs::write(self.path_for(name), content)?;
        Ok(())
    }

    /// Remove the backing file. Returns `Ok(false)` if it was already absent.
    pub fn delete(&self, name: &SiteName) -> SiteResult<bool> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SiteError::Io(e)),
        }
    }

    /// List stored configuration names, alphabetically sorted.
    ///
    /// Callers rely on the ordering; only regular files are reported.
    pub fn list(&self) -> SiteResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Extract the first upstream server address from configuration content.
///
/// Matches a line of the shape `server <host>[:port];` and returns `<host>`.
/// Host characters are alphanumerics, '.' and '-'. Used only for the detail
/// view; never gates a lifecycle decision.
pub fn extract_upstream(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("server") else {
            continue;
        };
        // Require whitespace between the directive and its argument.
        let Some(first) = rest.chars().next() else {
            continue;
        };
        if !first.is_whitespace() {
            continue;
        }
        let Some(arg) = rest.trim().strip_suffix(';') else {
            continue;
        };
        let host: &str = arg.split(':').next().unwrap_or(arg);
        if !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            // Ports, when present, must be numeric for the line to count.
            if let Some(port) = arg.split_once(':').map(|(_, p)| p) {
                if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
            }
            return Some(host.to_string());
        }
    }
    None
}
