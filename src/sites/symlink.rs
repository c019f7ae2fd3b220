//! Enable/disable symlink management.
//!
//! # Responsibilities
//! - Create the sites-enabled symlink that makes a stored configuration live
//! - Remove it on disable, idempotently
//!
//! # Design Decisions
//! - Enable refuses to overwrite an existing link (the kernel enforces this;
//!   the AlreadyExists io error is surfaced as such)
//! - `is_enabled` uses symlink_metadata so a dangling link still reads as
//!   enabled -- exactly the state Delete ordering must never produce

use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use crate::sites::name::SiteName;
use crate::sites::types::{SiteError, SiteResult};

/// Manages enable links in the sites-enabled directory.
#[derive(Debug, Clone)]
pub struct SymlinkManager {
    dir: PathBuf,
}

impl SymlinkManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn link_for(&self, name: &SiteName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    /// Link the stored configuration into the enabled set.
    ///
    /// Fails with AlreadyExists if a link (or any file) with that name is
    /// already present; enabling never silently overwrites.
    pub fn enable(&self, name: &SiteName, target: &Path) -> SiteResult<()> {
        match symlink(target, self.link_for(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(SiteError::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(SiteError::Io(e)),
        }
    }

    /// Remove the enable link. Returns `Ok(false)` if it was already absent.
    pub fn disable(&self, name: &SiteName) -> SiteResult<bool> {
        match fs::remove_file(self.link_for(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SiteError::Io(e)),
        }
    }

    /// Whether an enable link exists, dangling or not.
    pub fn is_enabled(&self, name: &SiteName) -> bool {
        fs::symlink_metadata(self.link_for(name)).is_ok()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
