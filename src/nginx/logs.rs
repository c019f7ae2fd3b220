//! Per-site access log reading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::sites::name::SiteName;
use crate::sites::types::{SiteError, SiteResult};

/// Reads the access log nginx writes for a site.
///
/// The path is derived from the validated name, never from raw input, so a
/// request for "../secrets" dies at name parsing before reaching here.
#[derive(Debug, Clone)]
pub struct AccessLogReader {
    log_dir: PathBuf,
}

impl AccessLogReader {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    pub fn path_for(&self, name: &SiteName) -> PathBuf {
        self.log_dir.join(format!("{name}.access.log"))
    }

    /// Read the whole access log. Absent file maps to NotFound.
    pub fn read(&self, name: &SiteName) -> SiteResult<String> {
        match fs::read_to_string(self.path_for(name)) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SiteError::NotFound(name.to_string()))
            }
            Err(e) => Err(SiteError::Io(e)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.log_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_existing_log() {
        let dir = TempDir::new().unwrap();
        let reader = AccessLogReader::new(dir.path());
        let name = SiteName::parse("svc-a").unwrap();

        fs::write(dir.path().join("svc-a.access.log"), "GET / 200\n").unwrap();
        assert_eq!(reader.read(&name).unwrap(), "GET / 200\n");
    }

    #[test]
    fn test_missing_log_is_not_found() {
        let dir = TempDir::new().unwrap();
        let reader = AccessLogReader::new(dir.path());
        let name = SiteName::parse("ghost").unwrap();

        assert!(matches!(reader.read(&name), Err(SiteError::NotFound(_))));
    }
}
