//! Where a user dictionary comes from.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Result, YomiError};

/// A user dictionary source that can be located and checked for changes.
pub trait DictionarySource: Send + Sync + Debug {
    /// Path handed to the analyzer's dictionary compiler.
    fn path(&self) -> &Path;

    /// Current modification time of the source.
    fn modified(&self) -> Result<SystemTime>;
}

/// A dictionary file on the local filesystem.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileSource { path: path.into() }
    }
}

impl DictionarySource for FileSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn modified(&self) -> Result<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| {
                YomiError::dictionary_source(format!(
                    "cannot stat user dictionary '{}': {}",
                    self.path.display(),
                    e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_file_source_modified() {
        let file = NamedTempFile::new().unwrap();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        file.as_file().set_modified(stamp).unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.path(), file.path());
        assert_eq!(source.modified().unwrap(), stamp);
    }

    #[test]
    fn test_missing_file() {
        let source = FileSource::new("/nonexistent/userdict.txt");
        assert!(matches!(
            source.modified(),
            Err(YomiError::DictionarySource(_))
        ));
    }
}
