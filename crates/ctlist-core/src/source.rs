//! Where the log list and its detached signature come from.

use std::path::{Path, PathBuf};

use crate::error::{CtListError, CtListResult};

/// Log list document plus detached signature, not yet verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedLogList {
    pub document: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Retrieves a [`SignedLogList`].
///
/// Implementations block until they have both byte strings or fail with
/// [`CtListError::FetchOrVerify`].
pub trait LogListSource {
    fn fetch(&self) -> CtListResult<SignedLogList>;
}

/// Reads the document and signature from local files.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub log_list: PathBuf,
    pub signature: PathBuf,
}

impl FileSource {
    pub fn new(log_list: impl Into<PathBuf>, signature: impl Into<PathBuf>) -> Self {
        Self {
            log_list: log_list.into(),
            signature: signature.into(),
        }
    }
}

fn read(path: &Path, what: &str) -> CtListResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| CtListError::FetchOrVerify {
        message: format!("failed to read {what} {}: {e}", path.display()),
    })
}

impl LogListSource for FileSource {
    fn fetch(&self) -> CtListResult<SignedLogList> {
        let signature = read(&self.signature, "signature")?;
        let document = read(&self.log_list, "log list")?;
        tracing::debug!(
            log_list = %self.log_list.display(),
            bytes = document.len(),
            signature_bytes = signature.len(),
            "read log list"
        );
        Ok(SignedLogList {
            document,
            signature,
        })
    }
}

/// In-memory source.
#[derive(Debug, Clone)]
pub struct MemorySource {
    list: SignedLogList,
}

impl MemorySource {
    pub fn new(document: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            list: SignedLogList {
                document: document.into(),
                signature: signature.into(),
            },
        }
    }
}

impl LogListSource for MemorySource {
    fn fetch(&self) -> CtListResult<SignedLogList> {
        Ok(self.list.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_reads_both() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("log_list.json");
        let sig = dir.path().join("log_list.sig");
        std::fs::write(&list, b"{}").unwrap();
        std::fs::write(&sig, [0xde, 0xad]).unwrap();

        let fetched = FileSource::new(&list, &sig).fetch().unwrap();
        assert_eq!(fetched.document, b"{}");
        assert_eq!(fetched.signature, vec![0xde, 0xad]);
    }

    #[test]
    fn test_missing_signature_is_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("log_list.json");
        std::fs::write(&list, b"{}").unwrap();

        let err = FileSource::new(&list, dir.path().join("missing.sig"))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, CtListError::FetchOrVerify { .. }));
        assert!(err.to_string().contains("missing.sig"));
    }
}
