//! Remote appointment service.
//!
//! Reads (polls) and writes (free-text commands) go through the
//! `RemoteSyncClient` trait so the sync loop and the conversation can be
//! driven by a fake in tests, or by a transport that adds correlation
//! tokens later without touching the callers.

pub mod http;
pub mod protocol;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::appointment::Appointment;
use crate::conversation::SessionId;
use crate::error::{ApptsyncError, ApptsyncResult, SyncError};

pub use http::HttpRemote;

#[async_trait]
pub trait RemoteSyncClient: Send + Sync {
    /// Fetch the full authoritative appointment list.
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, SyncError>;

    /// Hand raw user text to the remote interpreter and return its reply.
    ///
    /// Whether `text` is small talk or an instruction ("delete appointment 7")
    /// is decided remotely. Any mutation it causes shows up on the next poll.
    async fn send_command(&self, text: &str, session_id: &SessionId) -> Result<String, SyncError>;

    /// One-shot document transfer.
    async fn upload_document(&self, document: Document) -> Result<(), SyncError>;
}

/// A file to hand to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Document {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a document from disk, keeping only the file name for the upload.
    pub async fn read(path: &Path) -> ApptsyncResult<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ApptsyncError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} is not a file", path.display()),
                ))
            })?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Document { file_name, bytes })
    }

    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        PathBuf::from(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}
