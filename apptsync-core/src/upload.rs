//! Document upload flow.
//!
//! The UI only ever learns a status line from an upload; the document's
//! content is the remote side's business.

use crate::constants::{ACCEPTED_UPLOAD_EXTENSIONS, UPLOAD_FAILURE_STATUS, UPLOAD_SUCCESS_STATUS};
use crate::remote::{Document, RemoteSyncClient};

/// Whether the upload endpoint understands this document type.
pub fn is_accepted(document: &Document) -> bool {
    document
        .extension()
        .is_some_and(|ext| ACCEPTED_UPLOAD_EXTENSIONS.contains(&ext.as_str()))
}

/// Upload a document and report the outcome through `on_upload`.
///
/// Returns whether the upload succeeded.
pub async fn upload_with_status<F>(
    client: &dyn RemoteSyncClient,
    document: Document,
    on_upload: F,
) -> bool
where
    F: FnOnce(&str),
{
    let file_name = document.file_name.clone();
    let size = document.bytes.len();

    match client.upload_document(document).await {
        Ok(()) => {
            tracing::info!(file = %file_name, size, "Document uploaded");
            on_upload(UPLOAD_SUCCESS_STATUS);
            true
        }
        Err(e) => {
            tracing::warn!(file = %file_name, error = %e, "Document upload failed");
            on_upload(UPLOAD_FAILURE_STATUS);
            false
        }
    }
}
