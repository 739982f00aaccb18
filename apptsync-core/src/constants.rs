use std::time::Duration;

/// Base URL of the remote appointment service.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// The one conversation this client speaks in.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Interval between two appointment polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Key under which the appointment snapshot is persisted.
pub const CACHE_KEY: &str = "appointments";

/// Agent reply appended to the transcript when a command never reached the service.
pub const CONNECTION_FAILURE_REPLY: &str = "Error: Cannot connect to server.";

pub const UPLOAD_SUCCESS_STATUS: &str = "Document uploaded successfully!";
pub const UPLOAD_FAILURE_STATUS: &str = "Error uploading file.";

/// Document types the upload endpoint understands.
pub const ACCEPTED_UPLOAD_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];
