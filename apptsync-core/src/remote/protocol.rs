//! JSON bodies exchanged with the remote appointment service.

use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;

/// Body of `GET /appointments`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

/// Body of `POST /chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Reply to `POST /chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

pub const APPOINTMENTS_PATH: &str = "/appointments";
pub const CHAT_PATH: &str = "/chat";
pub const UPLOAD_PATH: &str = "/upload";
