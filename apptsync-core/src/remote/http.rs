//! HTTP client for the remote appointment service.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::protocol::{
    APPOINTMENTS_PATH, AppointmentsResponse, CHAT_PATH, ChatRequest, ChatResponse, UPLOAD_FIELD,
    UPLOAD_PATH,
};
use super::{Document, RemoteSyncClient};
use crate::appointment::Appointment;
use crate::conversation::SessionId;
use crate::error::SyncError;

/// `RemoteSyncClient` over plain request/response HTTP.
///
/// Requests carry no timeout. A slow poll overlaps the next tick and
/// whichever response lands last wins.
#[derive(Clone)]
pub struct HttpRemote {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: &str) -> Self {
        HttpRemote {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and classify every way it can go wrong.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, SyncError> {
        let resp = request
            .send()
            .await
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SyncError::Unreachable(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn execute_json<R: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<R, SyncError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|e| SyncError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl RemoteSyncClient for HttpRemote {
    /// GET /appointments
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, SyncError> {
        let resp: AppointmentsResponse = self
            .execute_json(self.http.get(self.url(APPOINTMENTS_PATH)))
            .await?;
        Ok(resp.appointments)
    }

    /// POST /chat
    async fn send_command(&self, text: &str, session_id: &SessionId) -> Result<String, SyncError> {
        let req = ChatRequest {
            message: text.to_string(),
            session_id: session_id.as_str().to_string(),
        };
        let resp: ChatResponse = self
            .execute_json(self.http.post(self.url(CHAT_PATH)).json(&req))
            .await?;
        Ok(resp.response)
    }

    /// POST /upload
    async fn upload_document(&self, document: Document) -> Result<(), SyncError> {
        let part = Part::bytes(document.bytes).file_name(document.file_name);
        let form = Form::new().part(UPLOAD_FIELD, part);

        // The response body is informational only
        self.execute(self.http.post(self.url(UPLOAD_PATH)).multipart(form)).await?;
        Ok(())
    }
}
