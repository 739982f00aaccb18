//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::appointment::{Appointment, AppointmentId};
use crate::conversation::SessionId;
use crate::error::SyncError;
use crate::remote::{Document, RemoteSyncClient};

pub(crate) fn appt(id: i64) -> Appointment {
    Appointment {
        id: AppointmentId::Int(id),
        name: format!("Person {id}"),
        email: format!("person{id}@example.com"),
        phone: "+15551234567".to_string(),
        date: "2025-03-20".to_string(),
        time: "15:00".to_string(),
    }
}

pub(crate) fn unreachable() -> SyncError {
    SyncError::Unreachable("connection refused".to_string())
}

type ScriptedPoll = (Duration, Result<Vec<Appointment>, SyncError>);

/// Scriptable remote.
///
/// Unscripted polls return the `server` list; unscripted commands are
/// interpreted just enough to honor "delete appointment <id>".
#[derive(Default)]
pub(crate) struct FakeRemote {
    server: Mutex<Vec<Appointment>>,
    polls: Mutex<VecDeque<ScriptedPoll>>,
    replies: Mutex<VecDeque<Result<String, SyncError>>>,
    upload_error: Mutex<Option<SyncError>>,
    fetch_calls: AtomicUsize,
    commands: Mutex<Vec<(String, String)>>,
    uploads: Mutex<Vec<Document>>,
}

impl FakeRemote {
    pub(crate) fn with_server(appointments: Vec<Appointment>) -> Self {
        let fake = FakeRemote::default();
        *fake.server.lock().unwrap() = appointments;
        fake
    }

    pub(crate) fn push_poll(&self, result: Result<Vec<Appointment>, SyncError>) {
        self.push_slow_poll(Duration::ZERO, result);
    }

    pub(crate) fn push_slow_poll(
        &self,
        delay: Duration,
        result: Result<Vec<Appointment>, SyncError>,
    ) {
        self.polls.lock().unwrap().push_back((delay, result));
    }

    pub(crate) fn push_reply(&self, result: Result<String, SyncError>) {
        self.replies.lock().unwrap().push_back(result);
    }

    pub(crate) fn fail_uploads(&self, error: SyncError) {
        *self.upload_error.lock().unwrap() = Some(error);
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn commands(&self) -> Vec<(String, String)> {
        self.commands.lock().unwrap().clone()
    }

    pub(crate) fn uploads(&self) -> Vec<Document> {
        self.uploads.lock().unwrap().clone()
    }

    fn interpret(&self, text: &str) -> String {
        match text.strip_prefix("delete appointment ") {
            Some(id) => {
                let id = AppointmentId::from(id);
                self.server.lock().unwrap().retain(|a| a.id != id);
                format!("Appointment {id} deleted.")
            }
            None => format!("You said: {text}"),
        }
    }
}

#[async_trait]
impl RemoteSyncClient for FakeRemote {
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, SyncError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.polls.lock().unwrap().pop_front();
        match scripted {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(self.server.lock().unwrap().clone()),
        }
    }

    async fn send_command(&self, text: &str, session_id: &SessionId) -> Result<String, SyncError> {
        self.commands
            .lock()
            .unwrap()
            .push((text.to_string(), session_id.as_str().to_string()));

        let scripted = self.replies.lock().unwrap().pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self.interpret(text)),
        }
    }

    async fn upload_document(&self, document: Document) -> Result<(), SyncError> {
        self.uploads.lock().unwrap().push(document);
        match self.upload_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
