//! Appointment types.
//!
//! Appointments are owned by the remote service. The client never edits a
//! field locally; it only mirrors whatever the last successful poll returned.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque appointment identifier.
///
/// The service hands out integers today, but nothing on this side depends on
/// that, so string identifiers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppointmentId {
    Int(i64),
    Text(String),
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentId::Int(id) => write!(f, "{id}"),
            AppointmentId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for AppointmentId {
    fn from(id: i64) -> Self {
        AppointmentId::Int(id)
    }
}

impl From<&str> for AppointmentId {
    /// Numeric strings become `Int` so that `delete 7` and `7` name the same appointment.
    fn from(id: &str) -> Self {
        match id.trim().parse::<i64>() {
            Ok(n) => AppointmentId::Int(n),
            Err(_) => AppointmentId::Text(id.trim().to_string()),
        }
    }
}

/// A scheduled appointment as served by `GET /appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Calendar date, `YYYY-MM-DD` when booked through the agent
    pub date: String,
    /// Time of day, free-form ("15:00", "3pm", "Not specified")
    pub time: String,
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} on {} {}", self.id, self.name, self.date, self.time)
    }
}

/// Find an appointment by id in a polled list.
pub fn find<'a>(list: &'a [Appointment], id: &AppointmentId) -> Option<&'a Appointment> {
    list.iter().find(|a| &a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_integer_and_string() {
        let ids: Vec<AppointmentId> = serde_json::from_str(r#"[7, "abc-1"]"#).unwrap();
        assert_eq!(ids[0], AppointmentId::Int(7));
        assert_eq!(ids[1], AppointmentId::Text("abc-1".to_string()));
    }

    #[test]
    fn test_id_serializes_back_to_wire_shape() {
        let json = serde_json::to_string(&vec![AppointmentId::Int(3), "x".into()]).unwrap();
        assert_eq!(json, r#"[3,"x"]"#);
    }

    #[test]
    fn test_id_from_str_prefers_integers() {
        assert_eq!(AppointmentId::from(" 12 "), AppointmentId::Int(12));
        assert_eq!(AppointmentId::from("a12"), AppointmentId::Text("a12".to_string()));
    }

    #[test]
    fn test_parse_appointment_from_service_payload() {
        let json = r#"{
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "+15551234567",
            "date": "2025-03-20",
            "time": "Not specified"
        }"#;

        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.id, AppointmentId::Int(1));
        assert_eq!(appt.time, "Not specified");
        assert_eq!(appt.to_string(), "#1 Ada on 2025-03-20 Not specified");
    }

    #[test]
    fn test_find_by_id() {
        let list = vec![crate::testing::appt(1), crate::testing::appt(2)];
        assert_eq!(find(&list, &AppointmentId::Int(2)).map(|a| a.name.as_str()), Some("Person 2"));
        assert!(find(&list, &AppointmentId::Int(3)).is_none());
    }
}
