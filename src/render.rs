//! TUI rendering traits for apptsync types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to apptsync-core types using owo_colors.

use apptsync_core::{Appointment, ConversationMessage, Sender, StoreSnapshot};
use chrono::Local;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ConversationMessage {
    fn render(&self) -> String {
        match self.sender {
            Sender::User => format!("{} {}", "you ›".blue().bold(), self.text),
            Sender::Agent => format!("{} {}", "agent ›".green().bold(), self.text),
        }
    }
}

impl Render for StoreSnapshot {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(error) = &self.error {
            lines.push(format!("Failed to fetch appointments: {error}").red().to_string());
        }

        lines.push(render_table(&self.appointments));

        let footer = match self.last_synced {
            Some(at) => format!(
                "Last synced {}",
                at.with_timezone(&Local).format("%H:%M:%S")
            ),
            None => "Not synced yet, showing cached appointments".to_string(),
        };
        lines.push(footer.dimmed().to_string());

        lines.join("\n")
    }
}

const HEADERS: [&str; 6] = ["ID", "Name", "Email", "Phone", "Date", "Time"];

/// Longest cell before truncation
const MAX_CELL_WIDTH: usize = 28;

fn cells(appt: &Appointment) -> [String; 6] {
    [
        appt.id.to_string(),
        appt.name.clone(),
        appt.email.clone(),
        appt.phone.clone(),
        appt.date.clone(),
        appt.time.clone(),
    ]
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Render appointments as an aligned table
pub fn render_table(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "No appointments scheduled.".dimmed().to_string();
    }

    let rows: Vec<[String; 6]> = appointments
        .iter()
        .map(|a| cells(a).map(|c| truncate(&c, MAX_CELL_WIDTH)))
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w))
        .collect::<Vec<_>>()
        .join("  ");

    let rule = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![header.bold().to_string(), rule.dimmed().to_string()];
    for row in &rows {
        lines.push(
            row.iter()
                .zip(widths)
                .map(|(cell, w)| pad(cell, w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string(),
        );
    }

    lines.join("\n")
}
