use anyhow::Result;
use apptsync_core::{AppointmentId, appointment};
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(app: &App, id: &str) -> Result<()> {
    let id = AppointmentId::from(id);

    if appointment::find(&app.store.current(), &id).is_none() {
        println!(
            "{}",
            format!("Appointment {id} is not in the last known list, asking anyway").dimmed()
        );
    }

    let session = app.session();
    let spinner = tui::create_spinner(format!("Deleting appointment {id}"));
    let reply = session.delete_appointment(&id).await;
    spinner.finish_and_clear();

    if let Some(reply) = reply {
        println!("{}", reply.render());
    }
    println!(
        "{}",
        "The appointment list reflects this after the next sync.".dimmed()
    );

    Ok(())
}
