use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(app: &App, text: &str) -> Result<()> {
    let session = app.session();

    let spinner = tui::create_spinner("Waiting for the assistant".to_string());
    let reply = session.send(text).await;
    spinner.finish_and_clear();

    if reply.is_none() {
        println!("{}", "Nothing to send".dimmed());
        return Ok(());
    }

    for message in session.history() {
        println!("{}", message.render());
    }

    Ok(())
}
