use anyhow::Result;

use crate::app::App;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(app: &App) -> Result<()> {
    let sync = app.sync_loop()?;

    let spinner = tui::create_spinner("Fetching appointments".to_string());
    // A failed poll is already recorded in the store's error flag
    let _ = sync.poll_once().await;
    spinner.finish_and_clear();

    println!("{}", app.store.snapshot().render());

    Ok(())
}
