use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(app: &App) -> Result<()> {
    let sync = app.sync_loop()?;
    let mut updates = app.store.subscribe();

    redraw(app, sync.interval());
    sync.start();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                redraw(app, sync.interval());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    sync.stop();
    Ok(())
}

fn redraw(app: &App, interval: Duration) {
    tui::clear_screen();
    println!("{}", app.store.snapshot().render());
    println!("{}", polling_notice(&app.config.server_url, interval).dimmed());
}

fn polling_notice(server_url: &str, interval: Duration) -> String {
    format!(
        "Polling {server_url} every {}. Press Ctrl-C to quit.",
        humantime::format_duration(interval)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_notice_keeps_the_whole_interval() {
        let notice = |ms| polling_notice("http://localhost:8000", Duration::from_millis(ms));

        assert_eq!(
            notice(5_000),
            "Polling http://localhost:8000 every 5s. Press Ctrl-C to quit."
        );
        assert!(notice(1_500).contains("every 1s 500ms."));
        assert!(notice(90_000).contains("every 1m 30s."));
    }
}
