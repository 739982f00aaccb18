use std::path::PathBuf;

use anyhow::Result;
use apptsync_core::{AppointmentId, StoreSnapshot};
use owo_colors::OwoColorize;
use tokio::sync::watch;

use crate::app::App;
use crate::render::Render;
use crate::utils::tui;

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq)]
enum Action {
    Say(String),
    Appointments,
    Delete(AppointmentId),
    Upload(PathBuf),
    Help,
    Quit,
    Nothing,
}

fn parse_action(line: &str) -> Action {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Action::Nothing;
    }
    if !trimmed.starts_with('/') {
        return Action::Say(line.to_string());
    }

    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (trimmed, ""),
    };

    match command {
        "/quit" | "/exit" => Action::Quit,
        "/appointments" | "/list" => Action::Appointments,
        "/delete" if !arg.is_empty() => Action::Delete(AppointmentId::from(arg)),
        "/upload" if !arg.is_empty() => Action::Upload(expand_path(arg)),
        _ => Action::Help,
    }
}

/// Paths typed at the prompt never pass through a shell.
fn expand_path(arg: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(arg).into_owned())
}

const HELP: &str = "Type a message for the assistant, or:
  /appointments    show the appointment list
  /delete <id>     ask the assistant to delete an appointment
  /upload <path>   upload a .txt, .pdf or .docx document
  /quit            leave";

pub async fn run(app: &App) -> Result<()> {
    let sync = app.sync_loop()?;
    let session = app.session();

    sync.start();
    let notifier = tokio::spawn(report_sync_errors(app.store.subscribe()));

    println!(
        "{}",
        format!(
            "Session \"{}\" on {}",
            session.session_id(),
            app.config.server_url
        )
        .dimmed()
    );
    println!("{}", HELP.dimmed());

    while let Some(line) = read_line().await? {
        match parse_action(&line) {
            Action::Nothing => {}
            Action::Quit => break,
            Action::Help => println!("{}", HELP.dimmed()),
            Action::Appointments => println!("{}", app.store.snapshot().render()),
            Action::Delete(id) => {
                let spinner = tui::create_spinner(String::new());
                let reply = session.delete_appointment(&id).await;
                spinner.finish_and_clear();
                if let Some(reply) = reply {
                    println!("{}", reply.render());
                }
            }
            Action::Upload(path) => {
                if let Err(e) = super::upload::run(app, &path).await {
                    println!("{}", e.to_string().red());
                }
            }
            Action::Say(text) => {
                let spinner = tui::create_spinner(String::new());
                let reply = session.send(&text).await;
                spinner.finish_and_clear();
                if let Some(reply) = reply {
                    println!("{}", reply.render());
                }
            }
        }
    }

    notifier.abort();
    sync.stop();
    Ok(())
}

/// Prompt for one line. `None` once input is closed.
async fn read_line() -> Result<Option<String>> {
    let prompt = tokio::task::spawn_blocking(|| {
        dialoguer::Input::<String>::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
    })
    .await?;

    match prompt {
        Ok(line) => Ok(Some(line)),
        Err(e) => {
            tracing::debug!(error = %e, "Prompt closed");
            Ok(None)
        }
    }
}

/// Print a line when polling starts failing and when it recovers.
async fn report_sync_errors(mut updates: watch::Receiver<StoreSnapshot>) {
    let mut failing = updates.borrow().error.is_some();

    while updates.changed().await.is_ok() {
        let error = updates.borrow_and_update().error.clone();
        match (failing, error) {
            (false, Some(error)) => {
                println!("{}", format!("Failed to fetch appointments: {error}").red());
                failing = true;
            }
            (true, None) => {
                println!("{}", "Appointment sync recovered".dimmed());
                failing = false;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_sent_verbatim() {
        assert_eq!(
            parse_action("  book me in for friday "),
            Action::Say("  book me in for friday ".to_string())
        );
    }

    #[test]
    fn test_blank_line_does_nothing() {
        assert_eq!(parse_action("   "), Action::Nothing);
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_action("/quit"), Action::Quit);
        assert_eq!(parse_action("/list"), Action::Appointments);
        assert_eq!(parse_action("/delete 7"), Action::Delete(AppointmentId::Int(7)));
        assert_eq!(
            parse_action("/upload /srv/docs/faq.pdf"),
            Action::Upload(PathBuf::from("/srv/docs/faq.pdf"))
        );
    }

    #[test]
    fn test_upload_path_expands_home() {
        let Action::Upload(path) = parse_action("/upload ~/docs/faq.pdf") else {
            panic!("expected an upload");
        };

        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("docs/faq.pdf"));
        assert_eq!(path, expand_path("~/docs/faq.pdf"));
    }

    #[test]
    fn test_incomplete_or_unknown_commands_show_help() {
        assert_eq!(parse_action("/delete"), Action::Help);
        assert_eq!(parse_action("/dance"), Action::Help);
    }
}
