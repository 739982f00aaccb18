use std::path::Path;

use anyhow::{Context, Result};
use apptsync_core::Document;
use apptsync_core::upload::{is_accepted, upload_with_status};
use owo_colors::OwoColorize;

use crate::app::App;
use crate::utils::tui;

/// Upload a document and print the status line. Returns whether it succeeded.
pub async fn run(app: &App, path: &Path) -> Result<bool> {
    let document = Document::read(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))?;

    if !is_accepted(&document) {
        anyhow::bail!("Only .txt, .pdf, or .docx files are supported.");
    }

    let spinner = tui::create_spinner(format!("Uploading {}", document.file_name));
    let mut status = String::new();
    let ok = upload_with_status(app.remote.as_ref(), document, |s| status = s.to_string()).await;
    spinner.finish_and_clear();

    if ok {
        println!("{}", status.green());
    } else {
        println!("{}", status.red());
    }

    Ok(ok)
}
