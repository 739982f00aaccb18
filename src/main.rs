mod app;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[derive(Parser)]
#[command(name = "apptsync")]
#[command(about = "Chat with your appointment assistant and keep a live copy of your appointments")]
struct Cli {
    /// Appointment service URL (overrides server_url from config.toml)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Log sync activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch appointments once and print them
    List,
    /// Keep polling and redraw the appointment list on every change
    Watch,
    /// Interactive conversation, with appointments syncing in the background
    Chat,
    /// Send a single message to the assistant
    Send {
        /// Message text, e.g. "book me for next Monday at 3pm"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Ask the assistant to delete an appointment
    Delete {
        /// Appointment ID as shown by `apptsync list`
        id: String,
    },
    /// Upload a .txt, .pdf or .docx document for the assistant to read
    Upload {
        path: std::path::PathBuf,
    },
    /// Show config and cache locations
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Config = cli.command {
        return commands::config::run(cli.server);
    }

    let app = App::load(cli.server)?;

    match cli.command {
        Commands::List => commands::list::run(&app).await,
        Commands::Watch => commands::watch::run(&app).await,
        Commands::Chat => commands::chat::run(&app).await,
        Commands::Send { text } => commands::send::run(&app, &text.join(" ")).await,
        Commands::Delete { id } => commands::delete::run(&app, &id).await,
        Commands::Upload { path } => commands::upload::run(&app, &path).await.map(|_| ()),
        Commands::Config => Ok(()),
    }
}

/// Logs go to stderr so tables and transcripts on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("APPTSYNC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
