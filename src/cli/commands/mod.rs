//! Argument parsing and command dispatch.

mod add;
mod check;
mod helpers;
mod init;
mod list;
mod serve;

use clap::{Parser, Subcommand};

use crate::config::{Settings, DEFAULT_BIND};

#[derive(Parser)]
#[command(name = "pagecheck")]
#[command(about = "Track URLs and record page checks (status code, title, h1, description)")]
#[command(version)]
pub struct Cli {
    /// Database URL or SQLite file path (overrides DATABASE_URL)
    #[arg(short, long, global = true)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Peek at the arguments for `--verbose` before clap runs, so logging
/// can be configured first.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema
    Init,
    /// Run the web server
    Serve {
        /// Bind address: a port, a host, or host:port
        #[arg(short, long, env = "BIND", default_value = DEFAULT_BIND)]
        bind: String,
    },
    /// Add a URL to track
    Add {
        /// URL to add; the scheme may be omitted
        url: String,
    },
    /// Fetch a tracked URL now and record a check
    Check {
        /// Id of the tracked URL
        id: i32,
    },
    /// List tracked URLs with their latest check
    List,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(url) = cli.database_url {
        settings.database_url = Some(url);
    }

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Add { url } => add::cmd_add(&settings, &url).await,
        Commands::Check { id } => check::cmd_check(&settings, id).await,
        Commands::List => list::cmd_list(&settings).await,
    }
}
