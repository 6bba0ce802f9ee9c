use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tallypad::{api, client::LogClient, db, pad};

#[derive(Parser)]
#[command(name = "tallypad")]
#[command(about = "Keypad calculator with a persistent calculation log")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the calculation log server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Run the interactive pad against a running server
    Pad {
        /// Base URL of the log server (overrides TALLYPAD_URL)
        #[arg(long)]
        url: Option<String>,
    },
}

/// Initialize tracing with output to stderr (for pad mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tallypad=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Pad mode: log to stderr so stdout is clean for the display
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(cli.command, Some(Commands::Pad { .. }));
    init_tracing(use_stderr);

    match cli.command {
        Some(Commands::Serve { port, db }) => serve(port, db).await?,
        Some(Commands::Pad { url }) => {
            let client = match url {
                Some(url) => LogClient::new(url),
                None => LogClient::from_env(),
            };
            pad::run(client).await?;
        }
        None => serve(3000, None).await?,
    }

    Ok(())
}

async fn serve(port: u16, db_path: Option<PathBuf>) -> anyhow::Result<()> {
    tracing::info!("Starting Tallypad server on port {}", port);

    let db = match db_path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Tallypad server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
