use anyhow::Result;
use clap::{Parser, Subcommand};
use request_core::ApiClient;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use request_demo::ops;
use request_demo::render::{ConsoleRenderer, Render};

/// Console demo of the request-core client.
#[derive(Parser)]
#[command(name = "request-demo")]
#[command(version = "0.1.0")]
#[command(about, long_about = None)]
struct Cli {
    /// Base URL of the backend
    #[arg(short, long, default_value = "http://localhost:3000")]
    base_url: String,
    /// Logging level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET /todos
    FetchAll,
    /// POST a new todo
    Create,
    /// PATCH todo 1
    Update,
    /// DELETE todo 1
    Remove,
    /// GET /todos and /posts concurrently
    FetchConcurrent,
    /// POST with explicit Content-Type and Authorization headers
    CreateWithHeaders,
    /// GET todo 1 and upper-case its title after decoding
    FetchWithTransform,
    /// GET /todos and classify any failure by category
    FetchWithErrorClassification,
    /// GET /todos with a 100ms cancellation timer
    FetchCancelable,
    /// Run every operation in sequence
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();
    let env_filter = EnvFilter::new(args.log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    let client = ApiClient::new(&args.base_url);
    let mut out = ConsoleRenderer::stdout();

    run(&args.command, &client, &mut out).await;
    Ok(())
}

async fn run(command: &Commands, client: &ApiClient, out: &mut dyn Render) {
    match command {
        Commands::FetchAll => ops::fetch_all(client, out).await,
        Commands::Create => ops::create(client, out).await,
        Commands::Update => ops::update(client, out).await,
        Commands::Remove => ops::remove(client, out).await,
        Commands::FetchConcurrent => ops::fetch_concurrent(client, out).await,
        Commands::CreateWithHeaders => ops::create_with_headers(client, out).await,
        Commands::FetchWithTransform => ops::fetch_with_transform(client, out).await,
        Commands::FetchWithErrorClassification => {
            ops::fetch_with_error_classification(client, out).await
        }
        Commands::FetchCancelable => ops::fetch_cancelable(client, out).await,
        Commands::All => {
            // Remove goes last so the operations that target todo 1 still
            // find it.
            ops::fetch_all(client, out).await;
            ops::create(client, out).await;
            ops::update(client, out).await;
            ops::fetch_concurrent(client, out).await;
            ops::create_with_headers(client, out).await;
            ops::fetch_with_transform(client, out).await;
            ops::fetch_with_error_classification(client, out).await;
            ops::fetch_cancelable(client, out).await;
            ops::remove(client, out).await;
        }
    }
}
