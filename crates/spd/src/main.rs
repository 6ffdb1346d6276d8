//! SearchPro Daemon - search-as-you-type suggestion server

mod handler;
mod protocol;

use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::BytesMut;
use clap::Parser;
use searchcache::SearchFilter;
use searchdata::Dataset;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

use crate::handler::SearchHandler;
use crate::protocol::{Request, Response};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1:7700")]
    bind: String,

    /// Dataset file (JSON array of {id, name} records)
    #[arg(short, long, default_value = "./data/topics.json")]
    data: String,

    /// Query cache capacity (number of cached queries)
    #[arg(short, long, default_value_t = searchcache::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Health check mode (for Docker)
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    // Health check
    if args.health {
        match TcpStream::connect(&args.bind).await {
            Ok(_) => {
                println!("OK");
                std::process::exit(0);
            }
            Err(_) => {
                eprintln!("FAILED");
                std::process::exit(1);
            }
        }
    }

    info!("Starting SearchPro Daemon v{}", env!("CARGO_PKG_VERSION"));
    info!("Binding to {}", args.bind);
    info!("Dataset file: {}", args.data);
    info!("Cache capacity: {}", args.capacity);

    let dataset = Dataset::load(&args.data)
        .with_context(|| format!("failed to load dataset from {}", args.data))?;
    if dataset.skipped() > 0 {
        warn!("Dropped {} malformed dataset entries", dataset.skipped());
    }
    info!("Dataset loaded: {} records", dataset.len());

    let filter = Arc::new(SearchFilter::new(Arc::new(dataset), args.capacity)?);

    let listener = TcpListener::bind(&args.bind).await?;
    info!("Server listening on {}", args.bind);

    println!("\nSearchPro ready on {}", args.bind);
    println!("  One command per line:");
    println!("    FIND <query>   matching records as a JSON array");
    println!("    STATS          cache counters as JSON");
    println!("    PING / CLEAR / QUIT");
    println!(
        "  Example: printf 'FIND react\\nQUIT\\n' | nc {} {}",
        args.bind.split(':').next().unwrap_or("127.0.0.1"),
        args.bind.split(':').nth(1).unwrap_or("7700")
    );
    println!("\nPress Ctrl+C to stop\n");

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let filter = Arc::clone(&filter);

                tokio::spawn(async move {
                    if let Err(e) = handle_client(stream, filter).await {
                        error!("Error handling client {}: {}", addr, e);
                    }
                    info!("Connection closed: {}", addr);
                });
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
            }
        }
    }
}

async fn handle_client(mut stream: TcpStream, filter: Arc<SearchFilter>) -> Result<()> {
    let handler = SearchHandler::new(filter);
    let mut buffer = BytesMut::with_capacity(4096);

    loop {
        // Read data from client
        let n = stream.read_buf(&mut buffer).await?;

        if n == 0 {
            // Connection closed
            return Ok(());
        }

        // Parse and handle complete lines
        loop {
            match Request::parse(&mut buffer) {
                Ok(Some(Request::Quit)) => {
                    stream.write_all(&Response::Ok.serialize()).await?;
                    return Ok(());
                }
                Ok(Some(request)) => {
                    let response = handler.handle(request);
                    stream.write_all(&response.serialize()).await?;
                }
                Ok(None) => {
                    // Need more data
                    break;
                }
                Err(e) => {
                    warn!("Parse error: {}", e);
                    let error_resp = Response::Error(e);
                    stream.write_all(&error_resp.serialize()).await?;
                    buffer.clear();
                    break;
                }
            }
        }
    }
}
