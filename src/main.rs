//! webui-router command line.
//!
//! ```text
//! webui-router [--config FILE] [--log-level LEVEL] <COMMAND>
//!
//!   routes                 print the compiled route table
//!   resolve <PATH>...      resolve paths, one JSON object per line
//!   href <NAME> [K=V]...   build the link for a named route
//!   serve [--bind ADDR]    run the inspection server
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use webui_router::config::{load_config, RouterConfig};
use webui_router::history::HistoryBase;
use webui_router::http::{handlers, AppState, InspectServer};
use webui_router::lifecycle::{signals, Shutdown};
use webui_router::observability::init_logging;
use webui_router::routing::Params;

#[derive(Parser)]
#[command(name = "webui-router")]
#[command(about = "Route table for the web UI", long_about = None)]
struct Cli {
    /// TOML configuration file; the built-in route table is used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (overrides the configured level; RUST_LOG overrides both)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled route table
    Routes,
    /// Resolve one or more paths
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Build the link for a named route
    Href {
        name: String,
        /// Parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Run the inspection server
    Serve {
        /// Bind address (overrides server.bind_address)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    init_logging(&config.observability, cli.log_level.as_deref())?;

    let table = Arc::new(config.route_table()?);
    tracing::debug!(routes = table.len(), mode = ?config.history.mode, "Route table ready");

    let state = AppState {
        table: Arc::clone(&table),
        base: HistoryBase::from_config(&config.history),
    };

    match cli.command {
        Commands::Routes => {
            let routes = handlers::route_summaries(&state);
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Resolve { paths } => {
            for path in paths {
                let resolution = table.resolve(&path);
                println!("{}", serde_json::to_string(&resolution)?);
            }
        }
        Commands::Href { name, params } => {
            let params: Params = params.into_iter().collect();
            let path = table.href(&name, &params)?;
            println!("{}", state.base.href(&path));
        }
        Commands::Serve { bind } => {
            let mut server_config = config.server.clone();
            if let Some(bind) = bind {
                server_config.bind_address = bind;
            }

            let listener = TcpListener::bind(&server_config.bind_address).await?;
            let server = InspectServer::new(table, &config.history, server_config);

            let shutdown = Shutdown::new();
            let server_shutdown = shutdown.subscribe();
            tokio::spawn(signals::shutdown_on_signal(shutdown));

            server.run(listener, server_shutdown).await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
