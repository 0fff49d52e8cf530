use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error};

use school_days::config::CalendarConfig;
use school_days::server::ApiServer;

/// Count remaining school days and serve them as JSON
#[derive(Parser)]
#[command(name = "school-days")]
#[command(about = "Remaining school-day counter with a JSON API", long_about = None)]
struct Cli {
    /// Port for the HTTP server
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("school-days started with verbosity level: {}", cli.verbose);

    if let Err(e) = run(cli.port).await {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(port: u16) -> anyhow::Result<()> {
    let config = Arc::new(CalendarConfig::builtin()?);
    ApiServer::new(config, port).start().await
}
