use anyhow::Result;
use beacon_server::{RelayConfig, serve};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// WebSocket signaling relay for robot/operator teleoperation peers.
#[derive(Parser)]
#[command(name = "beacon-server", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Seconds between heartbeat probes.
    #[arg(long, default_value_t = 30)]
    heartbeat_secs: u64,

    /// Run one implicit room shared by every connection instead of
    /// per-message rooms.
    #[arg(long)]
    global_room: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = RelayConfig {
        bind: args.bind,
        heartbeat_interval: Duration::from_secs(args.heartbeat_secs),
        global_room: args.global_room.map(Into::into),
    };

    serve(config).await
}
