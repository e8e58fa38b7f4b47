mod autopilot;
mod config;
mod runner;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use config::PeerConfig;
use duopong::{BoardConfig, PacketLossSimulation, Role};
use runner::PeerRunner;

#[derive(Parser)]
#[command(name = "duopong-peer")]
#[command(about = "Headless two-player paddle game peer")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    #[arg(short, long, default_value_t = duopong::DEFAULT_PORT)]
    port: u16,

    #[arg(short, long, help = "Address of the other peer")]
    remote: SocketAddr,

    #[arg(long, help = "Serve the first ball")]
    first: bool,

    #[arg(long, default_value_t = 800.0)]
    width: f32,

    #[arg(long, default_value_t = 600.0)]
    height: f32,

    #[arg(long, default_value_t = 80.0)]
    paddle_width: f32,

    #[arg(long, help = "Steer by dragging instead of arrow keys")]
    drag: bool,

    #[arg(long, default_value_t = 0.0, help = "Packet loss percentage (0-100)")]
    loss_percent: f32,

    #[arg(long, default_value_t = 10, help = "Seconds of silence before the peer is considered gone")]
    timeout_secs: u64,

    #[arg(long, help = "Stop after this many seconds")]
    duration_secs: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bind = format!("{}:{}", args.bind, args.port)
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid bind address {}:{}", args.bind, args.port))?;

    let board = BoardConfig {
        paddle_width: args.paddle_width,
        ..BoardConfig::with_board(args.width, args.height)
    };

    let packet_loss =
        (args.loss_percent > 0.0).then(|| PacketLossSimulation::with_loss(args.loss_percent));

    let config = PeerConfig {
        bind,
        remote: args.remote,
        role: if args.first { Role::First } else { Role::Second },
        board,
        packet_loss,
        remote_timeout: Duration::from_secs(args.timeout_secs),
        duration: args.duration_secs.map(Duration::from_secs),
        autopilot_drag: args.drag,
    };

    let mut runner = PeerRunner::new(config).context("failed to bind peer socket")?;
    log::info!(
        "peer listening on {}, remote {}",
        runner.local_addr(),
        args.remote
    );

    runner.run();
    log::info!("peer shutting down");

    Ok(())
}
