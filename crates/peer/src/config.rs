use std::net::SocketAddr;
use std::time::Duration;

use duopong::{BoardConfig, PacketLossSimulation, Role};

#[derive(Debug, Clone)]
pub struct PeerConfig {
    pub bind: SocketAddr,
    pub remote: SocketAddr,
    pub role: Role,
    pub board: BoardConfig,
    pub packet_loss: Option<PacketLossSimulation>,
    pub remote_timeout: Duration,
    pub duration: Option<Duration>,
    pub autopilot_drag: bool,
}

