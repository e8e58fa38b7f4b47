mod endpoint;
mod protocol;
mod stats;
mod sync;
mod transport;

pub use endpoint::UdpTransport;
pub use protocol::{
    sequence_greater_than, Envelope, Packet, PacketError, PacketHeader, PeerId,
    PeerMessage, DEFAULT_PORT, MAX_PACKET_SIZE, PROTOCOL_MAGIC, PROTOCOL_VERSION,
};
pub use stats::{rand_u64, NetworkStats, PacketLossSimulation};
pub use sync::{NetworkSynchronizer, RemoteUpdate};
pub use transport::{LoopbackTransport, Transport, TransportError};
