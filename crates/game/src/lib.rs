pub mod ball;
pub mod color;
pub mod config;
pub mod net;
pub mod paddle;
pub mod session;

pub use ball::{BallEvent, BallPhase, BallPhysicsEngine, BallState};
pub use color::{derive_colors, BoardColor, Rgb};
pub use config::BoardConfig;
pub use net::{
    Envelope, LoopbackTransport, NetworkStats, NetworkSynchronizer, Packet, PacketError,
    PacketHeader, PacketLossSimulation, PeerId, PeerMessage, RemoteUpdate, Transport,
    TransportError, UdpTransport, DEFAULT_PORT,
};
pub use paddle::{Direction, MotionChange, PaddleController, PaddleState};
pub use session::{
    Authority, GameSession, InputEvent, InputQueue, InputSource, QueuedInput, Role, Scoreboard,
    SessionEvent, SessionSnapshot, TickTimer,
};
