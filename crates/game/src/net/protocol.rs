use glam::Vec2;
use rkyv::util::AlignedVec;
use rkyv::{rancor, Archive, Deserialize, Serialize};

use crate::ball::BallState;
use crate::color::Rgb;
use crate::paddle::PaddleState;

pub const MAX_PACKET_SIZE: usize = 1200;
pub const PROTOCOL_VERSION: u32 = 1;
pub const PROTOCOL_MAGIC: u32 = 0x504F4E47;
pub const DEFAULT_PORT: u16 = 27016;

const SEQUENCE_WRAP_THRESHOLD: u32 = u32::MAX / 2;

pub type PeerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq), derive(Debug))]
pub struct PacketHeader {
    pub magic: u32,
    pub version: u32,
    pub sender: PeerId,
    pub sequence: u32,
}

impl PacketHeader {
    pub fn new(sender: PeerId, sequence: u32) -> Self {
        Self {
            magic: PROTOCOL_MAGIC,
            version: PROTOCOL_VERSION,
            sender,
            sequence,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == PROTOCOL_MAGIC && self.version == PROTOCOL_VERSION
    }
}

#[inline]
pub fn sequence_greater_than(s1: u32, s2: u32) -> bool {
    ((s1 > s2) && (s1 - s2 <= SEQUENCE_WRAP_THRESHOLD))
        || ((s1 < s2) && (s2 - s1 > SEQUENCE_WRAP_THRESHOLD))
}

#[derive(Debug, Clone, Copy, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub enum PeerMessage {
    Score { score: u32 },
    BgColor { color: Rgb },
    FontColor { color: Rgb },
    CrossSeparator { position: [f32; 2], velocity: [f32; 2] },
    PaddlePosition { x: f32, x1: f32, delta_x: f32 },
}

impl PeerMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Score { .. } => "score",
            Self::BgColor { .. } => "bgColor",
            Self::FontColor { .. } => "fontColor",
            Self::CrossSeparator { .. } => "crossSeparator",
            Self::PaddlePosition { .. } => "paddlePosition",
        }
    }

    pub fn cross_separator(ball: &BallState) -> Self {
        Self::CrossSeparator {
            position: ball.position.into(),
            velocity: ball.velocity.into(),
        }
    }

    pub fn paddle_position(paddle: &PaddleState) -> Self {
        Self::PaddlePosition {
            x: paddle.x,
            x1: paddle.x1,
            delta_x: paddle.delta_x,
        }
    }

    pub fn ball_state(&self) -> Option<BallState> {
        match self {
            Self::CrossSeparator { position, velocity } => Some(BallState::new(
                Vec2::from_array(*position),
                Vec2::from_array(*velocity),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub sender: PeerId,
    pub message: PeerMessage,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct Packet {
    pub header: PacketHeader,
    pub payload: PeerMessage,
}

#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    #[error("serialization failed: {0}")]
    Serialize(rancor::Error),
    #[error("deserialization failed: {0}")]
    Deserialize(rancor::Error),
}

impl Packet {
    pub fn new(header: PacketHeader, payload: PeerMessage) -> Self {
        Self { header, payload }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, PacketError> {
        rkyv::to_bytes::<rancor::Error>(self)
            .map(|aligned| aligned.into_vec())
            .map_err(PacketError::Serialize)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, PacketError> {
        // Receive buffers carry no alignment guarantee.
        let mut aligned = AlignedVec::<16>::with_capacity(data.len());
        aligned.extend_from_slice(data);
        rkyv::from_bytes::<Self, rancor::Error>(&aligned).map_err(PacketError::Deserialize)
    }

    pub fn into_envelope(self) -> Envelope {
        Envelope {
            sender: self.header.sender,
            message: self.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_comparison() {
        assert!(sequence_greater_than(2, 1));
        assert!(!sequence_greater_than(1, 2));
        assert!(!sequence_greater_than(1, 1));
        assert!(sequence_greater_than(0, u32::MAX));
        assert!(!sequence_greater_than(u32::MAX, 0));
    }

    #[test]
    fn test_packet_serialization() {
        let ball = BallState::new(Vec2::new(120.0, 575.5), Vec2::new(-2.0, 10.0));
        let packet = Packet::new(PacketHeader::new(7, 3), PeerMessage::cross_separator(&ball));

        let serialized = packet.serialize().unwrap();
        let deserialized = Packet::deserialize(&serialized).unwrap();

        assert_eq!(packet.header, deserialized.header);
        assert!(deserialized.header.is_valid());
        assert_eq!(deserialized.payload.ball_state(), Some(ball));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(Packet::deserialize(&[0xFF; 16]).is_err());
    }

    #[test]
    fn test_event_names() {
        let paddle = PaddleState::new(10.0, 80.0);
        assert_eq!(PeerMessage::paddle_position(&paddle).event_name(), "paddlePosition");
        assert_eq!(PeerMessage::Score { score: 1 }.event_name(), "score");
        assert_eq!(
            PeerMessage::FontColor { color: Rgb::WHITE }.event_name(),
            "fontColor"
        );
    }
}
