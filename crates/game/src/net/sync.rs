use crate::ball::BallState;
use crate::color::{BoardColor, Rgb};
use crate::paddle::PaddleState;

use super::protocol::{Envelope, PeerId, PeerMessage};
use super::transport::{Transport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteUpdate {
    Score(u32),
    Background(Rgb),
    Font(Rgb),
    Ball(BallState),
    Paddle(PaddleState),
}

impl From<PeerMessage> for RemoteUpdate {
    fn from(message: PeerMessage) -> Self {
        match message {
            PeerMessage::Score { score } => Self::Score(score),
            PeerMessage::BgColor { color } => Self::Background(color),
            PeerMessage::FontColor { color } => Self::Font(color),
            PeerMessage::CrossSeparator { position, velocity } => {
                Self::Ball(BallState::new(position.into(), velocity.into()))
            }
            PeerMessage::PaddlePosition { x, x1, delta_x } => {
                Self::Paddle(PaddleState { x, x1, delta_x })
            }
        }
    }
}

pub struct NetworkSynchronizer<T> {
    transport: T,
    remote: Option<PeerId>,
}

impl<T: Transport> NetworkSynchronizer<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            remote: None,
        }
    }

    pub fn remote_id(&self) -> Option<PeerId> {
        self.remote
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn announce_colors(&mut self, colors: &BoardColor) -> Result<(), TransportError> {
        self.send(PeerMessage::BgColor {
            color: colors.background,
        })?;
        self.send(PeerMessage::FontColor { color: colors.font })
    }

    pub fn announce_score(&mut self, score: u32) -> Result<(), TransportError> {
        self.send(PeerMessage::Score { score })
    }

    pub fn announce_handoff(&mut self, ball: &BallState) -> Result<(), TransportError> {
        self.send(PeerMessage::cross_separator(ball))
    }

    pub fn announce_paddle(&mut self, paddle: &PaddleState) -> Result<(), TransportError> {
        self.send(PeerMessage::paddle_position(paddle))
    }

    pub fn receive(&mut self) -> Result<Vec<RemoteUpdate>, TransportError> {
        let envelopes = self.transport.poll()?;
        Ok(envelopes
            .into_iter()
            .filter(|envelope| self.admit(envelope))
            .map(|envelope| {
                log::debug!(
                    "received {} from {}",
                    envelope.message.event_name(),
                    envelope.sender
                );
                RemoteUpdate::from(envelope.message)
            })
            .collect())
    }

    fn admit(&mut self, envelope: &Envelope) -> bool {
        match self.remote {
            Some(remote) if remote != envelope.sender => {
                log::warn!(
                    "ignoring {} from third peer {}",
                    envelope.message.event_name(),
                    envelope.sender
                );
                false
            }
            Some(_) => true,
            None => {
                log::info!("paired with peer {}", envelope.sender);
                self.remote = Some(envelope.sender);
                true
            }
        }
    }

    fn send(&mut self, message: PeerMessage) -> Result<(), TransportError> {
        match self.transport.broadcast(&message) {
            Ok(()) => Ok(()),
            Err(e) if e.is_disconnect() => Err(e),
            Err(e) => {
                log::warn!("dropping {}: {}", message.event_name(), e);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::net::LoopbackTransport;

    #[test]
    fn test_colors_go_out_as_two_messages() {
        let (a, mut b) = LoopbackTransport::pair(1, 2);
        let mut sync = NetworkSynchronizer::new(a);

        let colors = BoardColor {
            background: Rgb::new(10, 20, 30),
            font: Rgb::WHITE,
        };
        sync.announce_colors(&colors).unwrap();

        let received: Vec<_> = b.poll().unwrap().into_iter().map(|e| e.message).collect();
        assert_eq!(
            received,
            vec![
                PeerMessage::BgColor {
                    color: Rgb::new(10, 20, 30)
                },
                PeerMessage::FontColor { color: Rgb::WHITE },
            ]
        );
    }

    #[test]
    fn test_inbound_decodes_to_updates() {
        let (a, b) = LoopbackTransport::pair(1, 2);
        let mut sender = NetworkSynchronizer::new(a);
        let mut receiver = NetworkSynchronizer::new(b);

        let ball = BallState::new(Vec2::new(5.0, 6.0), Vec2::new(-1.0, -2.0));
        sender.announce_handoff(&ball).unwrap();
        sender.announce_score(3).unwrap();

        let updates = receiver.receive().unwrap();
        assert_eq!(updates, vec![RemoteUpdate::Ball(ball), RemoteUpdate::Score(3)]);
        assert_eq!(receiver.remote_id(), Some(1));
    }

    struct ScriptedTransport {
        inbox: Vec<Envelope>,
    }

    impl Transport for ScriptedTransport {
        fn local_id(&self) -> PeerId {
            2
        }

        fn broadcast(&mut self, _message: &PeerMessage) -> Result<(), TransportError> {
            Ok(())
        }

        fn poll(&mut self) -> Result<Vec<Envelope>, TransportError> {
            Ok(std::mem::take(&mut self.inbox))
        }
    }

    #[test]
    fn test_third_sender_is_ignored() {
        let envelope = |sender, score| Envelope {
            sender,
            message: PeerMessage::Score { score },
        };
        let mut sync = NetworkSynchronizer::new(ScriptedTransport {
            inbox: vec![envelope(1, 1), envelope(7, 5), envelope(1, 2)],
        });

        let updates = sync.receive().unwrap();
        assert_eq!(updates, vec![RemoteUpdate::Score(1), RemoteUpdate::Score(2)]);
        assert_eq!(sync.remote_id(), Some(1));

        sync.transport.inbox = vec![envelope(7, 9)];
        assert!(sync.receive().unwrap().is_empty());
    }

    #[test]
    fn test_lost_connection_surfaces_on_send() {
        let (a, b) = LoopbackTransport::pair(1, 2);
        let mut sync = NetworkSynchronizer::new(a);
        b.disconnect();

        let err = sync.announce_score(1).unwrap_err();
        assert!(err.is_disconnect());
    }
}
