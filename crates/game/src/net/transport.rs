use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use super::protocol::{Envelope, PacketError, PeerId, PeerMessage};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Packet(#[from] PacketError),
    #[error("packet of {0} bytes exceeds MTU")]
    PacketTooLarge(usize),
    #[error("no remote peer address set")]
    NoRemote,
    #[error("peer disconnected")]
    Disconnected,
}

impl TransportError {
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Disconnected)
    }
}

pub trait Transport {
    fn local_id(&self) -> PeerId;

    fn broadcast(&mut self, message: &PeerMessage) -> Result<(), TransportError>;

    fn poll(&mut self) -> Result<Vec<Envelope>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn local_id(&self) -> PeerId {
        (**self).local_id()
    }

    fn broadcast(&mut self, message: &PeerMessage) -> Result<(), TransportError> {
        (**self).broadcast(message)
    }

    fn poll(&mut self) -> Result<Vec<Envelope>, TransportError> {
        (**self).poll()
    }
}

#[derive(Debug)]
struct LoopbackLink {
    queues: [VecDeque<Envelope>; 2],
    connected: bool,
}

#[derive(Debug)]
pub struct LoopbackTransport {
    id: PeerId,
    side: usize,
    link: Rc<RefCell<LoopbackLink>>,
}

impl LoopbackTransport {
    pub fn pair(first: PeerId, second: PeerId) -> (Self, Self) {
        let link = Rc::new(RefCell::new(LoopbackLink {
            queues: [VecDeque::new(), VecDeque::new()],
            connected: true,
        }));

        (
            Self {
                id: first,
                side: 0,
                link: Rc::clone(&link),
            },
            Self {
                id: second,
                side: 1,
                link,
            },
        )
    }

    pub fn disconnect(&self) {
        let mut link = self.link.borrow_mut();
        link.connected = false;
        for queue in &mut link.queues {
            queue.clear();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.link.borrow().connected
    }

    pub fn pending(&self) -> usize {
        self.link.borrow().queues[self.side].len()
    }
}

impl Transport for LoopbackTransport {
    fn local_id(&self) -> PeerId {
        self.id
    }

    fn broadcast(&mut self, message: &PeerMessage) -> Result<(), TransportError> {
        let mut link = self.link.borrow_mut();
        if !link.connected {
            return Err(TransportError::Disconnected);
        }

        link.queues[1 - self.side].push_back(Envelope {
            sender: self.id,
            message: *message,
        });
        Ok(())
    }

    fn poll(&mut self) -> Result<Vec<Envelope>, TransportError> {
        let mut link = self.link.borrow_mut();
        if !link.connected {
            return Err(TransportError::Disconnected);
        }

        Ok(link.queues[self.side].drain(..).collect())
    }
}
