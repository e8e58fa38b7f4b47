use std::collections::HashMap;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant};

use super::protocol::{
    sequence_greater_than, Envelope, Packet, PacketHeader, PeerId, PeerMessage, MAX_PACKET_SIZE,
};
use super::stats::{rand_u64, NetworkStats, PacketLossSimulation};
use super::transport::{Transport, TransportError};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct UdpTransport {
    socket: UdpSocket,
    id: PeerId,
    local_addr: SocketAddr,
    remote_addr: Option<SocketAddr>,
    send_sequence: u32,
    last_sequence: HashMap<PeerId, u32>,
    stats: NetworkStats,
    packet_loss_sim: PacketLossSimulation,
    recv_buffer: [u8; MAX_PACKET_SIZE],
    timeout: Duration,
    last_receive_time: Option<Instant>,
}

impl UdpTransport {
    pub fn bind<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        Self::bind_with_id(addr, rand_u64())
    }

    pub fn bind_with_id<A: ToSocketAddrs>(addr: A, id: PeerId) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_nonblocking(true)?;

        let local_addr = socket.local_addr()?;

        Ok(Self {
            socket,
            id,
            local_addr,
            remote_addr: None,
            send_sequence: 0,
            last_sequence: HashMap::new(),
            stats: NetworkStats::default(),
            packet_loss_sim: PacketLossSimulation::default(),
            recv_buffer: [0u8; MAX_PACKET_SIZE],
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            last_receive_time: None,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    pub fn set_remote(&mut self, addr: SocketAddr) {
        self.remote_addr = Some(addr);
    }

    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    pub fn set_packet_loss_sim(&mut self, sim: PacketLossSimulation) {
        self.packet_loss_sim = sim;
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Only meaningful once the remote peer has been heard from at least once.
    pub fn is_timed_out(&self) -> bool {
        self.last_receive_time
            .is_some_and(|last| last.elapsed() > self.timeout)
    }

    fn next_header(&mut self) -> PacketHeader {
        let sequence = self.send_sequence;
        self.send_sequence = self.send_sequence.wrapping_add(1);
        PacketHeader::new(self.id, sequence)
    }

    fn accept(&mut self, packet: &Packet) -> bool {
        let header = &packet.header;
        if !header.is_valid() || header.sender == self.id {
            return false;
        }

        match self.last_sequence.get(&header.sender) {
            Some(&last) if !sequence_greater_than(header.sequence, last) => false,
            _ => {
                self.last_sequence.insert(header.sender, header.sequence);
                true
            }
        }
    }
}

impl Transport for UdpTransport {
    fn local_id(&self) -> PeerId {
        self.id
    }

    fn broadcast(&mut self, message: &PeerMessage) -> Result<(), TransportError> {
        let addr = self.remote_addr.ok_or(TransportError::NoRemote)?;
        let packet = Packet::new(self.next_header(), *message);

        let data = packet.serialize()?;
        if data.len() > MAX_PACKET_SIZE {
            return Err(TransportError::PacketTooLarge(data.len()));
        }

        if self.packet_loss_sim.should_drop() {
            self.stats.packets_dropped += 1;
            return Ok(());
        }

        let bytes = self.socket.send_to(&data, addr)?;

        self.stats.packets_sent += 1;
        self.stats.bytes_sent += bytes as u64;

        Ok(())
    }

    fn poll(&mut self) -> Result<Vec<Envelope>, TransportError> {
        let mut envelopes = Vec::new();

        loop {
            match self.socket.recv_from(&mut self.recv_buffer) {
                Ok((size, addr)) => {
                    let packet = match Packet::deserialize(&self.recv_buffer[..size]) {
                        Ok(packet) => packet,
                        Err(e) => {
                            log::debug!("ignoring undecodable datagram from {}: {}", addr, e);
                            self.stats.packets_rejected += 1;
                            continue;
                        }
                    };

                    if !self.accept(&packet) {
                        self.stats.packets_rejected += 1;
                        continue;
                    }

                    self.stats.packets_received += 1;
                    self.stats.bytes_received += size as u64;
                    self.last_receive_time = Some(Instant::now());

                    envelopes.push(packet.into_envelope());
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(ref e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset
                    ) =>
                {
                    return Err(TransportError::Disconnected);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if envelopes.is_empty() && self.is_timed_out() {
            return Err(TransportError::Disconnected);
        }

        Ok(envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_packet(sender: PeerId, sequence: u32) -> Packet {
        Packet::new(
            PacketHeader::new(sender, sequence),
            PeerMessage::Score { score: sequence },
        )
    }

    #[test]
    fn test_stale_and_own_packets_rejected() {
        let mut transport = UdpTransport::bind_with_id("127.0.0.1:0", 1).unwrap();

        assert!(transport.accept(&header_packet(2, 5)));
        assert!(!transport.accept(&header_packet(2, 5)));
        assert!(!transport.accept(&header_packet(2, 4)));
        assert!(transport.accept(&header_packet(2, 6)));
        assert!(!transport.accept(&header_packet(1, 100)));
    }

    #[test]
    fn test_broadcast_without_remote_fails() {
        let mut transport = UdpTransport::bind("127.0.0.1:0").unwrap();
        let err = transport
            .broadcast(&PeerMessage::Score { score: 1 })
            .unwrap_err();
        assert!(matches!(err, TransportError::NoRemote));
    }

    #[test]
    fn test_never_heard_from_is_not_timed_out() {
        let mut transport = UdpTransport::bind("127.0.0.1:0").unwrap();
        transport.set_timeout(Duration::ZERO);
        assert!(!transport.is_timed_out());
    }
}
