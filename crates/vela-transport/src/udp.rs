//! UDP transport implementation

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use vela_core::{VelaError, VelaResult};
use vela_wire::Packet;

/// Largest UDP payload over IPv4 (65535 minus IP and UDP headers).
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// UDP endpoint for sending and receiving packets.
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
    local_addr: SocketAddr,
}

impl UdpTransport {
    /// Bind to a local address.
    pub async fn bind(addr: SocketAddr) -> VelaResult<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| VelaError::Transport(e.to_string()))?;

        let local_addr = socket
            .local_addr()
            .map_err(|e| VelaError::Transport(e.to_string()))?;

        Ok(UdpTransport {
            socket: Arc::new(socket),
            local_addr,
        })
    }

    /// Get local address.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Encode and send one packet to a destination.
    pub async fn send_to(&self, packet: &Packet, dest: SocketAddr) -> VelaResult<()> {
        let bytes = packet.to_bytes()?;
        self.send_bytes_to(&bytes, dest).await
    }

    /// Send raw, pre-encoded bytes to a destination.
    pub async fn send_bytes_to(&self, bytes: &[u8], dest: SocketAddr) -> VelaResult<()> {
        self.socket
            .send_to(bytes, dest)
            .await
            .map_err(|e| VelaError::Transport(e.to_string()))?;
        Ok(())
    }

    /// Receive and decode one packet.
    pub async fn recv_from(&self) -> VelaResult<(Packet, SocketAddr)> {
        let (buf, addr) = self.recv_bytes_from().await?;
        let packet = Packet::parse(&buf)?;
        Ok((packet, addr))
    }

    /// Receive one raw datagram.
    pub async fn recv_bytes_from(&self) -> VelaResult<(Vec<u8>, SocketAddr)> {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (len, addr) = self
            .socket
            .recv_from(&mut buf)
            .await
            .map_err(|e| VelaError::Transport(e.to_string()))?;

        buf.truncate(len);
        Ok((buf, addr))
    }

    /// Get a clone of the socket for concurrent operations.
    pub fn socket(&self) -> Arc<UdpSocket> {
        Arc::clone(&self.socket)
    }
}

/// Packet receiver channel
pub type PacketReceiver = mpsc::Receiver<(Vec<u8>, SocketAddr)>;

/// Packet sender channel
pub type PacketSender = mpsc::Sender<(Vec<u8>, SocketAddr)>;

/// Start a background receive loop feeding raw datagrams into a channel.
pub fn start_receive_loop(socket: Arc<UdpSocket>, buffer_size: usize) -> PacketReceiver {
    let (tx, rx) = mpsc::channel(buffer_size);

    tokio::spawn(async move {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        loop {
            match socket.recv_from(&mut buf).await {
                Ok((len, addr)) => {
                    let datagram = buf[..len].to_vec();
                    if tx.send((datagram, addr)).await.is_err() {
                        break; // Receiver dropped
                    }
                }
                Err(e) => {
                    tracing::warn!("UDP receive error: {}", e);
                }
            }
        }
    });

    rx
}
