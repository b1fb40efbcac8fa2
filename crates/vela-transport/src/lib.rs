//! VELA Transport Layer - UDP datagram exchange
//!
//! One datagram is one complete packet: the transport never fragments or
//! reassembles, it only moves whole buffers between the socket and the
//! codec.

pub mod udp;

pub use udp::*;
