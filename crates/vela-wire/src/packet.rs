//! Packet abstraction
//!
//! A packet is either a single message or a bundle; the transport only ever
//! sees the uniform `to_bytes` / `parse` pair. One UDP datagram carries one
//! complete packet.

use vela_core::{VelaError, VelaResult};

use crate::bundle::Bundle;
use crate::message::Message;

/// One complete datagram payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    Message(Message),
    Bundle(Bundle),
}

impl Packet {
    /// Encode to wire bytes.
    pub fn to_bytes(&self) -> VelaResult<Vec<u8>> {
        match self {
            Packet::Message(msg) => msg.to_bytes(),
            Packet::Bundle(bundle) => bundle.to_bytes(),
        }
    }

    /// Decode a received datagram. A leading `#` selects the bundle decoder,
    /// anything else is parsed as a message.
    pub fn parse(buf: &[u8]) -> VelaResult<Packet> {
        match buf.first() {
            Some(&b'#') => Ok(Packet::Bundle(Bundle::parse(buf)?)),
            Some(_) => Ok(Packet::Message(Message::parse(buf)?)),
            None => Err(VelaError::BufferTooShort {
                expected: 1,
                actual: 0,
            }),
        }
    }
}

impl From<Message> for Packet {
    fn from(msg: Message) -> Self {
        Packet::Message(msg)
    }
}

impl From<Bundle> for Packet {
    fn from(bundle: Bundle) -> Self {
        Packet::Bundle(bundle)
    }
}
