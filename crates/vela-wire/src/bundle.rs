//! Bundle encode/decode
//!
//! Wire layout: the 8-byte ASCII literal `#bundle\0`, an 8-byte big-endian
//! time tag, then each message prefixed by its own 4-byte big-endian length.
//! Encoded messages are already multiples of 4, so no padding sits between
//! entries.

use vela_core::{TimeTag, VelaError, VelaResult};

use crate::message::Message;
use crate::primitives::{aligned, get_i32, get_u64, put_i32, put_u64};

/// The 8-byte bundle header literal.
pub const BUNDLE_HEADER: &[u8; 8] = b"#bundle\0";

/// Minimum decodable bundle: header literal plus time tag.
pub const MIN_BUNDLE_SIZE: usize = 16;

/// A group of messages sharing one time tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Bundle {
    pub time_tag: TimeTag,
    pub messages: Vec<Message>,
}

impl Bundle {
    pub fn new(time_tag: TimeTag, messages: Vec<Message>) -> Self {
        Bundle { time_tag, messages }
    }

    /// Bundle scheduled for immediate delivery.
    pub fn immediate(messages: Vec<Message>) -> Self {
        Bundle::new(TimeTag::IMMEDIATE, messages)
    }

    /// Encode to wire bytes. Fails only if a child message fails to encode.
    pub fn to_bytes(&self) -> VelaResult<Vec<u8>> {
        let encoded: Vec<Vec<u8>> = self
            .messages
            .iter()
            .map(Message::to_bytes)
            .collect::<VelaResult<_>>()?;

        let total = MIN_BUNDLE_SIZE + encoded.iter().map(|m| m.len() + 4).sum::<usize>();
        let mut out = Vec::with_capacity(total);

        out.extend_from_slice(BUNDLE_HEADER);
        put_u64(&mut out, self.time_tag.raw());

        for msg in &encoded {
            put_i32(&mut out, msg.len() as i32);
            out.extend_from_slice(msg);
        }

        Ok(out)
    }

    /// Decode a bundle from a complete datagram.
    pub fn parse(buf: &[u8]) -> VelaResult<Bundle> {
        if buf.len() < MIN_BUNDLE_SIZE {
            return Err(VelaError::BufferTooShort {
                expected: MIN_BUNDLE_SIZE,
                actual: buf.len(),
            });
        }
        if &buf[..8] != BUNDLE_HEADER {
            return Err(VelaError::BadBundleHeader);
        }

        let time_tag = TimeTag(get_u64(buf, 8)?);

        let mut messages = Vec::new();
        let mut index = MIN_BUNDLE_SIZE;
        while index < buf.len() {
            // A negative length reinterprets as a huge size and fails below.
            let size = get_i32(buf, index)? as u32 as usize;
            index += 4;

            let end = index.saturating_add(size);
            if end > buf.len() {
                return Err(VelaError::BufferTooShort {
                    expected: end,
                    actual: buf.len(),
                });
            }

            messages.push(Message::parse(&buf[index..end])?);
            index = aligned(end);
        }

        Ok(Bundle { time_tag, messages })
    }
}
