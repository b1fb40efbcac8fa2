//! VELA Wire Protocol - Binary packet format
//!
//! This crate implements the wire format for VELA control packets:
//! - Addressed messages with an ordered, type-tagged argument list
//! - Bundles grouping messages under one fixed-point time tag
//! - Big-endian scalars, 4-byte alignment, NUL-padded strings
//!
//! Encoding and decoding are pure and stateless: each call owns its own
//! buffers and retains nothing afterwards, so independent calls from
//! multiple threads need no locking.

pub mod atomics;
pub mod bundle;
pub mod message;
pub mod packet;
pub mod primitives;
pub mod value;

pub use atomics::*;
pub use bundle::*;
pub use message::*;
pub use packet::*;
pub use value::*;
