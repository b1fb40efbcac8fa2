//! Auxiliary fixed-width argument types
//!
//! Each type compares equal to another instance of itself and, as a
//! documented secondary contract, to a raw byte sequence of matching wire
//! layout (`[u8; 4]` for the fixed-width pair, `str` for [`Symbol`]). The
//! byte-layout comparison is an explicit extra impl, not a blanket coercion.

/// Atom-like string, encoded with the same NUL padding as a plain string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Symbol(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Symbol {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 4-channel 8-bit color, exactly 4 raw bytes on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_bytes(raw: [u8; 4]) -> Self {
        Rgba {
            r: raw[0],
            g: raw[1],
            b: raw[2],
            a: raw[3],
        }
    }
}

impl PartialEq<[u8; 4]> for Rgba {
    #[inline]
    fn eq(&self, other: &[u8; 4]) -> bool {
        self.to_bytes() == *other
    }
}

/// 4-byte device-control tuple: port, status, and two data bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MidiMessage {
    pub port: u8,
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    pub fn new(port: u8, status: u8, data1: u8, data2: u8) -> Self {
        MidiMessage {
            port,
            status,
            data1,
            data2,
        }
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.port, self.status, self.data1, self.data2]
    }

    #[inline]
    pub fn from_bytes(raw: [u8; 4]) -> Self {
        MidiMessage {
            port: raw[0],
            status: raw[1],
            data1: raw[2],
            data2: raw[3],
        }
    }
}

impl PartialEq<[u8; 4]> for MidiMessage {
    #[inline]
    fn eq(&self, other: &[u8; 4]) -> bool {
        self.to_bytes() == *other
    }
}
