//! The closed argument model
//!
//! Every argument a message can carry is one variant of [`Value`]; the
//! encoder maps each variant to exactly one type-tag character with an
//! exhaustive match, so an argument without a wire mapping cannot exist.

use vela_core::TimeTag;

use crate::atomics::{MidiMessage, Rgba, Symbol};

/// One argument in a message, in wire order.
///
/// `Array` may hold any other variant but not another `Array`; nesting is
/// rejected at both encode and decode time.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `i` - 32-bit signed integer
    Int(i32),
    /// `f` - 32-bit float (`I` when positive infinity)
    Float(f32),
    /// `s` - NUL-padded UTF-8 string
    String(String),
    /// `b` - length-prefixed opaque bytes
    Blob(Vec<u8>),
    /// `h` - 64-bit signed integer
    Long(i64),
    /// `t` - 64-bit fixed-point time tag
    Time(TimeTag),
    /// `d` - 64-bit float (`I` when positive infinity)
    Double(f64),
    /// `S` - atom-like string
    Symbol(Symbol),
    /// `c` - 4-byte ASCII character
    Char(char),
    /// `r` - 4-channel 8-bit color
    Color(Rgba),
    /// `m` - device-control tuple
    Midi(MidiMessage),
    /// `T` / `F` - tag-only boolean
    Bool(bool),
    /// `N` - tag-only null
    Nil,
    /// `I` - tag-only positive infinity; always decodes as `Double(f64::INFINITY)`
    Inf,
    /// `[`..`]` - single-level array of the above
    Array(Vec<Value>),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<TimeTag> for Value {
    fn from(v: TimeTag) -> Self {
        Value::Time(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<Symbol> for Value {
    fn from(v: Symbol) -> Self {
        Value::Symbol(v)
    }
}

impl From<Rgba> for Value {
    fn from(v: Rgba) -> Self {
        Value::Color(v)
    }
}

impl From<MidiMessage> for Value {
    fn from(v: MidiMessage) -> Self {
        Value::Midi(v)
    }
}
