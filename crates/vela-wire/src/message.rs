//! Message encode/decode
//!
//! Wire layout: NUL-padded address, NUL-padded comma-prefixed type-tag
//! string, then the argument payloads concatenated in declared order.
//! Tag-only variants (`T` `F` `N` `I`) contribute no payload bytes. A
//! single-level array is framed by `[` and `]` tag characters; its elements
//! are encoded inline between them.

use vela_core::{TimeTag, VelaError, VelaResult};

use crate::atomics::{MidiMessage, Rgba, Symbol};
use crate::primitives::{
    aligned, get_address, get_blob, get_char, get_f32, get_f64, get_i32, get_i64, get_padded_str,
    get_raw4, get_type_tags, get_u64, padded_str_len, put_blob, put_char, put_f32, put_f64,
    put_i32, put_i64, put_padded_str, put_u64,
};
use crate::value::Value;

/// One control message: an address plus an ordered argument list.
///
/// The address must not contain the comma byte (0x2C), which is reserved as
/// the type-tag divider; the encoder does not validate this, matching the
/// wire format's convention that addresses are slash-delimited identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub address: String,
    pub args: Vec<Value>,
}

impl Message {
    pub fn new(address: impl Into<String>, args: Vec<Value>) -> Self {
        Message {
            address: address.into(),
            args,
        }
    }

    /// Encode to wire bytes. Fails only on a nested array.
    pub fn to_bytes(&self) -> VelaResult<Vec<u8>> {
        let mut tags = String::from(",");
        let mut payload = Vec::new();

        for arg in &self.args {
            encode_arg(arg, &mut tags, &mut payload, false)?;
        }

        let address_len = if self.address.is_empty() {
            0
        } else {
            padded_str_len(self.address.len())
        };
        let mut out = Vec::with_capacity(address_len + padded_str_len(tags.len()) + payload.len());

        if !self.address.is_empty() {
            put_padded_str(&mut out, &self.address);
        }
        put_padded_str(&mut out, &tags);
        out.extend_from_slice(&payload);

        Ok(out)
    }

    /// Decode one message from a complete datagram.
    pub fn parse(buf: &[u8]) -> VelaResult<Message> {
        let (address, divider) = get_address(buf)?;
        let tags = get_type_tags(buf, divider)?;
        let mut index = divider + tags.len();

        let mut args: Vec<Value> = Vec::new();
        // Redirect target while inside `[`..`]`; nesting is disallowed, so
        // one slot is the whole stack.
        let mut array: Option<Vec<Value>> = None;

        // tags[0] is the leading comma, trailing NULs are skipped below.
        for &tag in tags.iter().skip(1) {
            let value = match tag {
                0 => continue,

                b'i' => {
                    let v = get_i32(buf, index)?;
                    index += 4;
                    Value::Int(v)
                }
                b'f' => {
                    let v = get_f32(buf, index)?;
                    index += 4;
                    Value::Float(v)
                }
                b's' => {
                    let (s, used) = get_padded_str(buf, index)?;
                    index += used;
                    Value::String(s)
                }
                b'b' => {
                    let (payload, used) = get_blob(buf, index)?;
                    index += used;
                    Value::Blob(payload)
                }
                b'h' => {
                    let v = get_i64(buf, index)?;
                    index += 8;
                    Value::Long(v)
                }
                b't' => {
                    let v = get_u64(buf, index)?;
                    index += 8;
                    Value::Time(TimeTag(v))
                }
                b'd' => {
                    let v = get_f64(buf, index)?;
                    index += 8;
                    Value::Double(v)
                }
                b'S' => {
                    let (s, used) = get_padded_str(buf, index)?;
                    index += used;
                    Value::Symbol(Symbol(s))
                }
                b'c' => {
                    let c = get_char(buf, index)?;
                    index += 4;
                    Value::Char(c)
                }
                b'r' => {
                    let raw = get_raw4(buf, index)?;
                    index += 4;
                    Value::Color(Rgba::from_bytes(raw))
                }
                b'm' => {
                    let raw = get_raw4(buf, index)?;
                    index += 4;
                    Value::Midi(MidiMessage::from_bytes(raw))
                }

                b'T' => Value::Bool(true),
                b'F' => Value::Bool(false),
                b'N' => Value::Nil,
                // One-way: both float precisions collapse to this tag on
                // encode, and it always reconstructs a double.
                b'I' => Value::Double(f64::INFINITY),

                b'[' => {
                    if array.is_some() {
                        return Err(VelaError::UnsupportedNestedArray);
                    }
                    array = Some(Vec::new());
                    continue;
                }
                b']' => {
                    let items = array.take().ok_or(VelaError::UnmatchedArrayDelimiter)?;
                    args.push(Value::Array(items));
                    continue;
                }

                other => return Err(VelaError::UnknownTypeTag(other as char)),
            };

            match array.as_mut() {
                Some(inner) => inner.push(value),
                None => args.push(value),
            }
            index = aligned(index);
        }

        if array.is_some() {
            return Err(VelaError::UnmatchedArrayDelimiter);
        }

        Ok(Message { address, args })
    }
}

fn encode_arg(
    arg: &Value,
    tags: &mut String,
    out: &mut Vec<u8>,
    in_array: bool,
) -> VelaResult<()> {
    match arg {
        Value::Int(v) => {
            tags.push('i');
            put_i32(out, *v);
        }
        Value::Float(v) if v.is_infinite() && v.is_sign_positive() => tags.push('I'),
        Value::Float(v) => {
            tags.push('f');
            put_f32(out, *v);
        }
        Value::String(s) => {
            tags.push('s');
            put_padded_str(out, s);
        }
        Value::Blob(b) => {
            tags.push('b');
            put_blob(out, b);
        }
        Value::Long(v) => {
            tags.push('h');
            put_i64(out, *v);
        }
        Value::Time(t) => {
            tags.push('t');
            put_u64(out, t.raw());
        }
        Value::Double(v) if v.is_infinite() && v.is_sign_positive() => tags.push('I'),
        Value::Double(v) => {
            tags.push('d');
            put_f64(out, *v);
        }
        Value::Symbol(s) => {
            tags.push('S');
            put_padded_str(out, s.as_str());
        }
        Value::Char(c) => {
            tags.push('c');
            put_char(out, *c);
        }
        Value::Color(c) => {
            tags.push('r');
            out.extend_from_slice(&c.to_bytes());
        }
        Value::Midi(m) => {
            tags.push('m');
            out.extend_from_slice(&m.to_bytes());
        }
        Value::Bool(true) => tags.push('T'),
        Value::Bool(false) => tags.push('F'),
        Value::Nil => tags.push('N'),
        Value::Inf => tags.push('I'),
        Value::Array(items) => {
            if in_array {
                return Err(VelaError::UnsupportedNestedArray);
            }
            tags.push('[');
            for item in items {
                encode_arg(item, tags, out, true)?;
            }
            tags.push(']');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_byte_layout() {
        let msg = Message::new(
            "/test",
            vec![Value::Int(1000), Value::Float(1.5), Value::from("hi")],
        );
        let bytes = msg.to_bytes().unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            // "/test" padded to 8
            b'/', b't', b'e', b's', b't', 0, 0, 0,
            // ",ifs" padded to 8
            b',', b'i', b'f', b's', 0, 0, 0, 0,
            // 1000 as i32
            0x00, 0x00, 0x03, 0xE8,
            // 1.5 as f32
            0x3F, 0xC0, 0x00, 0x00,
            // "hi" padded to 4
            b'h', b'i', 0, 0,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_atomic_roundtrip() {
        let msg = Message::new(
            "/all/types",
            vec![
                Value::Int(-42),
                Value::Float(3.25),
                Value::from("control"),
                Value::Blob(vec![0xDE, 0xAD, 0xBE]),
                Value::Long(-1_000_000_000_000),
                Value::Time(TimeTag(0x0123_4567_89AB_CDEF)),
                Value::Double(-2.5),
                Value::Symbol(Symbol::new("atom")),
                Value::Char('x'),
                Value::Color(Rgba::new(1, 2, 3, 4)),
                Value::Midi(MidiMessage::new(0, 0x90, 60, 127)),
                Value::Bool(true),
                Value::Bool(false),
                Value::Nil,
            ],
        );

        let back = Message::parse(&msg.to_bytes().unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_tag_only_variants_have_no_payload() {
        let msg = Message::new(
            "/flags",
            vec![Value::Bool(true), Value::Bool(false), Value::Nil, Value::Inf],
        );
        let bytes = msg.to_bytes().unwrap();

        // "/flags" -> 8, ",TFNI" -> 8, zero payload bytes
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn test_infinity_collapses_to_double() {
        let msg = Message::new(
            "/inf",
            vec![
                Value::Float(f32::INFINITY),
                Value::Double(f64::INFINITY),
                Value::Inf,
            ],
        );
        let bytes = msg.to_bytes().unwrap();
        assert_eq!(&bytes[8..12], b",III");

        let back = Message::parse(&bytes).unwrap();
        assert_eq!(
            back.args,
            vec![
                Value::Double(f64::INFINITY),
                Value::Double(f64::INFINITY),
                Value::Double(f64::INFINITY),
            ]
        );
    }

    #[test]
    fn test_negative_infinity_is_not_collapsed() {
        let msg = Message::new("/ninf", vec![Value::Float(f32::NEG_INFINITY)]);
        let back = Message::parse(&msg.to_bytes().unwrap()).unwrap();
        assert_eq!(back.args, vec![Value::Float(f32::NEG_INFINITY)]);
    }

    #[test]
    fn test_array_roundtrip_preserves_resume_point() {
        let msg = Message::new(
            "/arr",
            vec![
                Value::Int(1),
                Value::Array(vec![Value::Int(2), Value::from("mid"), Value::Int(3)]),
                Value::Int(4),
            ],
        );
        let back = Message::parse(&msg.to_bytes().unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_empty_array_roundtrip() {
        let msg = Message::new("/arr", vec![Value::Array(vec![])]);
        let back = Message::parse(&msg.to_bytes().unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_nested_array_encode_rejected() {
        let msg = Message::new(
            "/bad",
            vec![Value::Array(vec![Value::Array(vec![Value::Int(1)])])],
        );
        assert!(matches!(
            msg.to_bytes(),
            Err(VelaError::UnsupportedNestedArray)
        ));
    }

    #[test]
    fn test_nested_array_decode_rejected() {
        // Hand-built packet whose tag string opens a second array while the
        // first redirect is still active.
        let mut buf = Vec::new();
        put_padded_str(&mut buf, "/bad");
        put_padded_str(&mut buf, ",[[");
        assert!(matches!(
            Message::parse(&buf),
            Err(VelaError::UnsupportedNestedArray)
        ));
    }

    #[test]
    fn test_stray_array_close_rejected() {
        let mut buf = Vec::new();
        put_padded_str(&mut buf, "/bad");
        put_padded_str(&mut buf, ",]");
        assert!(matches!(
            Message::parse(&buf),
            Err(VelaError::UnmatchedArrayDelimiter)
        ));
    }

    #[test]
    fn test_unclosed_array_rejected() {
        let mut buf = Vec::new();
        put_padded_str(&mut buf, "/bad");
        put_padded_str(&mut buf, ",[i");
        put_i32(&mut buf, 7);
        assert!(matches!(
            Message::parse(&buf),
            Err(VelaError::UnmatchedArrayDelimiter)
        ));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let mut buf = Vec::new();
        put_padded_str(&mut buf, "/bad");
        put_padded_str(&mut buf, ",q");
        assert!(matches!(
            Message::parse(&buf),
            Err(VelaError::UnknownTypeTag('q'))
        ));
    }

    #[test]
    fn test_truncated_scalar_rejected() {
        let mut buf = Vec::new();
        put_padded_str(&mut buf, "/cut");
        put_padded_str(&mut buf, ",i");
        buf.extend_from_slice(&[0x00, 0x01]); // two of four bytes
        assert!(matches!(
            Message::parse(&buf),
            Err(VelaError::BufferTooShort { .. })
        ));
    }

    #[test]
    fn test_missing_divider_rejected() {
        let buf = b"/no/tags\0\0\0\0";
        assert!(matches!(
            Message::parse(buf),
            Err(VelaError::MalformedAddress)
        ));
    }

    #[test]
    fn test_empty_address_roundtrip() {
        let msg = Message::new("", vec![Value::Int(5)]);
        let bytes = msg.to_bytes().unwrap();
        // No address span at all; the packet starts at the divider.
        assert_eq!(bytes[0], b',');

        let back = Message::parse(&bytes).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_aligned_string_followed_by_scalar() {
        // A 4-byte string gets a full extra NUL block; the next argument must
        // decode from beyond it.
        let msg = Message::new("/s", vec![Value::from("abcd"), Value::Int(9)]);
        let back = Message::parse(&msg.to_bytes().unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    fn atomic_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i32>().prop_map(Value::Int),
            (-1.0e6f32..1.0e6).prop_map(Value::Float),
            "[a-zA-Z0-9/_ ]{0,24}".prop_map(Value::from),
            proptest::collection::vec(any::<u8>(), 0..32).prop_map(Value::Blob),
            any::<i64>().prop_map(Value::Long),
            any::<u64>().prop_map(|v| Value::Time(TimeTag(v))),
            (-1.0e9f64..1.0e9).prop_map(Value::Double),
            "[a-zA-Z]{1,12}".prop_map(|s| Value::Symbol(Symbol(s))),
            (32u8..127).prop_map(|b| Value::Char(b as char)),
            any::<[u8; 4]>().prop_map(|b| Value::Color(Rgba::from_bytes(b))),
            any::<[u8; 4]>().prop_map(|b| Value::Midi(MidiMessage::from_bytes(b))),
            any::<bool>().prop_map(Value::Bool),
            Just(Value::Nil),
        ]
    }

    proptest! {
        #[test]
        fn prop_message_roundtrip(
            address in "/[a-z]{1,8}(/[a-z]{1,8}){0,2}",
            args in proptest::collection::vec(atomic_value(), 0..8),
        ) {
            let msg = Message::new(address, args);
            let bytes = msg.to_bytes().unwrap();

            prop_assert_eq!(bytes.len() % 4, 0);

            let back = Message::parse(&bytes).unwrap();
            prop_assert_eq!(back, msg);
        }

        #[test]
        fn prop_single_level_array_roundtrip(
            items in proptest::collection::vec(atomic_value(), 0..6),
        ) {
            let msg = Message::new("/arr", vec![Value::Array(items)]);
            let back = Message::parse(&msg.to_bytes().unwrap()).unwrap();
            prop_assert_eq!(back, msg);
        }
    }
}
