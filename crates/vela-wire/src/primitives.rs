//! Byte-level codec primitives
//!
//! Every multi-byte scalar on the wire is big-endian and every field is
//! padded to a 4-byte boundary. Readers take `(buf, index)` and perform an
//! explicit bounds check before slicing; variable-length readers return
//! `(value, bytes_consumed)` where `bytes_consumed` covers the full padded
//! span, so the caller's cursor never lands inside padding.

use bytes::BufMut;
use vela_core::{VelaError, VelaResult};

/// Byte that separates the address from the type-tag string.
pub const TAG_DIVIDER: u8 = b',';

/// Round `n` up to the next multiple of 4.
#[inline]
pub fn aligned(n: usize) -> usize {
    (n + 3) & !3
}

/// On-wire length of a NUL-padded string of `len` raw bytes.
///
/// Always at least one trailing NUL: a string whose length is already a
/// multiple of 4 gets a full extra 4-byte block.
#[inline]
pub fn padded_str_len(len: usize) -> usize {
    (len / 4 + 1) * 4
}

#[inline]
fn check(buf: &[u8], index: usize, need: usize) -> VelaResult<()> {
    let expected = index.saturating_add(need);
    if expected > buf.len() {
        return Err(VelaError::BufferTooShort {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

pub fn get_i32(buf: &[u8], index: usize) -> VelaResult<i32> {
    check(buf, index, 4)?;
    Ok(i32::from_be_bytes(buf[index..index + 4].try_into().unwrap()))
}

pub fn get_f32(buf: &[u8], index: usize) -> VelaResult<f32> {
    check(buf, index, 4)?;
    Ok(f32::from_be_bytes(buf[index..index + 4].try_into().unwrap()))
}

pub fn get_i64(buf: &[u8], index: usize) -> VelaResult<i64> {
    check(buf, index, 8)?;
    Ok(i64::from_be_bytes(buf[index..index + 8].try_into().unwrap()))
}

pub fn get_u64(buf: &[u8], index: usize) -> VelaResult<u64> {
    check(buf, index, 8)?;
    Ok(u64::from_be_bytes(buf[index..index + 8].try_into().unwrap()))
}

pub fn get_f64(buf: &[u8], index: usize) -> VelaResult<f64> {
    check(buf, index, 8)?;
    Ok(f64::from_be_bytes(buf[index..index + 8].try_into().unwrap()))
}

/// Read a 4-byte char field. The code point sits in the final byte (ASCII).
pub fn get_char(buf: &[u8], index: usize) -> VelaResult<char> {
    check(buf, index, 4)?;
    Ok(buf[index + 3] as char)
}

/// Read a raw 4-byte field (color, device-control tuple).
pub fn get_raw4(buf: &[u8], index: usize) -> VelaResult<[u8; 4]> {
    check(buf, index, 4)?;
    Ok(buf[index..index + 4].try_into().unwrap())
}

/// Read a NUL-padded string starting at `index`.
///
/// Scans forward in 4-byte chunks until a chunk ends in NUL, then returns
/// the text up to the first NUL together with the padded span length.
pub fn get_padded_str(buf: &[u8], index: usize) -> VelaResult<(String, usize)> {
    let mut i = index + 4;
    while i <= buf.len() {
        if buf[i - 1] == 0 {
            let span = &buf[index..i];
            let end = span.iter().position(|&b| b == 0).unwrap_or(span.len());
            let s = String::from_utf8_lossy(&span[..end]).into_owned();
            return Ok((s, i - index));
        }
        i += 4;
    }
    Err(VelaError::MissingTerminator("string"))
}

/// Read a length-prefixed blob starting at `index`.
///
/// Returns the payload (exactly as many bytes as the length field declares)
/// and the consumed span including the length prefix and alignment padding.
pub fn get_blob(buf: &[u8], index: usize) -> VelaResult<(Vec<u8>, usize)> {
    // A negative length reinterprets as a huge size and fails the bounds check.
    let size = get_i32(buf, index)? as u32 as usize;
    check(buf, index + 4, size)?;
    let payload = buf[index + 4..index + 4 + size].to_vec();
    Ok((payload, aligned(4 + size)))
}

/// Extract the address: everything before the first `,` byte, NULs stripped.
///
/// Returns the address and the divider's index, which must sit on a 4-byte
/// boundary.
pub fn get_address(buf: &[u8]) -> VelaResult<(String, usize)> {
    let index = buf
        .iter()
        .position(|&b| b == TAG_DIVIDER)
        .ok_or(VelaError::MalformedAddress)?;
    if index % 4 != 0 {
        return Err(VelaError::MisalignedPacket { index });
    }
    let raw: Vec<u8> = buf[..index].iter().copied().filter(|&b| b != 0).collect();
    Ok((String::from_utf8_lossy(&raw).into_owned(), index))
}

/// Extract the type-tag span starting at the divider.
///
/// Returns the whole padded span, leading comma and trailing NULs included;
/// the message decoder skips both as it iterates.
pub fn get_type_tags(buf: &[u8], index: usize) -> VelaResult<&[u8]> {
    let mut i = index + 4;
    while i <= buf.len() {
        if buf[i - 1] == 0 {
            return Ok(&buf[index..i]);
        }
        i += 4;
    }
    Err(VelaError::MissingTerminator("type-tag string"))
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

#[inline]
pub fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.put_i32(v);
}

#[inline]
pub fn put_f32(buf: &mut Vec<u8>, v: f32) {
    buf.put_f32(v);
}

#[inline]
pub fn put_i64(buf: &mut Vec<u8>, v: i64) {
    buf.put_i64(v);
}

#[inline]
pub fn put_u64(buf: &mut Vec<u8>, v: u64) {
    buf.put_u64(v);
}

#[inline]
pub fn put_f64(buf: &mut Vec<u8>, v: f64) {
    buf.put_f64(v);
}

/// Write a 4-byte char field, code point in the final byte.
pub fn put_char(buf: &mut Vec<u8>, c: char) {
    buf.put_bytes(0, 3);
    buf.put_u8(c as u8);
}

/// Write a string with its NUL padding (see [`padded_str_len`]).
pub fn put_padded_str(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    buf.extend_from_slice(bytes);
    buf.put_bytes(0, padded_str_len(bytes.len()) - bytes.len());
}

/// Write a blob: 4-byte big-endian length, payload, then 0-3 NUL bytes so
/// the whole field (length prefix included) is a multiple of 4.
pub fn put_blob(buf: &mut Vec<u8>, payload: &[u8]) {
    buf.put_i32(payload.len() as i32);
    buf.extend_from_slice(payload);
    buf.put_bytes(0, aligned(4 + payload.len()) - (4 + payload.len()));
}
