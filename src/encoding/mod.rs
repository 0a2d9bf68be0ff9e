//! Table-driven percent-encoding.

mod table;

pub use table::{Table, FRAGMENT, PATH, QUERY, REG_NAME, UNRESERVED, USERINFO};

use crate::encoding::table::{HEX_TABLE, OCTET_TABLE_HI, OCTET_TABLE_LO};
use alloc::string::String;
use alloc::vec::Vec;

/// Percent-encodes `bytes` against `table`, appending to `out`.
pub fn encode_to(bytes: &[u8], table: &Table, out: &mut String) {
    // Both arms push valid ASCII, so the buffer stays valid UTF-8.
    let buf = unsafe { out.as_mut_vec() };
    buf.reserve(bytes.len());
    for &b in bytes {
        let mapped = table.get(b);
        if mapped != 0 {
            buf.push(mapped);
        } else {
            buf.push(b'%');
            buf.push(HEX_TABLE[b as usize * 2]);
            buf.push(HEX_TABLE[b as usize * 2 + 1]);
        }
    }
}

/// Percent-encodes `bytes` against `table` into a fresh string.
#[must_use]
pub fn encode(bytes: &[u8], table: &Table) -> String {
    let mut out = String::with_capacity(bytes.len());
    encode_to(bytes, table, &mut out);
    out
}

/// Decodes all percent-encoded triplets in `bytes`.
///
/// Every byte other than `'%'` is copied through unchanged. A `'%'`
/// followed by anything other than two hex digits, including a `'%'` at
/// the end of input, decodes to nothing: the `'%'` is dropped and
/// decoding resumes at the next byte.
#[must_use]
pub fn decode(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b != b'%' {
            out.push(b);
            i += 1;
            continue;
        }
        if let [hi, lo, ..] = bytes[i + 1..] {
            // 0xFF marks a non-hex digit.
            let (hi, lo) = (OCTET_TABLE_HI[hi as usize], OCTET_TABLE_LO[lo as usize]);
            if hi != 0xFF && lo != 0xFF {
                out.push(hi | lo);
                i += 3;
                continue;
            }
        }
        i += 1;
    }
    out
}
