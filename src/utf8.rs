//! A minimal single-codepoint UTF-8 codec.
//!
//! The decoder intentionally validates no more than it needs to pick an
//! encoding length: continuation bytes are only required to be below
//! `0xC0`, and overlong or surrogate encodings are not rejected. The
//! grammar matcher and the Punycode codec both map the `consumed == 0`
//! sentinel to "could not match" / bad input.

use alloc::vec::Vec;

const CONT_MASK: u8 = 0b0011_1111;

/// Result of decoding one codepoint from the front of a byte slice.
///
/// `consumed == 0` means no codepoint could be decoded: the input was
/// empty, a multi-byte sequence was truncated, or the lead byte was not
/// recognized. It is never returned for non-empty well-formed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded codepoint value.
    pub code: u32,
    /// The number of input bytes the codepoint occupied.
    pub consumed: usize,
}

impl Decoded {
    pub(crate) const NONE: Decoded = Decoded { code: 0, consumed: 0 };
}

/// Decodes one codepoint from the front of `bytes`.
#[must_use]
pub fn decode(bytes: &[u8]) -> Decoded {
    let Some(&b1) = bytes.first() else {
        return Decoded::NONE;
    };
    if b1 < 0x80 {
        return Decoded {
            code: b1 as u32,
            consumed: 1,
        };
    }
    let Some(&b2) = bytes.get(1) else {
        return Decoded::NONE;
    };
    if b1 < 0xE0 && b2 < 0xC0 {
        return Decoded {
            code: ((b1 & 0b0001_1111) as u32) << 6 | (b2 & CONT_MASK) as u32,
            consumed: 2,
        };
    }
    let Some(&b3) = bytes.get(2) else {
        return Decoded::NONE;
    };
    if b1 < 0xF0 && b2 < 0xC0 && b3 < 0xC0 {
        let code = ((b1 & 0b0000_1111) as u32) << 12
            | ((b2 & CONT_MASK) as u32) << 6
            | (b3 & CONT_MASK) as u32;
        return Decoded { code, consumed: 3 };
    }
    let Some(&b4) = bytes.get(3) else {
        return Decoded::NONE;
    };
    if b1 < 0xF8 && b2 < 0xC0 && b3 < 0xC0 && b4 < 0xC0 {
        let code = ((b1 & 0b0000_0111) as u32) << 18
            | ((b2 & CONT_MASK) as u32) << 12
            | ((b3 & CONT_MASK) as u32) << 6
            | (b4 & CONT_MASK) as u32;
        return Decoded { code, consumed: 4 };
    }
    Decoded::NONE
}

/// Appends the UTF-8 encoding of `code` to `out`.
///
/// Returns the number of bytes written, or `0` if `code` is beyond the
/// encodable range; nothing is written in that case.
pub fn encode(code: u32, out: &mut Vec<u8>) -> usize {
    if code <= 0x7F {
        out.push(code as u8);
        1
    } else if code < 0x7FF {
        out.push((code >> 6) as u8 | 0b1100_0000);
        out.push((code as u8 & CONT_MASK) | 0b1000_0000);
        2
    } else if code < 0xFFFF {
        out.push((code >> 12) as u8 | 0b1110_0000);
        out.push(((code >> 6) as u8 & CONT_MASK) | 0b1000_0000);
        out.push((code as u8 & CONT_MASK) | 0b1000_0000);
        3
    } else if code < 0x10FFFF {
        out.push((code >> 18) as u8 | 0b1111_0000);
        out.push(((code >> 12) as u8 & CONT_MASK) | 0b1000_0000);
        out.push(((code >> 6) as u8 & CONT_MASK) | 0b1000_0000);
        out.push((code as u8 & CONT_MASK) | 0b1000_0000);
        4
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(s: &str) -> Decoded {
        decode(s.as_bytes())
    }

    #[test]
    fn decodes_each_width() {
        assert_eq!(decode_str("a"), Decoded { code: 0x61, consumed: 1 });
        assert_eq!(decode_str("я"), Decoded { code: 0x44F, consumed: 2 });
        assert_eq!(decode_str("€"), Decoded { code: 0x20AC, consumed: 3 });
        assert_eq!(decode_str("💔"), Decoded { code: 0x1F494, consumed: 4 });
        // Only the first codepoint is consumed.
        assert_eq!(decode_str("яя"), Decoded { code: 0x44F, consumed: 2 });
    }

    #[test]
    fn truncated_sequences_yield_sentinel() {
        assert_eq!(decode(b""), Decoded::NONE);
        assert_eq!(decode(b"\xD0"), Decoded::NONE);
        assert_eq!(decode(b"\xE2\x82"), Decoded::NONE);
        assert_eq!(decode(b"\xF0\x9F\x92"), Decoded::NONE);
    }

    #[test]
    fn unrecognized_lead_yields_sentinel() {
        assert_eq!(decode(b"\xFF\xFF\xFF\xFF"), Decoded::NONE);
        assert_eq!(decode(b"\xF8\x80\x80\x80"), Decoded::NONE);
    }

    #[test]
    fn lenient_continuation_bytes() {
        // The decoder does not require the 10xxxxxx continuation form;
        // any byte below 0xC0 is accepted.
        let d = decode(b"\xC3\x28");
        assert_eq!(d, Decoded { code: 0xE8, consumed: 2 });
    }

    #[test]
    fn encodes_each_width() {
        let mut out = Vec::new();
        assert_eq!(encode(0x61, &mut out), 1);
        assert_eq!(encode(0x44F, &mut out), 2);
        assert_eq!(encode(0x20AC, &mut out), 3);
        assert_eq!(encode(0x1F494, &mut out), 4);
        assert_eq!(out, "aя€💔".as_bytes());
        assert_eq!(encode(0x110000, &mut out), 0);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn round_trips() {
        for &code in &[0_u32, 0x7F, 0x80, 0x44F, 0x7FE, 0x800, 0xFFFE, 0x10000, 0x10FFFE] {
            let mut out = Vec::new();
            let n = encode(code, &mut out);
            assert!(n > 0);
            assert_eq!(decode(&out), Decoded { code, consumed: n });
        }
    }
}
