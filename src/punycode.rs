//! Punycode bootstring codec (RFC 3492).
//!
//! The codec operates on whole strings: callers splitting a host into
//! dot-separated labels and attaching the `xn--` ACE prefix do so
//! themselves. See [`crate::Iri`] for the label-wise use.

use crate::error::PunycodeError;
use crate::utf8;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

const BASE: u32 = 36;
const TMIN: u32 = 1;
const TMAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;
const DELIMITER: u8 = b'-';

/// Bias adaptation, RFC 3492 section 6.1.
fn adapt(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    delta = if first_time { delta / DAMP } else { delta / 2 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - TMIN) * TMAX) / 2 {
        delta /= BASE - TMIN;
        k += BASE;
    }
    k + ((BASE - TMIN + 1) * delta) / (delta + SKEW)
}

fn encode_digit(d: u32) -> u8 {
    debug_assert!(d < BASE);
    if d < 26 {
        b'a' + d as u8
    } else {
        b'0' + (d - 26) as u8
    }
}

/// Returns `BASE` for bytes that are not basic code point digits.
fn decode_digit(b: u8) -> u32 {
    match b {
        b'0'..=b'9' => (b - b'0') as u32 + 26,
        b'A'..=b'Z' => (b - b'A') as u32,
        b'a'..=b'z' => (b - b'a') as u32,
        _ => BASE,
    }
}

fn decode_code_points(input: &[u8]) -> Result<Vec<u32>, PunycodeError> {
    let mut cps = Vec::with_capacity(input.len());
    let mut rest = input;
    while !rest.is_empty() {
        let d = utf8::decode(rest);
        if d.consumed == 0 {
            return Err(PunycodeError::BadInput);
        }
        cps.push(d.code);
        rest = &rest[d.consumed..];
    }
    Ok(cps)
}

fn push(out: &mut [u8], len: &mut usize, b: u8) -> Result<(), PunycodeError> {
    if *len == out.len() {
        return Err(PunycodeError::BigOutput);
    }
    out[*len] = b;
    *len += 1;
    Ok(())
}

/// Encodes UTF-8 `input` into the bootstring form, writing ASCII bytes
/// to `out` and returning the number of bytes written.
pub fn encode_into(input: &[u8], out: &mut [u8]) -> Result<usize, PunycodeError> {
    let cps = decode_code_points(input)?;
    let mut len = 0;

    for &cp in &cps {
        if cp < INITIAL_N {
            push(out, &mut len, cp as u8)?;
        }
    }
    let basic = len as u32;
    if basic > 0 {
        push(out, &mut len, DELIMITER)?;
    }

    let mut n = INITIAL_N;
    let mut delta = 0_u32;
    let mut bias = INITIAL_BIAS;
    let mut handled = basic;

    while (handled as usize) < cps.len() {
        let m = cps
            .iter()
            .copied()
            .filter(|&cp| cp >= n)
            .min()
            .unwrap_or(u32::MAX);
        delta = (m - n)
            .checked_mul(handled + 1)
            .and_then(|d| d.checked_add(delta))
            .ok_or(PunycodeError::Overflow)?;
        n = m;

        for &cp in &cps {
            if cp < n {
                delta = delta.checked_add(1).ok_or(PunycodeError::Overflow)?;
            }
            if cp == n {
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = k.saturating_sub(bias).clamp(TMIN, TMAX);
                    if q < t {
                        break;
                    }
                    push(out, &mut len, encode_digit(t + (q - t) % (BASE - t)))?;
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                push(out, &mut len, encode_digit(q))?;
                bias = adapt(delta, handled + 1, handled == basic);
                delta = 0;
                handled += 1;
            }
        }
        delta += 1;
        n += 1;
    }
    Ok(len)
}

/// Decodes bootstring `input` into code points written to `out`,
/// returning the number of code points.
pub fn decode_into(input: &[u8], out: &mut [u32]) -> Result<usize, PunycodeError> {
    let basic = input.iter().rposition(|&b| b == DELIMITER).unwrap_or(0);
    let mut len = 0;

    for &b in &input[..basic] {
        if b >= 0x80 {
            return Err(PunycodeError::BadInput);
        }
        if len == out.len() {
            return Err(PunycodeError::BigOutput);
        }
        out[len] = b as u32;
        len += 1;
    }

    let mut n = INITIAL_N;
    let mut i = 0_u32;
    let mut bias = INITIAL_BIAS;
    // Skip the delimiter if one was found.
    let mut pos = if basic > 0 { basic + 1 } else { 0 };

    while pos < input.len() {
        let old_i = i;
        let mut w = 1_u32;
        let mut k = BASE;
        loop {
            let digit = decode_digit(*input.get(pos).ok_or(PunycodeError::BadInput)?);
            pos += 1;
            if digit >= BASE {
                return Err(PunycodeError::BadInput);
            }
            i = digit
                .checked_mul(w)
                .and_then(|d| d.checked_add(i))
                .ok_or(PunycodeError::Overflow)?;
            let t = k.saturating_sub(bias).clamp(TMIN, TMAX);
            if digit < t {
                break;
            }
            w = w.checked_mul(BASE - t).ok_or(PunycodeError::Overflow)?;
            k += BASE;
        }
        let out_len = len as u32 + 1;
        bias = adapt(i - old_i, out_len, old_i == 0);
        n = n
            .checked_add(i / out_len)
            .ok_or(PunycodeError::Overflow)?;
        i %= out_len;

        if len == out.len() {
            return Err(PunycodeError::BigOutput);
        }
        out.copy_within(i as usize..len, i as usize + 1);
        out[i as usize] = n;
        len += 1;
        i += 1;
    }
    Ok(len)
}

/// Encodes UTF-8 `input` into a fresh bootstring.
pub fn encode(input: &[u8]) -> Result<String, PunycodeError> {
    // Each code point expands to at most a handful of base-36 digits;
    // a fixed multiple of the input length is always enough.
    let mut buf = vec![0; input.len() * 12 + 1];
    let len = encode_into(input, &mut buf)?;
    buf.truncate(len);
    // The bootstring alphabet is ASCII.
    String::from_utf8(buf).map_err(|_| PunycodeError::BadInput)
}

/// Decodes bootstring `input` into a fresh string.
pub fn decode(input: &[u8]) -> Result<String, PunycodeError> {
    // One code point per input byte is an upper bound.
    let mut cps = vec![0_u32; input.len()];
    let len = decode_into(input, &mut cps)?;
    let mut bytes = Vec::with_capacity(len * 4);
    for &cp in &cps[..len] {
        if utf8::encode(cp, &mut bytes) == 0 {
            return Err(PunycodeError::BadInput);
        }
    }
    String::from_utf8(bytes).map_err(|_| PunycodeError::BadInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapt_known_values() {
        assert_eq!(adapt(0, 1, true), 0);
        assert_eq!(adapt(762, 1, true), 1);
        assert_eq!(adapt(0, 2, false), 0);
        assert_eq!(adapt(100, 5, false), 22);
        assert_eq!(adapt(10000, 1, false), 67);
    }

    #[test]
    fn digits() {
        assert_eq!(encode_digit(0), b'a');
        assert_eq!(encode_digit(25), b'z');
        assert_eq!(encode_digit(26), b'0');
        assert_eq!(encode_digit(35), b'9');
        assert_eq!(decode_digit(b'a'), 0);
        assert_eq!(decode_digit(b'Z'), 25);
        assert_eq!(decode_digit(b'9'), 35);
        assert_eq!(decode_digit(b'!'), BASE);
    }

    #[test]
    fn big_output_is_reported() {
        let mut out = [0_u8; 4];
        assert_eq!(
            encode_into("почему".as_bytes(), &mut out),
            Err(PunycodeError::BigOutput)
        );
        let mut cps = [0_u32; 2];
        assert_eq!(
            decode_into(b"b1abfaaepdrnnbgefbadotcwatmq2g4l", &mut cps),
            Err(PunycodeError::BigOutput)
        );
    }
}
