//! Byte classification tables for percent-encoding.

/// A 256-entry table directing the percent-encoder.
///
/// Each entry is the byte to emit verbatim for that input byte, or `0`
/// meaning the input byte must be percent-encoded. Tables are built in
/// `const` context and composed with [`or`](Self::or), so each component
/// table is a single static array with no startup cost.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    arr: [u8; 256],
}

impl Table {
    /// An empty table that percent-encodes every byte.
    pub const fn new() -> Table {
        Table { arr: [0; 256] }
    }

    /// Marks the given bytes as passed through unchanged.
    ///
    /// # Panics
    ///
    /// Panics if a byte is not ASCII; the encoder's output must stay
    /// valid UTF-8.
    pub const fn allow(mut self, mut bytes: &[u8]) -> Table {
        while let [b, rest @ ..] = bytes {
            assert!(b.is_ascii());
            self.arr[*b as usize] = *b;
            bytes = rest;
        }
        self
    }

    /// Marks an inclusive range of bytes as passed through unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the range reaches beyond ASCII.
    pub const fn allow_range(mut self, lo: u8, hi: u8) -> Table {
        assert!(hi.is_ascii());
        let mut b = lo;
        loop {
            self.arr[b as usize] = b;
            if b == hi {
                break;
            }
            b += 1;
        }
        self
    }

    /// Takes the union of two tables.
    ///
    /// Where both tables pass a byte through, `other` wins, so
    /// substitutions made with [`replace`](Self::replace) survive.
    pub const fn or(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            if other.arr[i] != 0 {
                self.arr[i] = other.arr[i];
            }
            i += 1;
        }
        self
    }

    /// Substitutes `to` for `from` instead of percent-encoding it.
    ///
    /// This covers encodings that deviate from RFC 3986, such as the
    /// `application/x-www-form-urlencoded` space-to-plus rule.
    ///
    /// # Panics
    ///
    /// Panics if `to` is not ASCII.
    pub const fn replace(mut self, from: u8, to: u8) -> Table {
        assert!(to.is_ascii());
        self.arr[from as usize] = to;
        self
    }

    /// Returns whether `b` escapes percent-encoding.
    #[must_use]
    pub const fn allows(&self, b: u8) -> bool {
        self.arr[b as usize] != 0
    }

    pub(crate) const fn get(&self, b: u8) -> u8 {
        self.arr[b as usize]
    }
}

impl Default for Table {
    fn default() -> Table {
        Table::new()
    }
}

const ALPHA: Table = Table::new().allow_range(b'A', b'Z').allow_range(b'a', b'z');
const DIGIT: Table = Table::new().allow_range(b'0', b'9');

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
///
/// All component tables additionally pass `'%'` through, so text that
/// already contains percent-encoded triplets is not encoded twice.
pub const UNRESERVED: Table = ALPHA.or(&DIGIT).allow(b"-._~%");

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: Table = UNRESERVED.allow(b"!$&'()*+,;=:");

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: Table = UNRESERVED.allow(b"!$&'()*+,;=");

/// `pchar` plus the path segment separator.
pub const PATH: Table = USERINFO.allow(b"/@");

/// `query = *( pchar / "/" / "?" )`
pub const QUERY: Table = PATH.allow(b"?");

/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT: Table = QUERY;

const fn gen_hex_table() -> [u8; 512] {
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = [0; 512];
    let mut i = 0;
    while i < 256 {
        out[i * 2] = HEX_DIGITS[i >> 4];
        out[i * 2 + 1] = HEX_DIGITS[i & 0b1111];
        i += 1;
    }
    out
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xFF; 256];
    let mut i = 0;
    while i < 16 {
        let v = if hi { (i as u8) << 4 } else { i as u8 };
        out[HEX_CHARS[i] as usize] = v;
        if i >= 10 {
            out[HEX_CHARS[i].to_ascii_lowercase() as usize] = v;
        }
        i += 1;
    }
    out
}

const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// The two uppercase hex digits for each byte value, concatenated.
pub(crate) const HEX_TABLE: [u8; 512] = gen_hex_table();

/// Hex digit to high nibble, `0xFF` for non-digits.
pub(crate) const OCTET_TABLE_HI: [u8; 256] = gen_octet_table(true);

/// Hex digit to low nibble, `0xFF` for non-digits.
pub(crate) const OCTET_TABLE_LO: [u8; 256] = gen_octet_table(false);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_tables() {
        assert!(UNRESERVED.allows(b'a'));
        assert!(UNRESERVED.allows(b'~'));
        assert!(UNRESERVED.allows(b'%'));
        assert!(!UNRESERVED.allows(b':'));
        assert!(USERINFO.allows(b':'));
        assert!(!USERINFO.allows(b'/'));
        assert!(!USERINFO.allows(b'@'));
        assert!(PATH.allows(b'/'));
        assert!(!PATH.allows(b'?'));
        assert!(QUERY.allows(b'?'));
        assert!(!QUERY.allows(b'#'));
        assert!(!QUERY.allows(b' '));
    }

    #[test]
    fn replace_survives_union() {
        let form = QUERY.replace(b' ', b'+');
        assert!(form.allows(b' '));
        assert_eq!(form.get(b' '), b'+');
        assert_eq!(form.or(&Table::new()).get(b' '), b'+');
    }

    #[test]
    fn hex_tables_agree() {
        for b in 0..=255_u8 {
            let hi = HEX_TABLE[b as usize * 2];
            let lo = HEX_TABLE[b as usize * 2 + 1];
            assert_eq!(OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize], b);
        }
        assert_eq!(OCTET_TABLE_LO[b'g' as usize], 0xFF);
        assert_eq!(OCTET_TABLE_HI[b'%' as usize], 0xFF);
    }
}
