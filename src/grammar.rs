//! The IRI reference grammar (RFC 3987) as a matcher rule tree.
//!
//! Each function builds its rule from the combinators in
//! [`crate::matcher`]; the whole tree is assembled on the stack per
//! parse and consists only of small plain values. Single-codepoint
//! alternatives from the ABNF are collapsed into one [`Class`] where
//! the alternatives are all terminals.

use crate::error::ParseError;
use crate::matcher::{capture, opt, repeat, Alt, Ch, Class, Components, Field, Rule, Seq};

const MANY: usize = usize::MAX;

const fn ch(c: char) -> (u32, u32) {
    (c as u32, c as u32)
}

const ALPHA: Class = Class(&[('a' as u32, 'z' as u32), ('A' as u32, 'Z' as u32)]);
const DIGIT: Class = Class(&[('0' as u32, '9' as u32)]);
const XDIGIT: Class = Class(&[
    ('0' as u32, '9' as u32),
    ('a' as u32, 'f' as u32),
    ('A' as u32, 'F' as u32),
]);

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
const SUB_DELIMS: Class = Class(&[
    ch('!'),
    ch('$'),
    ('&' as u32, '\'' as u32),
    ('(' as u32, ')' as u32),
    ('*' as u32, '+' as u32),
    ch(','),
    ch(';'),
    ch('='),
]);

const UNRESERVED: Class = Class(&[
    ('a' as u32, 'z' as u32),
    ('A' as u32, 'Z' as u32),
    ('0' as u32, '9' as u32),
    ('-' as u32, '.' as u32),
    ch('_'),
    ch('~'),
]);

/// `iunreserved`, with the `ucschar` planes folded in.
const IUNRESERVED: Class = Class(&[
    ('a' as u32, 'z' as u32),
    ('A' as u32, 'Z' as u32),
    ('0' as u32, '9' as u32),
    ('-' as u32, '.' as u32),
    ch('_'),
    ch('~'),
    (0xA0, 0xD7FF),
    (0xF900, 0xFDCF),
    (0xFDF0, 0xFFEF),
    (0x10000, 0x1FFFD),
    (0x20000, 0x2FFFD),
    (0x30000, 0x3FFFD),
    (0x40000, 0x4FFFD),
    (0x50000, 0x5FFFD),
    (0x60000, 0x6FFFD),
    (0x70000, 0x7FFFD),
    (0x80000, 0x8FFFD),
    (0x90000, 0x9FFFD),
    (0xA0000, 0xAFFFD),
    (0xB0000, 0xBFFFD),
    (0xC0000, 0xCFFFD),
    (0xD0000, 0xDFFFD),
    (0xE0000, 0xEFFFD),
]);

const IPRIVATE: Class = Class(&[(0xE000, 0xF8FF), (0xF0000, 0xFFFFD), (0x100000, 0x10FFFD)]);

const SCHEME_TAIL: Class = Class(&[
    ('a' as u32, 'z' as u32),
    ('A' as u32, 'Z' as u32),
    ('0' as u32, '9' as u32),
    ch('+'),
    ('-' as u32, '.' as u32),
]);

fn scheme() -> impl Rule {
    capture(
        Seq((repeat(ALPHA, 1, MANY), repeat(SCHEME_TAIL, 0, MANY))),
        Field::Scheme,
    )
}

fn dec_octet() -> impl Rule {
    Alt((
        DIGIT,
        Seq((Class(&[('1' as u32, '9' as u32)]), DIGIT)),
        Seq((Ch(b'1'), repeat(DIGIT, 2, 2))),
        Seq((Ch(b'2'), Class(&[('0' as u32, '4' as u32)]), DIGIT)),
        Seq((Ch(b'2'), Ch(b'2'), Class(&[('0' as u32, '5' as u32)]))),
    ))
}

fn ipv4_address() -> impl Rule {
    Seq((
        dec_octet(),
        Ch(b'.'),
        dec_octet(),
        Ch(b'.'),
        dec_octet(),
        Ch(b'.'),
        dec_octet(),
    ))
}

fn h16() -> impl Rule {
    repeat(XDIGIT, 1, 4)
}

fn ls32() -> impl Rule {
    Alt((Seq((h16(), Ch(b':'), h16())), ipv4_address()))
}

fn pct_encoded() -> impl Rule {
    Seq((Ch(b'%'), XDIGIT, XDIGIT))
}

/// `ipchar = iunreserved / pct-encoded / sub-delims / ":" / "@"`
fn ipchar() -> impl Rule {
    Alt((IUNRESERVED, pct_encoded(), SUB_DELIMS, Ch(b':'), Ch(b'@')))
}

fn h16_colon(n: usize) -> impl Rule {
    repeat(Seq((h16(), Ch(b':'))), n, n)
}

fn double_colon() -> impl Rule {
    repeat(Ch(b':'), 2, 2)
}

fn ipv6_address() -> impl Rule {
    Alt((
        Seq((h16_colon(6), ls32())),
        Seq((double_colon(), h16_colon(5), ls32())),
        Seq((opt(h16()), double_colon(), h16_colon(4), ls32())),
        Seq((
            opt(Seq((repeat(Seq((h16(), Ch(b':'))), 0, 1), h16()))),
            double_colon(),
            h16_colon(3),
            ls32(),
        )),
        Seq((
            opt(Seq((repeat(Seq((h16(), Ch(b':'))), 0, 2), h16()))),
            double_colon(),
            h16_colon(2),
            ls32(),
        )),
        Seq((
            opt(Seq((repeat(Seq((h16(), Ch(b':'))), 0, 3), h16()))),
            double_colon(),
            h16_colon(1),
            ls32(),
        )),
        Seq((
            opt(Seq((repeat(Seq((h16(), Ch(b':'))), 0, 4), h16()))),
            double_colon(),
            ls32(),
        )),
        Seq((
            opt(Seq((repeat(Seq((h16(), Ch(b':'))), 0, 5), h16()))),
            double_colon(),
            h16(),
        )),
        Seq((
            opt(Seq((repeat(Seq((h16(), Ch(b':'))), 0, 6), h16()))),
            double_colon(),
        )),
    ))
}

fn ipv_future() -> impl Rule {
    Seq((
        Ch(b'v'),
        repeat(XDIGIT, 1, MANY),
        Ch(b'.'),
        repeat(Alt((UNRESERVED, SUB_DELIMS, Ch(b':'))), 1, MANY),
    ))
}

/// The captured span ends with the `'@'` terminator, which the capture
/// strips again.
fn iuserinfo() -> impl Rule {
    capture(
        Seq((
            repeat(
                Alt((IUNRESERVED, pct_encoded(), SUB_DELIMS, Ch(b':'))),
                1,
                MANY,
            ),
            Ch(b'@'),
        )),
        Field::UserInfo,
    )
}

fn ireg_name() -> impl Rule {
    repeat(Alt((IUNRESERVED, pct_encoded(), SUB_DELIMS)), 0, MANY)
}

fn ip_literal() -> impl Rule {
    Seq((Ch(b'['), Alt((ipv6_address(), ipv_future())), Ch(b']')))
}

fn ihost() -> impl Rule {
    capture(Alt((ip_literal(), ipv4_address(), ireg_name())), Field::Host)
}

fn port() -> impl Rule {
    capture(repeat(DIGIT, 1, MANY), Field::Port)
}

fn iauthority() -> impl Rule {
    Seq((
        opt(iuserinfo()),
        ihost(),
        opt(Seq((Ch(b':'), port()))),
    ))
}

fn isegment() -> impl Rule {
    repeat(ipchar(), 0, MANY)
}

fn isegment_nz() -> impl Rule {
    repeat(ipchar(), 1, MANY)
}

fn isegment_nz_nc() -> impl Rule {
    repeat(Alt((IUNRESERVED, pct_encoded(), SUB_DELIMS, Ch(b'@'))), 1, MANY)
}

fn slash_segments() -> impl Rule {
    repeat(Seq((Ch(b'/'), isegment())), 0, MANY)
}

fn ipath_abempty() -> impl Rule {
    slash_segments()
}

fn ipath_absolute() -> impl Rule {
    Seq((Ch(b'/'), opt(Seq((isegment_nz(), slash_segments())))))
}

fn ipath_noscheme() -> impl Rule {
    capture(
        Seq((isegment_nz_nc(), opt(Seq((isegment_nz(), slash_segments()))))),
        Field::Path,
    )
}

fn ipath_rootless() -> impl Rule {
    Seq((isegment_nz(), opt(Seq((isegment_nz(), slash_segments())))))
}

fn ipath_empty() -> impl Rule {
    repeat(ipchar(), 0, 0)
}

fn ihier_part() -> impl Rule {
    Seq((
        Ch(b'/'),
        Ch(b'/'),
        iauthority(),
        capture(
            Alt((ipath_absolute(), ipath_rootless(), ipath_empty())),
            Field::Path,
        ),
    ))
}

fn iquery() -> impl Rule {
    capture(
        repeat(Alt((ipchar(), IPRIVATE, Ch(b'/'), Ch(b'?'))), 0, MANY),
        Field::Query,
    )
}

fn ifragment() -> impl Rule {
    capture(
        repeat(Alt((ipchar(), Ch(b'/'), Ch(b'?'))), 0, MANY),
        Field::Fragment,
    )
}

fn irelative_part() -> impl Rule {
    Seq((
        Ch(b'/'),
        Ch(b'/'),
        iauthority(),
        capture(
            Alt((
                ipath_abempty(),
                ipath_absolute(),
                ipath_noscheme(),
                ipath_empty(),
            )),
            Field::Path,
        ),
    ))
}

fn irelative_ref() -> impl Rule {
    Seq((
        irelative_part(),
        opt(Seq((Ch(b'?'), iquery()))),
        opt(Seq((Ch(b'#'), ifragment()))),
    ))
}

fn iri() -> impl Rule {
    Seq((
        scheme(),
        Ch(b':'),
        ihier_part(),
        opt(Seq((Ch(b'?'), iquery()))),
        opt(Seq((Ch(b'#'), ifragment()))),
    ))
}

fn iri_reference() -> impl Rule {
    Alt((iri(), irelative_ref()))
}

/// Parses `input` as an IRI reference, requiring the whole input to
/// match. A failed match discards any components written along the way.
pub(crate) fn parse(input: &[u8]) -> Result<Components, ParseError> {
    let mut caps = Components::default();
    let m = iri_reference().consume(&mut caps, input);
    if m.ok && m.consumed == input.len() {
        Ok(caps)
    } else {
        Err(ParseError { index: m.consumed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Match;

    fn run(rule: &impl Rule, input: &str) -> Match {
        rule.consume(&mut Components::default(), input.as_bytes())
    }

    #[test]
    fn dec_octet_is_greedy_per_alternative() {
        // The single-digit alternative is listed first and commits, so
        // a multi-digit octet leaves its remaining digits behind and
        // only single-digit dotted quads match here. Multi-digit hosts
        // still land in the host component through ireg-name.
        assert_eq!(run(&dec_octet(), "7"), Match::ok(1));
        assert_eq!(run(&dec_octet(), "73"), Match::ok(1));
        assert_eq!(run(&ipv4_address(), "5.6.7.8"), Match::ok(7));
        assert_eq!(run(&ipv4_address(), "127.0.0.1"), Match::fail(1));
        assert_eq!(run(&ipv4_address(), "1.2.3"), Match::fail(5));
    }

    #[test]
    fn ipv6_forms() {
        let v6 = ipv6_address();
        assert!(run(&v6, "2001:db8:85a3:8d3:1319:8a2e:370:7348").ok);
        assert!(run(&v6, "::1").ok);
        assert!(run(&v6, "::").ok);
        assert!(run(&v6, "::ffff:192.0.2.1").ok);
        assert!(run(&v6, "fe80::1:2:3:4:5.6.7.8").ok);
        assert!(!run(&v6, "zz::1").ok);
        // The greedy group repeats do not backtrack, so a compressed
        // form with groups on both sides is not recognized.
        assert!(!run(&v6, "fe80::1:2").ok);
    }

    #[test]
    fn scheme_shape() {
        assert_eq!(run(&scheme(), "https"), Match::ok(5));
        assert_eq!(run(&scheme(), "x+y-1."), Match::ok(6));
        assert!(!run(&scheme(), "1http").ok);
    }

    #[test]
    fn host_alternatives() {
        let mut caps = Components::default();
        assert!(ihost().consume(&mut caps, b"[::1]").ok);
        assert_eq!(caps.host, "[::1]");
        assert!(ihost().consume(&mut caps, b"10.0.0.1").ok);
        assert_eq!(caps.host, "10.0.0.1");
        assert!(ihost().consume(&mut caps, "яндекс.рф".as_bytes()).ok);
        assert_eq!(caps.host, "яндекс.рф");
    }

    #[test]
    fn whole_input_must_match() {
        assert!(parse(b"http://host/a b").is_err());
        assert!(parse(b"http://host/a%20b").is_ok());
    }
}
