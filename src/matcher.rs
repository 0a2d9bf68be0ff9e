//! Backtracking grammar matcher primitives.
//!
//! A grammar is a tree of [`Rule`] values built from the combinators in
//! this module, fully known at compile time so every `consume` call
//! monomorphizes into straight-line code. Matching is greedy with
//! backtracking at alternatives: a failed [`Match`] reports how far the
//! rule got for diagnostics, and the caller retries alternatives from
//! the position it started at.
//!
//! Captures write through to [`Components`] as soon as the captured
//! subrule succeeds, even inside a branch that is later abandoned. The
//! grammar is arranged so that the winning branch always writes last,
//! and a failed top-level match discards the components entirely.

use crate::utf8;
use alloc::string::String;

/// The outcome of applying a rule to the front of an input slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Match {
    /// Bytes consumed; on failure this is partial progress, and the
    /// caller must restart from its original position.
    pub consumed: usize,
    pub ok: bool,
}

impl Match {
    pub(crate) const fn ok(consumed: usize) -> Match {
        Match { consumed, ok: true }
    }

    pub(crate) const fn fail(consumed: usize) -> Match {
        Match { consumed, ok: false }
    }
}

/// The parsed components of an IRI reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Components {
    pub scheme: String,
    pub user_info: String,
    pub host: String,
    /// `0` means no port was present.
    pub port: u16,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

/// Names the component a [`Capture`] writes to.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Field {
    Scheme,
    UserInfo,
    Host,
    Port,
    Path,
    Query,
    Fragment,
}

impl Components {
    fn set(&mut self, field: Field, bytes: &[u8]) {
        match field {
            Field::Scheme => self.scheme = lossy(bytes),
            // The matched span includes the trailing '@' terminator.
            Field::UserInfo => self.user_info = lossy(bytes.strip_suffix(b"@").unwrap_or(bytes)),
            Field::Host => self.host = lossy(bytes),
            Field::Port => {
                let mut port = 0_u16;
                for &b in bytes {
                    port = port.wrapping_mul(10).wrapping_add((b - b'0') as u16);
                }
                self.port = port;
            }
            Field::Path => self.path = lossy(bytes),
            Field::Query => self.query = lossy(bytes),
            Field::Fragment => self.fragment = lossy(bytes),
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// A grammar rule that consumes a prefix of the input.
pub(crate) trait Rule {
    fn consume(&self, caps: &mut Components, input: &[u8]) -> Match;
}

/// Matches one literal byte.
#[derive(Clone, Copy)]
pub(crate) struct Ch(pub u8);

impl Rule for Ch {
    fn consume(&self, _caps: &mut Components, input: &[u8]) -> Match {
        match input.first() {
            Some(&b) if b == self.0 => Match::ok(1),
            _ => Match::fail(0),
        }
    }
}

/// Matches one codepoint falling in any of the inclusive ranges.
#[derive(Clone, Copy)]
pub(crate) struct Class(pub &'static [(u32, u32)]);

impl Rule for Class {
    fn consume(&self, _caps: &mut Components, input: &[u8]) -> Match {
        let d = utf8::decode(input);
        if d.consumed != 0 && self.0.iter().any(|&(lo, hi)| (lo..=hi).contains(&d.code)) {
            Match::ok(d.consumed)
        } else {
            Match::fail(0)
        }
    }
}

/// Matches `rule` greedily between `min` and `max` times.
#[derive(Clone, Copy)]
pub(crate) struct Repeat<R> {
    rule: R,
    min: usize,
    max: usize,
}

pub(crate) fn repeat<R: Rule>(rule: R, min: usize, max: usize) -> Repeat<R> {
    Repeat { rule, min, max }
}

/// Matches `rule` zero or one time.
pub(crate) fn opt<R: Rule>(rule: R) -> Repeat<R> {
    repeat(rule, 0, 1)
}

impl<R: Rule> Rule for Repeat<R> {
    fn consume(&self, caps: &mut Components, input: &[u8]) -> Match {
        let mut total = 0;
        let mut count = 0;
        while count < self.max {
            let m = self.rule.consume(caps, &input[total..]);
            if !m.ok || m.consumed == 0 {
                break;
            }
            total += m.consumed;
            count += 1;
        }
        Match {
            consumed: total,
            ok: count >= self.min,
        }
    }
}

/// Matches a tuple of rules in order.
#[derive(Clone, Copy)]
pub(crate) struct Seq<T>(pub T);

/// Matches the first succeeding rule of a tuple, each tried from the
/// same position.
#[derive(Clone, Copy)]
pub(crate) struct Alt<T>(pub T);

macro_rules! impl_tuple_rules {
    ($(($($r:ident $idx:tt),+))+) => {$(
        impl<$($r: Rule),+> Rule for Seq<($($r,)+)> {
            fn consume(&self, caps: &mut Components, input: &[u8]) -> Match {
                let mut total = 0;
                $(
                    let m = self.0.$idx.consume(caps, &input[total..]);
                    total += m.consumed;
                    if !m.ok {
                        return Match::fail(total);
                    }
                )+
                Match::ok(total)
            }
        }

        impl<$($r: Rule),+> Rule for Alt<($($r,)+)> {
            fn consume(&self, caps: &mut Components, input: &[u8]) -> Match {
                let mut furthest = 0;
                $(
                    let m = self.0.$idx.consume(caps, input);
                    if m.ok {
                        return m;
                    }
                    if m.consumed > furthest {
                        furthest = m.consumed;
                    }
                )+
                Match::fail(furthest)
            }
        }
    )+};
}

impl_tuple_rules! {
    (R0 0, R1 1)
    (R0 0, R1 1, R2 2)
    (R0 0, R1 1, R2 2, R3 3)
    (R0 0, R1 1, R2 2, R3 3, R4 4)
    (R0 0, R1 1, R2 2, R3 3, R4 4, R5 5)
    (R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6)
    (R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7)
    (R0 0, R1 1, R2 2, R3 3, R4 4, R5 5, R6 6, R7 7, R8 8)
}

/// Writes the span matched by `rule` into a component on success.
#[derive(Clone, Copy)]
pub(crate) struct Capture<R> {
    rule: R,
    field: Field,
}

pub(crate) fn capture<R: Rule>(rule: R, field: Field) -> Capture<R> {
    Capture { rule, field }
}

impl<R: Rule> Rule for Capture<R> {
    fn consume(&self, caps: &mut Components, input: &[u8]) -> Match {
        let m = self.rule.consume(caps, input);
        if m.ok {
            caps.set(self.field, &input[..m.consumed]);
        }
        m
    }
}
