//! The parsed IRI reference type.

use crate::error::ParseError;
use crate::grammar;
use crate::matcher::Components;
use crate::punycode;
use alloc::string::String;
use core::str::FromStr;

/// A parsed IRI reference (RFC 3987).
///
/// Parsing decomposes the input into components and normalizes any
/// internationalized host labels to their ASCII-compatible `xn--` form,
/// so [`host`](Self::host) and the [`Display`](core::fmt::Display)
/// rendering are always ASCII for registered names.
///
/// An absent port is reported as `0`, and absent query and fragment
/// components are indistinguishable from empty ones.
///
/// # Examples
///
/// ```
/// use irikit::Iri;
///
/// let iri = Iri::parse("https://user@ya.ru:99/b/page.html?k=v#top")?;
/// assert_eq!(iri.scheme(), "https");
/// assert_eq!(iri.host(), "ya.ru");
/// assert_eq!(iri.port(), 99);
/// assert_eq!(iri.path(), "/b/page.html");
/// # Ok::<_, irikit::ParseError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Iri {
    pub(crate) data: Components,
}

impl Iri {
    /// Parses an IRI reference from bytes or a string.
    ///
    /// The whole input must match the `IRI-reference` grammar. Byte
    /// input that is not well-formed UTF-8 fails the match, except that
    /// a few malformed sequences the codepoint decoder tolerates are
    /// carried through lossily.
    pub fn parse<S: AsRef<[u8]> + ?Sized>(input: &S) -> Result<Iri, ParseError> {
        let mut data = grammar::parse(input.as_ref())?;
        data.host = encode_host(&data.host);
        Ok(Iri { data })
    }

    /// Returns the scheme, or `""` for a relative reference.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.data.scheme
    }

    /// Returns the user information subcomponent without its `'@'`
    /// terminator, or `""` if absent.
    #[must_use]
    pub fn user_info(&self) -> &str {
        &self.data.user_info
    }

    /// Returns the host, with registered-name labels in ASCII form.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.data.host
    }

    /// Returns the port, or `0` if absent.
    ///
    /// Ports beyond five digits wrap around sixteen bits rather than
    /// failing the parse.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.data.port
    }

    /// Returns the path, which may be empty.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.data.path
    }

    /// Returns the query, or `""` if absent.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.data.query
    }

    /// Returns the fragment, or `""` if absent.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.data.fragment
    }
}

/// Maps each dot-separated label containing non-ASCII to its `xn--`
/// ACE form. Bracketed IP literals are left untouched.
fn encode_host(host: &str) -> String {
    if host.is_ascii() || host.starts_with('[') {
        return host.into();
    }
    let mut out = String::with_capacity(host.len() + 8);
    for (i, label) in host.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        if label.is_ascii() {
            out.push_str(label);
        } else {
            match punycode::encode(label.as_bytes()) {
                Ok(ace) => {
                    out.push_str("xn--");
                    out.push_str(&ace);
                }
                // Leave an unencodable label as is.
                Err(_) => out.push_str(label),
            }
        }
    }
    out
}

impl FromStr for Iri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Iri, ParseError> {
        Iri::parse(s)
    }
}

impl TryFrom<&str> for Iri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Iri, ParseError> {
        Iri::parse(s)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Iri;
    use core::fmt;
    use serde::de::{Deserialize, Deserializer, Error, Visitor};
    use serde::ser::{Serialize, Serializer};

    impl Serialize for Iri {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    struct IriVisitor;

    impl Visitor<'_> for IriVisitor {
        type Value = Iri;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an IRI reference")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Iri, E> {
            Iri::parse(v).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for Iri {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Iri, D::Error> {
            deserializer.deserialize_str(IriVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_labels_are_encoded() {
        assert_eq!(encode_host("ya.ru"), "ya.ru");
        assert_eq!(encode_host("москва.рф"), "xn--80adxhks.xn--p1ai");
        assert_eq!(encode_host("mixed.бел"), "mixed.xn--90ais");
        assert_eq!(encode_host("[::1]"), "[::1]");
    }
}
