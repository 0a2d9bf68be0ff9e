use crate::encoding::{self, FRAGMENT, PATH, QUERY, USERINFO};
use crate::error::{ParseError, PunycodeError};
use crate::iri::Iri;
use core::fmt::{Display, Formatter, Result};

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "invalid IRI reference at index {}", self.index)
    }
}

impl Display for PunycodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(match self {
            PunycodeError::BadInput => "invalid bootstring input",
            PunycodeError::BigOutput => "output buffer too small",
            PunycodeError::Overflow => "bootstring delta overflow",
        })
    }
}

/// Reassembles the reference with each component percent-encoded for
/// its position. The host is emitted verbatim: registered names are
/// already ASCII after label encoding, and IP literals keep their
/// brackets. An absent port, query or fragment is omitted together
/// with its delimiter.
impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !self.data.scheme.is_empty() {
            f.write_str(&self.data.scheme)?;
            f.write_str(":")?;
        }
        f.write_str("//")?;
        if !self.data.user_info.is_empty() {
            f.write_str(&encoding::encode(self.data.user_info.as_bytes(), &USERINFO))?;
            f.write_str("@")?;
        }
        f.write_str(&self.data.host)?;
        if self.data.port != 0 {
            write!(f, ":{}", self.data.port)?;
        }
        f.write_str(&encoding::encode(self.data.path.as_bytes(), &PATH))?;
        if !self.data.query.is_empty() {
            f.write_str("?")?;
            f.write_str(&encoding::encode(self.data.query.as_bytes(), &QUERY))?;
        }
        if !self.data.fragment.is_empty() {
            f.write_str("#")?;
            f.write_str(&encoding::encode(self.data.fragment.as_bytes(), &FRAGMENT))?;
        }
        Ok(())
    }
}
