/// An error occurred when parsing an IRI reference.
///
/// Carries the furthest byte index the matcher reached before giving
/// up, which is usually at or just past the offending byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) index: usize,
}

impl ParseError {
    /// Returns the index where the matcher stopped in the input.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(feature = "impl-error")]
impl std::error::Error for ParseError {}

/// An error occurred in the Punycode codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunycodeError {
    /// The input was not well-formed UTF-8, or a byte fell outside
    /// the bootstring alphabet.
    BadInput,
    /// The output did not fit in the provided buffer.
    BigOutput,
    /// Delta arithmetic overflowed its 32-bit representation.
    Overflow,
}

#[cfg(feature = "impl-error")]
impl std::error::Error for PunycodeError {}
