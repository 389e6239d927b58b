//! Conversion of textual fields into typed keys and values.

use thiserror::Error;

/// Error raised when a field cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot parse `{text}` as {expected}")]
pub struct FieldError {
    text: Box<str>,
    expected: &'static str,
}

impl FieldError {
    /// Construct a new field error.
    pub fn new(text: &str, expected: &'static str) -> Self {
        Self {
            text: text.into(),
            expected,
        }
    }

    /// The text which failed to parse.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A type which can be parsed from a single trimmed text field.
pub trait Field: Sized {
    /// Human readable name of the type, used in diagnostics.
    const EXPECTED: &'static str;

    /// Parse the field.
    fn parse_field(text: &str) -> Result<Self, FieldError>;
}

/// Parse a field after trimming surrounding whitespace.
///
/// Both the loader and the dispatcher convert text through here, so a field
/// parses the same way regardless of where it came from.
pub(crate) fn parse_trimmed<T>(text: &str) -> Result<T, FieldError>
where
    T: Field,
{
    T::parse_field(text.trim())
}

impl Field for String {
    const EXPECTED: &'static str = "text";

    #[inline]
    fn parse_field(text: &str) -> Result<Self, FieldError> {
        Ok(text.to_owned())
    }
}

/// Only the first character is kept.
impl Field for char {
    const EXPECTED: &'static str = "a character";

    #[inline]
    fn parse_field(text: &str) -> Result<Self, FieldError> {
        text.chars()
            .next()
            .ok_or_else(|| FieldError::new(text, Self::EXPECTED))
    }
}

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                const EXPECTED: &'static str = concat!("an integer (", stringify!($ty), ")");

                #[inline]
                fn parse_field(text: &str) -> Result<Self, FieldError> {
                    text.parse().map_err(|_| FieldError::new(text, Self::EXPECTED))
                }
            }
        )*
    };
}

integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
