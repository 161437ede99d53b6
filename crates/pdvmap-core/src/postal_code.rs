//! Brazilian postal code (CEP) normalization.

use thiserror::Error;

const CEP_DIGITS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("CEP must contain exactly 8 digits, got {digits}")]
pub struct PostalCodeError {
    /// Number of digits left after stripping non-digit characters.
    pub digits: usize,
}

/// An 8-digit CEP with all formatting removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Strips every non-digit character from `raw` and requires exactly
    /// eight digits to remain. `"01001-000"` and `" 01001000 "` both parse.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError`] when the digit count is not eight.
    pub fn parse(raw: &str) -> Result<Self, PostalCodeError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != CEP_DIGITS {
            return Err(PostalCodeError {
                digits: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
