//! Vehicle registration plate validation.

use std::fmt;

/// Shortest accepted plate.
pub const MIN_PLATE_LEN: usize = 2;

/// Longest accepted plate.
pub const MAX_PLATE_LEN: usize = 10;

/// A plate rejected by [`Plate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidPlateFormat(String);

impl InvalidPlateFormat {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A registration plate of 2-10 ASCII letters or digits.
///
/// Case is preserved exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plate(String);

impl Plate {
    /// Validate a plate string.
    pub fn parse(input: &str) -> Result<Self, InvalidPlateFormat> {
        let len = input.chars().count();
        if len < MIN_PLATE_LEN {
            return Err(InvalidPlateFormat(format!(
                "Plate must contain at least {} characters",
                MIN_PLATE_LEN
            )));
        }
        if len > MAX_PLATE_LEN {
            return Err(InvalidPlateFormat(format!(
                "Plate must contain at most {} characters",
                MAX_PLATE_LEN
            )));
        }
        if !input.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidPlateFormat("Invalid plate format".to_string()));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Plate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
