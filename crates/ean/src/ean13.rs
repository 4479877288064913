use serde::{Deserialize, Serialize};
use thiserror::Error;

use eanpay_core::ValueObject;

/// Number of characters in an EAN-13.
pub const EAN13_LEN: usize = 13;

/// Number of data digits the check digit is computed over.
const PREFIX_LEN: usize = EAN13_LEN - 1;

/// Compute the EAN-13 check digit for a 12-digit prefix.
///
/// Weights alternate 3, 1, 3, ... starting from the rightmost data digit.
/// Characters that are not ASCII digits count as 0, as do positions missing
/// from a short input; anything past the 12th character is ignored. Pattern
/// checking is [`validate`]'s job, not this function's.
pub fn check_digit(first12: &str) -> u8 {
    let bytes = first12.as_bytes();
    let mut sum: u32 = 0;
    let mut odd = true;

    for i in (0..PREFIX_LEN).rev() {
        let digit = bytes
            .get(i)
            .copied()
            .filter(u8::is_ascii_digit)
            .map_or(0, |b| u32::from(b - b'0'));
        sum += digit * if odd { 3 } else { 1 };
        odd = !odd;
    }

    ((10 - sum % 10) % 10) as u8
}

/// Returns `true` iff `candidate` is exactly 13 ASCII digits and its last
/// digit is the check digit of the first 12.
pub fn validate(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != EAN13_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    // All-ASCII from here, so byte slicing is on char boundaries.
    bytes[PREFIX_LEN] - b'0' == check_digit(&candidate[..PREFIX_LEN])
}

/// Why a candidate is not an EAN-13.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EanError {
    #[error("EAN must be 13 characters (got {len})")]
    WrongLength { len: usize },

    #[error("EAN must contain only digits")]
    NotNumeric,

    #[error("EAN check digit mismatch (expected {expected}, found {found})")]
    ChecksumMismatch { expected: u8, found: u8 },

    #[error("EAN prefix must be exactly 12 digits")]
    InvalidPrefix,
}

/// A validated EAN-13.
///
/// The only way to get one is through [`Ean13::parse`] (or the `FromStr`,
/// `TryFrom` and `Deserialize` impls that delegate to it), so holding an
/// `Ean13` means [`validate`] returned `true` for its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ean13(String);

impl Ean13 {
    /// Parse and validate a candidate, reporting which check failed.
    pub fn parse(candidate: &str) -> Result<Self, EanError> {
        let len = candidate.len();
        if len != EAN13_LEN {
            return Err(EanError::WrongLength { len });
        }
        if !candidate.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EanError::NotNumeric);
        }

        let expected = check_digit(&candidate[..PREFIX_LEN]);
        let found = candidate.as_bytes()[PREFIX_LEN] - b'0';
        if expected != found {
            return Err(EanError::ChecksumMismatch { expected, found });
        }

        Ok(Self(candidate.to_string()))
    }

    /// Complete a 12-digit prefix with its check digit.
    pub fn from_prefix(prefix: &str) -> Result<Self, EanError> {
        if prefix.len() != PREFIX_LEN || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EanError::InvalidPrefix);
        }
        Ok(Self(format!("{prefix}{}", check_digit(prefix))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first 12 (data) digits.
    pub fn prefix(&self) -> &str {
        &self.0[..PREFIX_LEN]
    }

    /// The 13th digit.
    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[PREFIX_LEN] - b'0'
    }
}

impl ValueObject for Ean13 {}

impl core::fmt::Display for Ean13 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for Ean13 {
    type Err = EanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ean13 {
    type Error = EanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ean13> for String {
    fn from(value: Ean13) -> Self {
        value.0
    }
}

impl AsRef<str> for Ean13 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
