//! Checkout form payload and the rules it must pass before an order is placed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use eanpay_ean::{Ean13, EanError, EAN13_LEN};

/// Raw form payload posted with the checkout.
///
/// All fields are untyped strings straight from the form; only `ean_num` is
/// validated. The two reference fields are optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EanSubmission {
    #[serde(default)]
    pub ean_num: Option<String>,
    #[serde(default)]
    pub ref_name: Option<String>,
    #[serde(default)]
    pub req_num: Option<String>,
}

impl EanSubmission {
    pub fn new(
        ean_num: impl Into<String>,
        ref_name: impl Into<String>,
        req_num: impl Into<String>,
    ) -> Self {
        Self {
            ean_num: Some(ean_num.into()),
            ref_name: Some(ref_name.into()),
            req_num: Some(req_num.into()),
        }
    }

    /// True when the form sent none of the three fields.
    pub fn is_absent(&self) -> bool {
        self.ean_num.is_none() && self.ref_name.is_none() && self.req_num.is_none()
    }
}

/// A submission the checkout must refuse.
///
/// Every variant is a buyer-correctable mistake: it becomes a notice on the
/// checkout page and the buyer resubmits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("EAN details missing from submission")]
    MissingSubmission,

    #[error("EAN field is empty")]
    MissingIdentifier,

    #[error("EAN has {len} characters, expected 13")]
    WrongLength { len: usize },

    #[error("EAN contains non-digit characters")]
    NotNumeric,

    #[error("EAN check digit mismatch (expected {expected}, found {found})")]
    ChecksumMismatch { expected: u8, found: u8 },
}

impl SubmissionError {
    /// Buyer-facing message (source text, before translation).
    pub fn notice(&self) -> &'static str {
        match self {
            Self::MissingSubmission => "Please add EAN details.",
            Self::MissingIdentifier => "Please enter an EAN.",
            Self::WrongLength { .. } => "EAN must be 13 characters.",
            Self::NotNumeric | Self::ChecksumMismatch { .. } => "EAN is not valid.",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSubmission => "missing_submission",
            Self::MissingIdentifier => "missing_identifier",
            Self::WrongLength { .. } => "wrong_length",
            Self::NotNumeric => "not_numeric",
            Self::ChecksumMismatch { .. } => "checksum_mismatch",
        }
    }
}

impl From<EanError> for SubmissionError {
    fn from(value: EanError) -> Self {
        match value {
            EanError::WrongLength { len } => Self::WrongLength { len },
            EanError::ChecksumMismatch { expected, found } => {
                Self::ChecksumMismatch { expected, found }
            }
            // `Ean13::parse` never yields InvalidPrefix; treat it as malformed.
            EanError::NotNumeric | EanError::InvalidPrefix => Self::NotNumeric,
        }
    }
}

/// True for a form value that counts as not filled in: empty, or `"0"`.
pub fn is_blank(value: &str) -> bool {
    value.is_empty() || value == "0"
}

/// Run the checkout rules in order and return the validated EAN.
///
/// The first failing rule wins: missing payload, empty EAN, length, then
/// digits and checksum.
pub fn check_submission(submission: Option<&EanSubmission>) -> Result<Ean13, SubmissionError> {
    let data = match submission {
        Some(s) if !s.is_absent() => s,
        _ => return Err(SubmissionError::MissingSubmission),
    };

    let ean = data.ean_num.as_deref().unwrap_or_default();
    if is_blank(ean) {
        return Err(SubmissionError::MissingIdentifier);
    }

    if ean.len() != EAN13_LEN {
        return Err(SubmissionError::WrongLength { len: ean.len() });
    }

    Ok(Ean13::parse(ean)?)
}
