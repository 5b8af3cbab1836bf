//! Postal code validation at the CLI boundary.

use thiserror::Error;
use zipscore_engine::{POSTAL_CODE_LEN, normalize_postal_code};

/// Rejected command-line postal code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid postal code {raw:?}: expected {len} digits", len = POSTAL_CODE_LEN)]
pub struct InvalidPostalCode {
    pub raw: String,
}

/// Normalize `raw` and require exactly five ASCII digits.
///
/// ZIP+4 input such as `90012-3456` is accepted and cut to `90012`.
pub fn validate_postal_code(raw: &str) -> Result<String, InvalidPostalCode> {
    let code = normalize_postal_code(raw);
    if code.len() == POSTAL_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(InvalidPostalCode {
            raw: raw.to_string(),
        })
    }
}
