//! German VAT ID normalization and format validation.

use std::fmt;

/// ISO country code of Germany, the only registry prefix this crate checks.
pub const GERMAN_COUNTRY_CODE: &str = "DE";

/// Length of the numeric body of a German VAT ID.
pub const VAT_NUMBER_LEN: usize = 9;

/// Length of a prefixed VAT ID (`DE` + 9 digits).
pub const PREFIXED_VAT_ID_LEN: usize = GERMAN_COUNTRY_CODE.len() + VAT_NUMBER_LEN;

/// Error returned when a VAT ID fails format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatFormatError {
    /// The normalized input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for VatFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid German VAT ID '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for VatFormatError {}

/// Strip all whitespace (surrounding and interior) and upper-case.
///
/// Every other step works on the normalized form.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Derive the cache key of a normalized VAT ID.
///
/// Only the prefixed form (`DE` + 9 digits, length 11) yields a key: the
/// trailing 9 characters. Every other length yields the empty key, which
/// means "do not use the cache".
pub fn cache_key(normalized: &str) -> &str {
    if normalized.len() == PREFIXED_VAT_ID_LEN {
        normalized.get(GERMAN_COUNTRY_CODE.len()..).unwrap_or("")
    } else {
        ""
    }
}

/// The number part sent to the registry, with any country prefix removed.
pub fn numeric_body(normalized: &str) -> &str {
    match normalized.len() {
        VAT_NUMBER_LEN => normalized,
        PREFIXED_VAT_ID_LEN => normalized.get(GERMAN_COUNTRY_CODE.len()..).unwrap_or(""),
        _ => "",
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check the local syntax of a normalized German VAT ID (no network call).
///
/// Accepts `999999999` and `DE999999999`. Signs, separators and any other
/// length are rejected.
pub fn is_german_vat(normalized: &str) -> bool {
    check_format(normalized).is_ok()
}

fn check_format(normalized: &str) -> Result<(), String> {
    match normalized.len() {
        VAT_NUMBER_LEN => {
            if all_digits(normalized) {
                Ok(())
            } else {
                Err("number must consist of 9 digits".into())
            }
        }
        PREFIXED_VAT_ID_LEN => {
            let (prefix, number) = match (
                normalized.get(..GERMAN_COUNTRY_CODE.len()),
                normalized.get(GERMAN_COUNTRY_CODE.len()..),
            ) {
                (Some(p), Some(n)) => (p, n),
                _ => return Err("not an ASCII VAT ID".into()),
            };
            if !prefix.eq_ignore_ascii_case(GERMAN_COUNTRY_CODE) {
                return Err(format!("country prefix '{prefix}' is not {GERMAN_COUNTRY_CODE}"));
            }
            if !all_digits(number) {
                return Err("number must consist of 9 digits".into());
            }
            Ok(())
        }
        n => Err(format!(
            "expected {VAT_NUMBER_LEN} or {PREFIXED_VAT_ID_LEN} characters, got {n}"
        )),
    }
}

/// A syntactically valid German VAT ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VatId {
    number: String,
}

impl VatId {
    /// Normalize `raw` and check its format.
    pub fn parse(raw: &str) -> Result<Self, VatFormatError> {
        let normalized = normalize(raw);
        match check_format(&normalized) {
            Ok(()) => Ok(Self {
                number: numeric_body(&normalized).to_string(),
            }),
            Err(reason) => Err(VatFormatError {
                value: normalized,
                reason,
            }),
        }
    }

    /// Always `DE`.
    pub fn country_code(&self) -> &str {
        GERMAN_COUNTRY_CODE
    }

    /// The 9-digit number without prefix.
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for VatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GERMAN_COUNTRY_CODE}{}", self.number)
    }
}
