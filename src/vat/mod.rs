//! Local VAT ID syntax: normalization, cache keys and the German format gate.
//!
//! Nothing in this module touches the network. It is the cheap check that
//! keeps malformed input away from the registry.
//!
//! # Example
//!
//! ```
//! use ustid::vat::*;
//!
//! let id = normalize("de302210417");
//! assert!(is_german_vat(&id));
//! assert_eq!(cache_key(&id), "302210417");
//!
//! // The bare number is valid too, but has no cache key.
//! assert!(is_german_vat("302210417"));
//! assert_eq!(cache_key("302210417"), "");
//! ```

mod format;

pub use format::{
    GERMAN_COUNTRY_CODE, PREFIXED_VAT_ID_LEN, VAT_NUMBER_LEN, VatFormatError, VatId, cache_key,
    is_german_vat, normalize, numeric_body,
};
