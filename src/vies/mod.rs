//! EU VIES registry protocol: SOAP request encoding, response decoding and
//! the HTTP client that drives them.
//!
//! # Example
//!
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use ustid::vies::*;
//!
//! # async fn run() -> Result<(), RegistryError> {
//! let vies = ViesClient::new(reqwest::Client::new(), VIES_TEST_SERVICE_URL);
//! let status = vies.check_vat(&CancellationToken::new(), "DE", "100").await?;
//! assert_eq!(status, "true");
//! # Ok(())
//! # }
//! ```

mod client;
mod envelope;
mod error;
mod response;

pub use client::{VIES_SERVICE_URL, VIES_TEST_SERVICE_URL, VatRegistry, ViesClient};
pub use envelope::{CheckVatRequest, write_check_vat_request};
pub use error::RegistryError;
pub use response::{CheckVatResponse, parse_check_vat_response};

/// Namespace URIs of the checkVat envelope.
pub mod ns {
    pub const SOAP_ENVELOPE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
    pub const CHECK_VAT_TYPES: &str = "urn:ec.europa.eu:taxud:vies:services:checkVat:types";
}
