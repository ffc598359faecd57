//! EU VIES SOAP client for VAT number confirmation.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{CheckVatRequest, RegistryError, parse_check_vat_response, write_check_vat_request};

/// Production checkVat endpoint.
pub const VIES_SERVICE_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/services/checkVatService";

/// EU test endpoint. Answers `true` for number `100` and faults on anything
/// that is not a number.
pub const VIES_TEST_SERVICE_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/services/checkVatTestService";

const SOAP_ACTION: &str = "urn:checkVat";

/// A registry that can confirm a VAT number.
///
/// Implementations hold no cache and no business logic. The status string
/// is returned exactly as the registry reported it.
#[async_trait]
pub trait VatRegistry: Send + Sync {
    /// Look up `vat_number` (without prefix) for `country_code`.
    ///
    /// Must return [`RegistryError::Cancelled`] promptly once `cancel` fires.
    async fn check_vat(
        &self,
        cancel: &CancellationToken,
        country_code: &str,
        vat_number: &str,
    ) -> Result<String, RegistryError>;
}

/// VIES client speaking the checkVat SOAP operation over HTTP.
#[derive(Debug, Clone)]
pub struct ViesClient {
    client: Client,
    url: String,
}

impl ViesClient {
    /// Create a client posting to `url` through the supplied HTTP client.
    ///
    /// The client is reused for every call; configure timeouts and TLS on it.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn dispatch(&self, body: Vec<u8>) -> Result<String, RegistryError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/xml")
            .header("SOAPAction", SOAP_ACTION)
            .body(body)
            .send()
            .await?;

        // The status code is not inspected; a non-2xx answer either carries
        // a SOAP envelope or fails to decode.
        debug!(status = %response.status(), url = %self.url, "VIES responded");

        let text = response.text().await?;
        let parsed = parse_check_vat_response(&text)?;
        Ok(parsed.valid)
    }
}

#[async_trait]
impl VatRegistry for ViesClient {
    async fn check_vat(
        &self,
        cancel: &CancellationToken,
        country_code: &str,
        vat_number: &str,
    ) -> Result<String, RegistryError> {
        let mut body = Vec::new();
        write_check_vat_request(&CheckVatRequest::new(country_code, vat_number), &mut body)?;

        debug!(country_code, vat_number, url = %self.url, "dispatching checkVat");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RegistryError::Cancelled),
            result = self.dispatch(body) => result,
        }
    }
}
