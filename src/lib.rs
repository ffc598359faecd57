//! # ustid
//!
//! German VAT identification number (USt-IdNr.) validation.
//!
//! A VAT ID is first checked locally (`DE` + 9 digits, or the bare 9 digits).
//! Syntactically valid numbers are then confirmed against the EU VIES SOAP
//! service, and confirmed results are cached in memory for the life of the
//! process so repeat lookups never touch the network.
//!
//! ## Quick Start
//!
//! ```rust
//! use ustid::vat::{is_german_vat, normalize};
//!
//! let id = normalize(" de 302 210 417 ");
//! assert_eq!(id, "DE302210417");
//! assert!(is_german_vat(&id));
//! assert!(!is_german_vat("FM402210417"));
//! ```
//!
//! With the `vies` feature the registry lookup is available:
//!
//! ```no_run
//! # #[cfg(feature = "vies")]
//! # async fn run() -> Result<(), ustid::vies::RegistryError> {
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use ustid::validator::Validator;
//! use ustid::vies::{VIES_SERVICE_URL, ViesClient};
//!
//! let registry = ViesClient::new(reqwest::Client::new(), VIES_SERVICE_URL);
//! let validator = Validator::new(Arc::new(registry));
//!
//! let status = validator
//!     .validate_vat_id(&CancellationToken::new(), "DE302210417")
//!     .await?;
//! println!("registry says: {status}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | *(always)* | Normalization and local format validation |
//! | `vies` (default) | VIES SOAP client, status cache, validator core |
//! | `server` | axum HTTP front door and the `ustid-server` binary |
//! | `all` | Everything |

pub mod vat;

#[cfg(feature = "vies")]
pub mod vies;

#[cfg(feature = "vies")]
pub mod validator;

#[cfg(feature = "server")]
pub mod server;
