//! Cached German VAT ID validation.
//!
//! [`Validator`] normalizes the input, serves repeat lookups from an
//! in-memory [`StatusCache`], rejects malformed numbers locally and only
//! then asks the registry. Confirmed answers are cached for the life of
//! the process.
//!
//! Concurrent misses for the same number are not coalesced: each one calls
//! the registry. The first answer stored wins.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::vat::{GERMAN_COUNTRY_CODE, cache_key, is_german_vat, normalize, numeric_body};
use crate::vies::{RegistryError, VatRegistry};

pub use cache::{CacheEntry, CacheRead, StatusCache};

/// Wall-clock budget for a single registry call.
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(5);

/// Status the registry reports for a confirmed VAT ID.
pub const STATUS_VALID: &str = "true";

/// Status returned for input that fails the local format check.
pub const STATUS_INVALID: &str = "false";

/// Inbound contract of the validation service.
#[async_trait]
pub trait VatIdChecker: Send + Sync {
    /// Validate a raw, user-supplied VAT ID and return the registry status.
    ///
    /// An `Err` means the VAT ID could not be confirmed.
    async fn validate_vat_id(
        &self,
        cancel: &CancellationToken,
        vat_id: &str,
    ) -> Result<String, RegistryError>;
}

/// VAT ID validator with a process-lifetime result cache.
pub struct Validator {
    registry: Arc<dyn VatRegistry>,
    cache: StatusCache,
    timeout: Duration,
}

impl Validator {
    pub fn new(registry: Arc<dyn VatRegistry>) -> Self {
        Self::with_timeout(registry, DEFAULT_REGISTRY_TIMEOUT)
    }

    /// Use `timeout` as the budget for each registry call.
    pub fn with_timeout(registry: Arc<dyn VatRegistry>, timeout: Duration) -> Self {
        Self {
            registry,
            cache: StatusCache::new(),
            timeout,
        }
    }

    pub fn cache(&self) -> &StatusCache {
        &self.cache
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validate `raw` and return the status string.
    ///
    /// Returns [`STATUS_INVALID`] without any network call when the format
    /// is wrong. Otherwise returns the registry's status, which is cached
    /// unless empty. Registry failures are returned as errors and leave the
    /// cache untouched.
    pub async fn validate_vat_id(
        &self,
        cancel: &CancellationToken,
        raw: &str,
    ) -> Result<String, RegistryError> {
        let vat_id = normalize(raw);
        let key = cache_key(&vat_id);

        // Input of any length other than 11 has no key and skips the cache.
        if !key.is_empty() {
            match self.cache.load(key) {
                CacheRead::Hit(status) => {
                    debug!(key, status = %status, "VAT ID cache hit");
                    return Ok(status);
                }
                CacheRead::Polluted => {
                    warn!(key, "discarding malformed VAT ID cache entry");
                    self.cache.remove_polluted(key);
                }
                CacheRead::Miss => {}
            }
        }

        if !is_german_vat(&vat_id) {
            debug!(vat_id = %vat_id, "VAT ID fails local format check");
            return Ok(STATUS_INVALID.to_string());
        }

        let status = self.lookup(cancel, numeric_body(&vat_id)).await?;

        let Some(entry) = CacheEntry::new(status.as_str()) else {
            warn!(vat_id = %vat_id, "registry returned an empty status; not caching");
            return Ok(status);
        };
        if key.is_empty() {
            return Ok(status);
        }
        Ok(self.cache.load_or_store(key, entry))
    }

    /// Like [`validate_vat_id`](Self::validate_vat_id), reduced to whether
    /// the registry confirmed the number.
    pub async fn is_valid(
        &self,
        cancel: &CancellationToken,
        raw: &str,
    ) -> Result<bool, RegistryError> {
        Ok(self.validate_vat_id(cancel, raw).await? == STATUS_VALID)
    }

    async fn lookup(
        &self,
        cancel: &CancellationToken,
        number: &str,
    ) -> Result<String, RegistryError> {
        let call = cancel.child_token();
        // Cancels the registry call on every exit path, including timeout.
        let _guard = call.clone().drop_guard();

        debug!(number, timeout = ?self.timeout, "asking registry");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RegistryError::Cancelled),
            result = tokio::time::timeout(
                self.timeout,
                self.registry.check_vat(&call, GERMAN_COUNTRY_CODE, number),
            ) => result.unwrap_or(Err(RegistryError::Timeout(self.timeout))),
        }
    }
}

#[async_trait]
impl VatIdChecker for Validator {
    async fn validate_vat_id(
        &self,
        cancel: &CancellationToken,
        vat_id: &str,
    ) -> Result<String, RegistryError> {
        Validator::validate_vat_id(self, cancel, vat_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedRegistry {
        status: &'static str,
        calls: AtomicUsize,
    }

    impl FixedRegistry {
        fn new(status: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl VatRegistry for FixedRegistry {
        async fn check_vat(
            &self,
            _cancel: &CancellationToken,
            _country_code: &str,
            _vat_number: &str,
        ) -> Result<String, RegistryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.status.to_string())
        }
    }

    #[tokio::test]
    async fn polluted_entry_is_revalidated() {
        let registry = FixedRegistry::new("true");
        let v = Validator::new(registry.clone());
        v.cache().insert_raw("302210417", "");

        let status = v
            .validate_vat_id(&CancellationToken::new(), "DE302210417")
            .await
            .unwrap();

        assert_eq!(status, "true");
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
        assert_eq!(v.cache().load("302210417"), CacheRead::Hit("true".into()));
    }

    #[tokio::test]
    async fn polluted_entry_removed_even_for_invalid_format() {
        let registry = FixedRegistry::new("true");
        let v = Validator::new(registry.clone());
        v.cache().insert_raw("402210417", "");

        let status = v
            .validate_vat_id(&CancellationToken::new(), "FM402210417")
            .await
            .unwrap();

        assert_eq!(status, STATUS_INVALID);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 0);
        assert!(v.cache().is_empty());
    }

    #[tokio::test]
    async fn cached_status_served_for_other_prefix() {
        // The key ignores the prefix, so a cached number is served even for
        // a non-German prefix.
        let registry = FixedRegistry::new("true");
        let v = Validator::new(registry.clone());
        v.cache().insert_raw("302210417", "true");

        let status = v
            .validate_vat_id(&CancellationToken::new(), "NL302210417")
            .await
            .unwrap();

        assert_eq!(status, "true");
        assert_eq!(registry.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn default_timeout() {
        let v = Validator::new(FixedRegistry::new("true"));
        assert_eq!(v.timeout(), Duration::from_secs(5));
    }
}
