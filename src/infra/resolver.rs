//! Price resolution: cache, then the market source, then the offline
//! estimator. `resolve` always produces a usable price.

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::domain::{estimator, PriceOrigin, VehicleDescriptor};
use crate::infra::cache::{cache_key, PriceCache};
use crate::infra::pricing::PriceSource;

/// Ceiling on one remote lookup; a slower source is treated as failed.
const REMOTE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// A price plus where it came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    pub amount: f64,
    pub origin: PriceOrigin,
}

pub struct PriceResolver {
    cache: PriceCache,
    source: Arc<dyn PriceSource>,
}

impl PriceResolver {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self::with_cache(source, PriceCache::new())
    }

    pub fn with_cache(source: Arc<dyn PriceSource>, cache: PriceCache) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Resolves a current price for the vehicle. Infallible by contract:
    /// every remote failure degrades to the offline estimator.
    pub async fn resolve(&self, vehicle: &VehicleDescriptor) -> ResolvedPrice {
        let key = cache_key(
            &vehicle.make,
            &vehicle.model,
            vehicle.year,
            vehicle.fuel_type,
        );

        if let Some(amount) = self.cache.get(&key).await {
            return ResolvedPrice {
                amount,
                origin: PriceOrigin::Cache,
            };
        }

        let lookup = self.source.mean_price(
            &vehicle.make,
            &vehicle.model,
            vehicle.year,
            Some(vehicle.vehicle_class.label()),
        );

        match tokio::time::timeout(REMOTE_LOOKUP_TIMEOUT, lookup).await {
            Ok(Ok(amount)) => {
                // Only API-sourced prices enter the cache.
                self.cache.put(&key, amount).await;
                ResolvedPrice {
                    amount,
                    origin: PriceOrigin::Market,
                }
            }
            Ok(Err(err)) => {
                log::warn!(
                    "market lookup failed for {}: {err}; falling back to estimator",
                    vehicle.display_name()
                );
                self.estimate(vehicle)
            }
            Err(_) => {
                log::warn!(
                    "market lookup timed out for {}; falling back to estimator",
                    vehicle.display_name()
                );
                self.estimate(vehicle)
            }
        }
    }

    fn estimate(&self, vehicle: &VehicleDescriptor) -> ResolvedPrice {
        ResolvedPrice {
            amount: estimator::estimate(&vehicle.make, &vehicle.model, vehicle.year),
            origin: PriceOrigin::Estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FuelType, VehicleClass};
    use crate::infra::pricing::PricingError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        price: f64,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(price: f64) -> Arc<Self> {
            Arc::new(Self {
                price,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceSource for FixedSource {
        async fn mean_price(
            &self,
            _make: &str,
            _model: &str,
            _year: i32,
            _trim: Option<&str>,
        ) -> Result<f64, PricingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.price)
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PriceSource for FailingSource {
        async fn mean_price(
            &self,
            _make: &str,
            _model: &str,
            _year: i32,
            _trim: Option<&str>,
        ) -> Result<f64, PricingError> {
            Err(PricingError::Api("pricing backend unreachable".into()))
        }
    }

    fn camry() -> VehicleDescriptor {
        VehicleDescriptor::new("Toyota", "Camry", 2022, VehicleClass::Sedan, FuelType::Gasoline)
    }

    #[tokio::test]
    async fn market_price_is_cached_and_reused() {
        let source = FixedSource::new(27_500.0);
        let resolver = PriceResolver::new(source.clone());

        let first = resolver.resolve(&camry()).await;
        assert_eq!(first.origin, PriceOrigin::Market);
        assert!((first.amount - 27_500.0).abs() < f64::EPSILON);

        let second = resolver.resolve(&camry()).await;
        assert_eq!(second.origin, PriceOrigin::Cache);
        assert!((second.amount - 27_500.0).abs() < f64::EPSILON);

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn expired_entry_triggers_a_fresh_lookup() {
        let source = FixedSource::new(27_500.0);
        let resolver =
            PriceResolver::with_cache(source.clone(), PriceCache::with_ttl(Duration::ZERO));

        let first = resolver.resolve(&camry()).await;
        let second = resolver.resolve(&camry()).await;
        assert_eq!(first.origin, PriceOrigin::Market);
        assert_eq!(second.origin, PriceOrigin::Market);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn source_failure_falls_back_to_estimator_without_caching() {
        let resolver = PriceResolver::new(Arc::new(FailingSource));
        let vehicle = camry();

        let resolved = resolver.resolve(&vehicle).await;
        assert_eq!(resolved.origin, PriceOrigin::Estimate);
        let expected = estimator::estimate(&vehicle.make, &vehicle.model, vehicle.year);
        assert!((resolved.amount - expected).abs() < f64::EPSILON);

        assert!(resolver.cache().is_empty().await);
    }
}
