//! Time-bounded in-memory cache for resolved market prices.

use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use tokio::sync::Mutex;

use crate::domain::FuelType;

/// Cache TTL: 7 days. Market prices drift slowly at this granularity.
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    price: f64,
    recorded_at: SystemTime,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.recorded_at
            .elapsed()
            .map(|elapsed| elapsed < ttl)
            .unwrap_or(false)
    }
}

/// Mutex-guarded price map. Concurrent `get`/`put` from multiple callers is
/// safe; two callers racing on an expired entry costs at most one redundant
/// remote lookup.
pub struct PriceCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceCache {
    pub fn new() -> Self {
        Self::with_ttl(PRICE_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cached price while the entry is younger than the TTL.
    /// An entry read past its expiry is evicted and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<f64> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                log::debug!("price cache hit for {key}");
                Some(entry.price)
            }
            Some(_) => {
                log::debug!("price cache entry for {key} expired, evicting");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Upserts unconditionally; the entry's age resets to now.
    pub async fn put(&self, key: &str, price: f64) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                price,
                recorded_at: SystemTime::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Canonical cache key: make, model, year and fuel type, trimmed and
/// lowercased so caller-supplied casing cannot fragment the cache.
pub fn cache_key(make: &str, model: &str, year: i32, fuel_type: FuelType) -> String {
    let fuel = fuel_type.label().to_lowercase().replace([' ', '-'], "_");
    format!(
        "{}_{}_{}_{}",
        make.trim().to_lowercase(),
        model.trim().to_lowercase(),
        year,
        fuel
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_normalizes_case_and_whitespace() {
        let a = cache_key(" Toyota ", "Camry", 2022, FuelType::Gasoline);
        let b = cache_key("toyota", "  CAMRY", 2022, FuelType::Gasoline);
        assert_eq!(a, b);
        assert_eq!(a, "toyota_camry_2022_gasoline");
    }

    #[test]
    fn key_separates_fuel_types() {
        let gas = cache_key("Toyota", "Camry", 2022, FuelType::Gasoline);
        let phev = cache_key("Toyota", "Camry", 2022, FuelType::PlugInHybrid);
        assert_ne!(gas, phev);
        assert_eq!(phev, "toyota_camry_2022_plug_in_hybrid");
    }

    #[tokio::test]
    async fn put_then_get_roundtrips() {
        let cache = PriceCache::new();
        cache.put("toyota_camry_2022_gasoline", 27_500.0).await;
        assert_eq!(cache.get("toyota_camry_2022_gasoline").await, Some(27_500.0));
    }

    #[tokio::test]
    async fn missing_key_is_a_miss() {
        let cache = PriceCache::new();
        assert_eq!(cache.get("honda_civic_2020_gasoline").await, None);
    }

    #[tokio::test]
    async fn expired_entry_is_evicted_on_read() {
        let cache = PriceCache::with_ttl(Duration::ZERO);
        cache.put("bmw_m3_2021_gasoline", 62_000.0).await;
        assert_eq!(cache.len().await, 1);

        assert_eq!(cache.get("bmw_m3_2021_gasoline").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn put_overwrites_existing_entry() {
        let cache = PriceCache::new();
        cache.put("ford_f150_2023_gasoline", 45_000.0).await;
        cache.put("ford_f150_2023_gasoline", 43_250.0).await;
        assert_eq!(cache.get("ford_f150_2023_gasoline").await, Some(43_250.0));
        assert_eq!(cache.len().await, 1);
    }
}
