//! The impure edge: remote pricing, caching, and price resolution.

pub mod cache;
pub mod pricing;
pub mod resolver;

pub use cache::{cache_key, PriceCache, PRICE_CACHE_TTL};
pub use pricing::{MarketPriceClient, PriceSource, PricingError};
pub use resolver::{PriceResolver, ResolvedPrice};
