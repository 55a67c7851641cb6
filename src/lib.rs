//! Vehicle valuation and depreciation engine.
//!
//! Estimates a vehicle's market value over an ownership horizon and compares
//! that trajectory across vehicles. Price resolution walks cache → remote
//! market source → offline estimator and always produces a usable number;
//! projection applies year-by-year exponential decay adjusted for vehicle
//! class, fuel type and annual mileage.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vehicle_value_engine::{
//!     infra::{MarketPriceClient, PriceResolver},
//!     FuelType, ValuationEngine, VehicleClass, VehicleDescriptor,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MarketPriceClient::from_env()?;
//! let engine = ValuationEngine::new(PriceResolver::new(Arc::new(client)));
//!
//! let camry = VehicleDescriptor::new(
//!     "Toyota", "Camry", 2022, VehicleClass::Sedan, FuelType::Gasoline,
//! );
//! let curve = engine.project(&camry, 5, 12_000).await?;
//! println!("worth {:.2} after 5 years", curve.final_value);
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod engine;
pub mod infra;

pub use domain::{
    ComparisonResult, FuelType, PairwiseDifference, PriceOrigin, ValuationCurve, ValuationYear,
    VehicleClass, VehicleDescriptor,
};
pub use engine::{ComparisonEngine, InvalidParameter, ValuationEngine};
pub use infra::{MarketPriceClient, PriceCache, PriceResolver, PriceSource, PricingError, ResolvedPrice};
