//! Pure valuation logic lives here.

pub mod depreciation;
pub mod entities;
pub mod estimator;
pub(crate) mod money;

pub use depreciation::{base_rate, depreciate_year, DepreciationStep};
pub use entities::{
    ComparisonResult, FuelType, PairwiseDifference, PriceOrigin, ValuationCurve, ValuationYear,
    VehicleClass, VehicleDescriptor,
};
pub use estimator::estimate;
