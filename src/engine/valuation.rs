//! Drives the decay model across an ownership horizon.

use thiserror::Error;

use crate::domain::money::{round_currency, round_rate};
use crate::domain::{depreciate_year, ValuationCurve, VehicleDescriptor};
use crate::infra::PriceResolver;

/// The only caller-visible failure. Everything else inside the engine
/// degrades to a lower-confidence price instead of an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidParameter {
    #[error("ownership horizon must cover at least one year, got {0}")]
    HorizonTooShort(i32),
    #[error("annual mileage cannot be negative, got {0}")]
    NegativeMileage(i32),
    #[error("comparison requires at least one vehicle")]
    EmptyComparison,
}

pub struct ValuationEngine {
    resolver: PriceResolver,
}

impl ValuationEngine {
    pub fn new(resolver: PriceResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &PriceResolver {
        &self.resolver
    }

    /// Projects the vehicle's value across `years` of ownership at the given
    /// annual mileage. Parameters are validated before any lookup happens.
    pub async fn project(
        &self,
        vehicle: &VehicleDescriptor,
        years: i32,
        annual_mileage: i32,
    ) -> Result<ValuationCurve, InvalidParameter> {
        if years < 1 {
            return Err(InvalidParameter::HorizonTooShort(years));
        }
        if annual_mileage < 0 {
            return Err(InvalidParameter::NegativeMileage(annual_mileage));
        }

        let resolved = self.resolver.resolve(vehicle).await;
        let initial_price = resolved.amount;

        let mut year_entries = Vec::with_capacity(years as usize);
        let mut running_value = initial_price;
        for year_index in 1..=years as u32 {
            let step = depreciate_year(
                running_value,
                year_index,
                vehicle.vehicle_class,
                vehicle.fuel_type,
                annual_mileage as f64,
            );
            year_entries.push(step.summary);
            running_value = step.carry_value;
        }

        let total_depreciation = initial_price - running_value;
        let depreciation_percentage = if initial_price > 0.0 {
            total_depreciation / initial_price * 100.0
        } else {
            0.0
        };

        Ok(ValuationCurve {
            initial_price: round_currency(initial_price),
            final_value: round_currency(running_value),
            total_depreciation: round_currency(total_depreciation),
            depreciation_percentage: round_rate(depreciation_percentage),
            price_origin: resolved.origin,
            years: year_entries,
        })
    }
}
