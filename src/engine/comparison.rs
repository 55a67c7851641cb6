//! Cross-vehicle comparison of valuation curves.

use crate::domain::money::{round_currency, round_rate};
use crate::domain::{ComparisonResult, PairwiseDifference, ValuationCurve, VehicleDescriptor};

use super::valuation::{InvalidParameter, ValuationEngine};

/// Stateless: vehicles are identified purely by their position in the input.
pub struct ComparisonEngine {
    valuation: ValuationEngine,
}

impl ComparisonEngine {
    pub fn new(valuation: ValuationEngine) -> Self {
        Self { valuation }
    }

    pub fn valuation(&self) -> &ValuationEngine {
        &self.valuation
    }

    /// Projects every vehicle, in input order, over the same horizon and
    /// mileage. With exactly two vehicles the component-wise difference
    /// (first minus second) is included; N-way deltas are the caller's job.
    pub async fn compare(
        &self,
        vehicles: &[VehicleDescriptor],
        years: i32,
        annual_mileage: i32,
    ) -> Result<ComparisonResult, InvalidParameter> {
        if vehicles.is_empty() {
            return Err(InvalidParameter::EmptyComparison);
        }

        let mut curves = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            curves.push(self.valuation.project(vehicle, years, annual_mileage).await?);
        }

        let pairwise_difference = match curves.as_slice() {
            [first, second] => Some(pairwise_difference(first, second)),
            _ => None,
        };

        Ok(ComparisonResult {
            curves,
            pairwise_difference,
        })
    }
}

fn pairwise_difference(first: &ValuationCurve, second: &ValuationCurve) -> PairwiseDifference {
    PairwiseDifference {
        initial_price_diff: round_currency(first.initial_price - second.initial_price),
        final_value_diff: round_currency(first.final_value - second.final_value),
        total_depreciation_diff: round_currency(first.total_depreciation - second.total_depreciation),
        depreciation_percentage_diff: round_rate(
            first.depreciation_percentage - second.depreciation_percentage,
        ),
    }
}
