//! Year-by-year exponential decay model.
//!
//! Each ownership year loses `1 - exp(-k)` of the current value, where `k`
//! starts from a per-year base rate and is adjusted for vehicle class, fuel
//! type and annual mileage.

use super::entities::{FuelType, ValuationYear, VehicleClass};
use super::money::{round_currency, round_rate};

/// Base decay rates for ownership years 1..=5.
const BASE_RATES: [f64; 5] = [0.19, 0.17, 0.14, 0.12, 0.10];

/// Decay rate for every year beyond the fifth.
const LATE_YEAR_RATE: f64 = 0.08;

/// Rate adjustment per mile above (or below) the annual baseline.
const MILEAGE_IMPACT: f64 = 0.000_15;
const BASELINE_ANNUAL_MILEAGE: f64 = 12_000.0;

/// Nominal floor: the decay rate never drops below 2%, whatever the mileage
/// adjustment subtracts.
const MIN_RATE: f64 = 0.02;

/// Replacement rates for ownership years 1 and 2, where class and fuel type
/// dominate resale behavior.
#[derive(Clone, Copy, Debug)]
struct EarlyYearRates {
    year1: f64,
    year2: f64,
}

/// Class-stage overrides. Applied before the fuel stage.
const CLASS_OVERRIDES: &[(VehicleClass, EarlyYearRates)] = &[(
    VehicleClass::Luxury,
    EarlyYearRates {
        year1: 0.22,
        year2: 0.19,
    },
)];

/// Fuel-stage overrides. Applied last, so they win over the class stage.
const FUEL_OVERRIDES: &[(FuelType, EarlyYearRates)] = &[
    (
        FuelType::Electric,
        EarlyYearRates {
            year1: 0.25,
            year2: 0.20,
        },
    ),
    (
        FuelType::Hybrid,
        EarlyYearRates {
            year1: 0.17,
            year2: 0.15,
        },
    ),
];

/// One computed year: the boundary-rounded summary plus the unrounded end
/// value the caller carries into the next year.
#[derive(Clone, Debug)]
pub struct DepreciationStep {
    pub summary: ValuationYear,
    pub carry_value: f64,
}

/// Base decay rate for a given ownership year after the class and fuel
/// override stages.
pub fn base_rate(year_index: u32, class: VehicleClass, fuel: FuelType) -> f64 {
    let mut rates = BASE_RATES;
    for (candidate, early) in CLASS_OVERRIDES {
        if *candidate == class {
            rates[0] = early.year1;
            rates[1] = early.year2;
        }
    }
    for (candidate, early) in FUEL_OVERRIDES {
        if *candidate == fuel {
            rates[0] = early.year1;
            rates[1] = early.year2;
        }
    }

    match year_index {
        1..=5 => rates[(year_index - 1) as usize],
        _ => LATE_YEAR_RATE,
    }
}

/// Applies one year of decay to `current_value`.
pub fn depreciate_year(
    current_value: f64,
    year_index: u32,
    class: VehicleClass,
    fuel: FuelType,
    annual_mileage: f64,
) -> DepreciationStep {
    let mileage_adjustment = (annual_mileage - BASELINE_ANNUAL_MILEAGE) * MILEAGE_IMPACT;
    let rate = (base_rate(year_index, class, fuel) + mileage_adjustment).max(MIN_RATE);

    let decayed = current_value * (-rate).exp();
    // The value never increases, whatever the arithmetic says.
    let end_value = decayed.min(current_value);

    let effective_rate = if current_value > 0.0 {
        (1.0 - end_value / current_value) * 100.0
    } else {
        0.0
    };

    DepreciationStep {
        summary: ValuationYear {
            year_index,
            start_value: round_currency(current_value),
            depreciation_amount: round_currency(current_value - end_value),
            end_value: round_currency(end_value),
            effective_rate_percent: round_rate(effective_rate),
        },
        carry_value: end_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_year_sedan_at_baseline_mileage() {
        let step = depreciate_year(30_000.0, 1, VehicleClass::Sedan, FuelType::Gasoline, 12_000.0);
        let expected_end = 30_000.0 * (-0.19_f64).exp();

        assert!((step.carry_value - expected_end).abs() < 1e-9);
        assert!((step.summary.end_value - round_currency(expected_end)).abs() < f64::EPSILON);
        assert!((step.summary.depreciation_amount - (30_000.0 - expected_end)).abs() < 0.005);
        assert!((step.summary.effective_rate_percent - 17.3).abs() < 1e-9);
    }

    #[test]
    fn base_rates_follow_year_schedule() {
        let sedan = VehicleClass::Sedan;
        let gas = FuelType::Gasoline;
        assert!((base_rate(1, sedan, gas) - 0.19).abs() < f64::EPSILON);
        assert!((base_rate(3, sedan, gas) - 0.14).abs() < f64::EPSILON);
        assert!((base_rate(5, sedan, gas) - 0.10).abs() < f64::EPSILON);
        assert!((base_rate(6, sedan, gas) - 0.08).abs() < f64::EPSILON);
        assert!((base_rate(12, sedan, gas) - 0.08).abs() < f64::EPSILON);
    }

    #[test]
    fn luxury_class_raises_early_rates() {
        assert!((base_rate(1, VehicleClass::Luxury, FuelType::Gasoline) - 0.22).abs() < f64::EPSILON);
        assert!((base_rate(2, VehicleClass::Luxury, FuelType::Gasoline) - 0.19).abs() < f64::EPSILON);
        // Later years are untouched by the overrides.
        assert!((base_rate(3, VehicleClass::Luxury, FuelType::Gasoline) - 0.14).abs() < f64::EPSILON);
    }

    #[test]
    fn fuel_override_wins_over_class_override() {
        assert!((base_rate(1, VehicleClass::Luxury, FuelType::Electric) - 0.25).abs() < f64::EPSILON);
        assert!((base_rate(2, VehicleClass::Luxury, FuelType::Electric) - 0.20).abs() < f64::EPSILON);
    }

    #[test]
    fn hybrid_depreciates_slower_early_on() {
        assert!((base_rate(1, VehicleClass::Sedan, FuelType::Hybrid) - 0.17).abs() < f64::EPSILON);
        assert!((base_rate(2, VehicleClass::Sedan, FuelType::Hybrid) - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn plug_in_hybrid_keeps_base_rates() {
        assert!(
            (base_rate(1, VehicleClass::Sedan, FuelType::PlugInHybrid) - 0.19).abs() < f64::EPSILON
        );
    }

    #[test]
    fn extra_mileage_accelerates_decay() {
        let baseline =
            depreciate_year(30_000.0, 1, VehicleClass::Sedan, FuelType::Gasoline, 12_000.0);
        let heavy = depreciate_year(30_000.0, 1, VehicleClass::Sedan, FuelType::Gasoline, 13_000.0);
        assert!(heavy.carry_value < baseline.carry_value);

        // 1000 extra miles add 0.15 to k.
        let expected = 30_000.0 * (-(0.19 + 0.15_f64)).exp();
        assert!((heavy.carry_value - expected).abs() < 1e-9);
    }

    #[test]
    fn low_mileage_bottoms_out_at_rate_floor() {
        let step = depreciate_year(30_000.0, 5, VehicleClass::Sedan, FuelType::Gasoline, 0.0);
        let expected = 30_000.0 * (-0.02_f64).exp();
        assert!((step.carry_value - expected).abs() < 1e-9);
        assert!((step.summary.effective_rate_percent - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_value_yields_zero_rate() {
        let step = depreciate_year(0.0, 1, VehicleClass::Sedan, FuelType::Gasoline, 12_000.0);
        assert!((step.summary.effective_rate_percent).abs() < f64::EPSILON);
        assert!((step.carry_value).abs() < f64::EPSILON);
        assert!((step.summary.depreciation_amount).abs() < f64::EPSILON);
    }

    #[test]
    fn end_value_never_exceeds_start_value() {
        for year in 1..=10 {
            let step =
                depreciate_year(25_000.0, year, VehicleClass::Suv, FuelType::Diesel, 30_000.0);
            assert!(step.carry_value <= 25_000.0);
            assert!(step.summary.end_value <= step.summary.start_value);
        }
    }
}
