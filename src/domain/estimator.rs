//! Offline price estimation.
//!
//! A deterministic fallback for when the market source is unreachable or
//! returns nothing usable: flat brand base prices, an age-banded
//! depreciation fraction, and a model-name factor. Pure and total — this
//! never fails and performs no I/O.

use chrono::{Datelike, Utc};

use super::money::round_currency;

/// Flat base prices by brand, in USD.
const BRAND_BASE_PRICES: &[(&str, f64)] = &[
    ("TOYOTA", 30_000.0),
    ("HONDA", 28_000.0),
    ("FORD", 32_000.0),
    ("CHEVROLET", 33_000.0),
    ("BMW", 50_000.0),
    ("MERCEDES-BENZ", 55_000.0),
    ("AUDI", 48_000.0),
    ("LEXUS", 45_000.0),
    ("TESLA", 60_000.0),
    ("VOLKSWAGEN", 28_000.0),
    ("SUBARU", 27_000.0),
    ("NISSAN", 26_000.0),
    ("KIA", 24_000.0),
    ("HYUNDAI", 25_000.0),
    ("MAZDA", 26_000.0),
    ("JEEP", 35_000.0),
    ("DODGE", 32_000.0),
    ("RAM", 40_000.0),
    ("GMC", 38_000.0),
    ("CADILLAC", 50_000.0),
    ("LINCOLN", 48_000.0),
    ("ACURA", 40_000.0),
    ("INFINITI", 42_000.0),
    ("VOLVO", 45_000.0),
    ("PORSCHE", 80_000.0),
    ("JAGUAR", 60_000.0),
    ("LAND ROVER", 70_000.0),
    ("MINI", 30_000.0),
    ("MITSUBISHI", 25_000.0),
    ("BUICK", 32_000.0),
    ("CHRYSLER", 30_000.0),
    ("ALFA ROMEO", 45_000.0),
    ("GENESIS", 45_000.0),
    ("FIAT", 25_000.0),
    ("MASERATI", 90_000.0),
    ("BENTLEY", 200_000.0),
    ("FERRARI", 250_000.0),
    ("LAMBORGHINI", 300_000.0),
    ("ROLLS-ROYCE", 350_000.0),
    ("ASTON MARTIN", 200_000.0),
    ("MCLAREN", 250_000.0),
    ("BUGATTI", 2_000_000.0),
    ("LOTUS", 100_000.0),
];

/// Used when the brand is not in the table.
const DEFAULT_BASE_PRICE: f64 = 35_000.0;

const PREMIUM_KEYWORDS: &[&str] = &["premium", "luxury", "sport", "limited", "platinum", "elite"];
const ECONOMY_KEYWORDS: &[&str] = &["base", "standard", "economy", "basic"];
const PREMIUM_FACTOR: f64 = 1.2;
const ECONOMY_FACTOR: f64 = 0.9;

/// Age depreciation never exceeds 90% of the base price.
const MAX_AGE_DEPRECIATION: f64 = 0.90;

/// Estimated market price for a vehicle, based on its brand, model name and
/// age relative to the current calendar year. Never negative.
pub fn estimate(make: &str, model: &str, year: i32) -> f64 {
    estimate_at(make, model, year, Utc::now().year())
}

fn estimate_at(make: &str, model: &str, year: i32, current_year: i32) -> f64 {
    let age = (current_year - year).max(0);
    let remaining = 1.0 - age_depreciation(age);
    round_currency(brand_base_price(make) * model_factor(model) * remaining)
}

fn brand_base_price(make: &str) -> f64 {
    let make = make.trim().to_ascii_uppercase();
    BRAND_BASE_PRICES
        .iter()
        .find(|(brand, _)| *brand == make)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_BASE_PRICE)
}

/// Piecewise depreciation fraction by vehicle age: 10% for the first year,
/// then 8%/6%/4%/2% per year across the later bands.
fn age_depreciation(age: i32) -> f64 {
    let fraction = match age {
        ..=1 => 0.10,
        2..=3 => 0.10 + (age - 1) as f64 * 0.08,
        4..=6 => 0.26 + (age - 3) as f64 * 0.06,
        7..=10 => 0.44 + (age - 6) as f64 * 0.04,
        _ => 0.60 + (age - 10) as f64 * 0.02,
    };
    fraction.min(MAX_AGE_DEPRECIATION)
}

/// Premium keywords win over economy keywords when a model name carries both.
fn model_factor(model: &str) -> f64 {
    let model = model.to_lowercase();
    if PREMIUM_KEYWORDS.iter().any(|word| model.contains(word)) {
        PREMIUM_FACTOR
    } else if ECONOMY_KEYWORDS.iter().any(|word| model.contains(word)) {
        ECONOMY_FACTOR
    } else {
        1.0
    }
}
