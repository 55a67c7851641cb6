//! Core vehicle and valuation types.

use serde::{Deserialize, Serialize};

/// Broad body-style classes recognized by the depreciation model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    Sedan,
    Suv,
    Truck,
    Van,
    Coupe,
    Convertible,
    Hatchback,
    Wagon,
    Luxury,
}

impl VehicleClass {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::Sedan => "Sedan",
            VehicleClass::Suv => "SUV",
            VehicleClass::Truck => "Truck",
            VehicleClass::Van => "Van",
            VehicleClass::Coupe => "Coupe",
            VehicleClass::Convertible => "Convertible",
            VehicleClass::Hatchback => "Hatchback",
            VehicleClass::Wagon => "Wagon",
            VehicleClass::Luxury => "Luxury",
        }
    }

    /// Best-effort class inference from a model name, for callers whose
    /// catalog does not carry a body style. Falls back to `Sedan`.
    pub fn from_model_name(model: &str) -> Self {
        let model = model.to_lowercase();
        let matches = |words: &[&str]| words.iter().any(|word| model.contains(word));

        if matches(&["truck", "pickup"]) {
            VehicleClass::Truck
        } else if matches(&["suv", "crossover", "4wd", "awd"]) {
            VehicleClass::Suv
        } else if matches(&["van", "minivan"]) {
            VehicleClass::Van
        } else if matches(&["convertible", "roadster"]) {
            VehicleClass::Convertible
        } else if matches(&["coupe"]) {
            VehicleClass::Coupe
        } else if matches(&["hatchback"]) {
            VehicleClass::Hatchback
        } else if matches(&["wagon", "estate"]) {
            VehicleClass::Wagon
        } else {
            VehicleClass::Sedan
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    PlugInHybrid,
    Electric,
    FlexFuel,
}

impl FuelType {
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
            FuelType::PlugInHybrid => "Plug-in Hybrid",
            FuelType::Electric => "Electric",
            FuelType::FlexFuel => "Flex Fuel",
        }
    }
}

/// A vehicle as supplied by the caller. Immutable once constructed; identity
/// for caching purposes is (make, model, year, fuel type).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleDescriptor {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vehicle_class: VehicleClass,
    pub fuel_type: FuelType,
}

impl VehicleDescriptor {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        vehicle_class: VehicleClass,
        fuel_type: FuelType,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            vehicle_class,
            fuel_type,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Where a resolved price came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceOrigin {
    /// Fresh from the remote market source.
    Market,
    /// Served from the price cache within its expiry window.
    Cache,
    /// Computed by the offline estimator after the remote source failed.
    Estimate,
}

/// One year of the valuation curve. Monetary fields are rounded to cents,
/// the rate to one decimal place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationYear {
    pub year_index: u32,
    pub start_value: f64,
    pub depreciation_amount: f64,
    pub end_value: f64,
    pub effective_rate_percent: f64,
}

/// Full projection of a vehicle's value across the ownership horizon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationCurve {
    pub initial_price: f64,
    pub final_value: f64,
    pub total_depreciation: f64,
    pub depreciation_percentage: f64,
    pub price_origin: PriceOrigin,
    pub years: Vec<ValuationYear>,
}

impl ValuationCurve {
    /// Share of the initial price still held at the end of the horizon.
    pub fn retention_percentage(&self) -> f64 {
        100.0 - self.depreciation_percentage
    }
}

/// Component-wise difference between exactly two curves (first minus second).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairwiseDifference {
    pub initial_price_diff: f64,
    pub final_value_diff: f64,
    pub total_depreciation_diff: f64,
    pub depreciation_percentage_diff: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub curves: Vec<ValuationCurve>,
    /// Present only when exactly two vehicles were compared.
    pub pairwise_difference: Option<PairwiseDifference>,
}
