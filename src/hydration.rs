//! Daily water intake recommendation
//!
//! Base intake is 30 ml per kg of body weight, adjusted for activity level,
//! climate, and exercise duration. The climate adjustment is the surplus (or
//! deficit, in cold climates) over the temperate baseline.

use crate::error::CalculationError;
use crate::models::{ActivityLevel, Climate};
use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Milliliters of extra water per hour of exercise
const EXERCISE_ML_PER_HOUR: Decimal = dec!(500);

/// Base milliliters of water per kilogram of body weight
const BASE_ML_PER_KG: Decimal = dec!(30);

/// Daily water intake recommendation with its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationPlan {
    /// Base intake from body weight, in ml
    pub base_ml: u32,

    /// Extra intake for daily activity, in ml
    pub activity_ml: u32,

    /// Climate adjustment in ml; negative in cold climates
    pub climate_ml: i32,

    /// Extra intake for exercise duration, in ml
    pub exercise_ml: u32,

    /// Total recommended intake, in ml
    pub total_ml: u32,

    /// Advice for the total
    pub advice: String,
}

fn total_advice(total_ml: u32) -> &'static str {
    if total_ml < 2000 {
        "Your water needs are relatively low. Focus on maintaining consistent hydration throughout the day."
    } else if total_ml < 3000 {
        "Moderate water needs. Consider carrying a water bottle and setting reminders to drink regularly."
    } else {
        "High water needs. Use a large water bottle and consider electrolyte supplements during intense activity."
    }
}

/// Hydration calculation utilities
pub struct HydrationCalculator;

impl HydrationCalculator {
    /// Calculate the recommended daily water intake
    ///
    /// The reported breakdown values are rounded individually; the total is
    /// rounded from the unrounded sum.
    pub fn calculate(
        weight_kg: Decimal,
        activity_level: ActivityLevel,
        climate: Climate,
        exercise_hours: Decimal,
    ) -> Result<HydrationPlan> {
        if weight_kg <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("hydration", "weight_kg", weight_kg)));
        }
        if exercise_hours < Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid(
                "hydration",
                "exercise_hours",
                exercise_hours
            )));
        }

        let base = weight_kg * BASE_ML_PER_KG;
        let activity = base * activity_level.hydration_multiplier();
        let climate_adj = base * (climate.multiplier() - dec!(1));
        let exercise = exercise_hours * EXERCISE_ML_PER_HOUR;

        let total = base + activity + climate_adj + exercise;

        let total_ml = total
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .ok_or_else(|| {
                anyhow!(CalculationError::OutOfDomain {
                    calculation: "hydration".to_string(),
                    reason: "total intake out of range".to_string(),
                })
            })?;

        tracing::debug!(%base, %activity, %climate_adj, %exercise, total_ml, "calculated hydration plan");

        Ok(HydrationPlan {
            base_ml: round_ml(base),
            activity_ml: round_ml(activity),
            climate_ml: climate_adj
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i32()
                .unwrap_or(0),
            exercise_ml: round_ml(exercise),
            total_ml,
            advice: total_advice(total_ml).to_string(),
        })
    }
}

fn round_ml(value: Decimal) -> u32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_hydration() {
        // 70 kg, moderate, temperate, 1 h exercise:
        // base 2100, activity 1050, climate 0, exercise 500 -> 3650 total
        let plan = HydrationCalculator::calculate(
            dec!(70),
            ActivityLevel::Moderate,
            Climate::Temperate,
            dec!(1),
        )
        .unwrap();
        assert_eq!(plan.base_ml, 2100);
        assert_eq!(plan.activity_ml, 1050);
        assert_eq!(plan.climate_ml, 0);
        assert_eq!(plan.exercise_ml, 500);
        assert_eq!(plan.total_ml, 3650);
    }

    #[test]
    fn test_cold_climate_reduces_total() {
        let plan = HydrationCalculator::calculate(
            dec!(70),
            ActivityLevel::Sedentary,
            Climate::Cold,
            dec!(0),
        )
        .unwrap();
        assert_eq!(plan.climate_ml, -210); // 2100 * (0.9 - 1)
        assert_eq!(plan.total_ml, 2520); // 2100 + 630 - 210
    }

    #[test]
    fn test_hot_climate_surcharge() {
        let plan = HydrationCalculator::calculate(
            dec!(80),
            ActivityLevel::Light,
            Climate::VeryHot,
            dec!(0.5),
        )
        .unwrap();
        assert_eq!(plan.base_ml, 2400);
        assert_eq!(plan.activity_ml, 960);
        assert_eq!(plan.climate_ml, 960); // 2400 * 0.4
        assert_eq!(plan.exercise_ml, 250);
        assert_eq!(plan.total_ml, 4570);
    }

    #[test]
    fn test_advice_thresholds() {
        let low = HydrationCalculator::calculate(
            dec!(40),
            ActivityLevel::Sedentary,
            Climate::Cold,
            dec!(0),
        )
        .unwrap();
        assert!(low.total_ml < 2000);
        assert!(low.advice.contains("relatively low"));

        let moderate = HydrationCalculator::calculate(
            dec!(60),
            ActivityLevel::Light,
            Climate::Temperate,
            dec!(0),
        )
        .unwrap();
        assert!(moderate.total_ml >= 2000 && moderate.total_ml < 3000);
        assert!(moderate.advice.contains("Moderate"));

        let high = HydrationCalculator::calculate(
            dec!(70),
            ActivityLevel::Moderate,
            Climate::Temperate,
            dec!(1),
        )
        .unwrap();
        assert!(high.total_ml >= 3000);
        assert!(high.advice.contains("High"));
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(HydrationCalculator::calculate(
            dec!(0),
            ActivityLevel::Moderate,
            Climate::Temperate,
            dec!(1)
        )
        .is_err());
        assert!(HydrationCalculator::calculate(
            dec!(70),
            ActivityLevel::Moderate,
            Climate::Temperate,
            dec!(-1)
        )
        .is_err());
    }
}
