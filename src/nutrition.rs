//! Daily calorie target and macronutrient split
//!
//! BMR here comes from the Mifflin-St Jeor equation, not the Harris-Benedict
//! variant in [`crate::energy`]. The two estimators disagree by design — the
//! macro planner follows current nutrition guidance while the energy tool
//! keeps the classic equations — so they stay separate code paths.

use crate::error::CalculationError;
use crate::models::{ActivityLevel, Goal, Sex};
use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Calorie target and macro gram breakdown for a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroPlan {
    /// Daily calorie target after the goal adjustment
    pub calories_kcal: u32,

    /// Daily protein in grams
    pub protein_g: u32,

    /// Daily carbohydrates in grams
    pub carbs_g: u32,

    /// Daily fat in grams
    pub fat_g: u32,

    /// Goal the plan was computed for
    pub goal: Goal,

    /// Advice for the goal
    pub advice: String,
}

/// Per-goal constants for the macro split
fn goal_parameters(goal: Goal) -> (Decimal, Decimal, Decimal) {
    // (calorie adjustment, protein g per kg, fraction of calories from fat)
    match goal {
        Goal::Lose => (dec!(-500), dec!(2.2), dec!(0.25)),
        Goal::Maintain => (dec!(0), dec!(1.8), dec!(0.30)),
        Goal::Gain => (dec!(500), dec!(2.0), dec!(0.25)),
    }
}

fn goal_advice(goal: Goal) -> &'static str {
    match goal {
        Goal::Lose => {
            "Focus on high protein intake to preserve muscle mass while in a caloric deficit."
        }
        Goal::Maintain => {
            "Balanced macro distribution for maintenance. Adjust based on performance and energy levels."
        }
        Goal::Gain => {
            "Higher carb intake to support muscle growth and recovery. Ensure adequate protein for muscle synthesis."
        }
    }
}

/// Macro distribution calculation utilities
pub struct MacroCalculator;

impl MacroCalculator {
    /// Calculate the daily calorie target and macro split
    pub fn calculate(
        sex: Sex,
        weight_kg: Decimal,
        height_cm: Decimal,
        age_years: Decimal,
        activity_level: ActivityLevel,
        goal: Goal,
    ) -> Result<MacroPlan> {
        if weight_kg <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("macros", "weight_kg", weight_kg)));
        }
        if height_cm <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("macros", "height_cm", height_cm)));
        }
        if age_years <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("macros", "age_years", age_years)));
        }

        // Mifflin-St Jeor BMR
        let bmr = dec!(10) * weight_kg + dec!(6.25) * height_cm - dec!(5) * age_years
            + match sex {
                Sex::Male => dec!(5),
                Sex::Female => dec!(-161),
            };

        let tdee = bmr * activity_level.tdee_multiplier();

        let (adjustment, protein_per_kg, fat_fraction) = goal_parameters(goal);
        let adjusted = tdee + adjustment;

        // Protein is set by body weight, fat by calorie fraction, and carbs
        // absorb the remainder. The gram values feeding the carb remainder
        // are unrounded.
        let protein = weight_kg * protein_per_kg;
        let fat = adjusted * fat_fraction / dec!(9);
        let carbs = (adjusted - protein * dec!(4) - fat * dec!(9)) / dec!(4);

        tracing::debug!(%bmr, %tdee, %adjusted, ?goal, "calculated macro plan");

        Ok(MacroPlan {
            calories_kcal: round_positive(adjusted, "calories")?,
            protein_g: round_positive(protein, "protein")?,
            carbs_g: round_positive(carbs, "carbs")?,
            fat_g: round_positive(fat, "fat")?,
            goal,
            advice: goal_advice(goal).to_string(),
        })
    }
}

fn round_positive(value: Decimal, field: &str) -> Result<u32> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .ok_or_else(|| {
            anyhow!(CalculationError::OutOfDomain {
                calculation: "macros".to_string(),
                reason: format!("calorie budget too small: {} would be negative", field),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintain_plan() {
        // Male, 70 kg, 170 cm, 25 y: BMR = 700 + 1062.5 - 125 + 5 = 1642.5
        // TDEE at 1.55 = 2545.875, maintain -> no adjustment
        let plan = MacroCalculator::calculate(
            Sex::Male,
            dec!(70),
            dec!(170),
            dec!(25),
            ActivityLevel::Moderate,
            Goal::Maintain,
        )
        .unwrap();
        assert_eq!(plan.calories_kcal, 2546);
        assert_eq!(plan.protein_g, 126); // 70 * 1.8
        assert_eq!(plan.fat_g, 85); // 2545.875 * 0.30 / 9 = 84.86
        // carbs absorb the remainder: (2545.875 - 504 - 763.7625) / 4 = 319.53
        assert_eq!(plan.carbs_g, 320);
    }

    #[test]
    fn test_lose_plan_has_deficit_and_higher_protein() {
        let maintain = MacroCalculator::calculate(
            Sex::Female,
            dec!(60),
            dec!(165),
            dec!(30),
            ActivityLevel::Light,
            Goal::Maintain,
        )
        .unwrap();
        let lose = MacroCalculator::calculate(
            Sex::Female,
            dec!(60),
            dec!(165),
            dec!(30),
            ActivityLevel::Light,
            Goal::Lose,
        )
        .unwrap();

        assert_eq!(maintain.calories_kcal - lose.calories_kcal, 500);
        assert_eq!(lose.protein_g, 132); // 60 * 2.2
        assert_eq!(maintain.protein_g, 108); // 60 * 1.8
    }

    #[test]
    fn test_gain_plan_surplus() {
        let maintain = MacroCalculator::calculate(
            Sex::Male,
            dec!(80),
            dec!(180),
            dec!(28),
            ActivityLevel::Active,
            Goal::Maintain,
        )
        .unwrap();
        let gain = MacroCalculator::calculate(
            Sex::Male,
            dec!(80),
            dec!(180),
            dec!(28),
            ActivityLevel::Active,
            Goal::Gain,
        )
        .unwrap();
        assert_eq!(gain.calories_kcal - maintain.calories_kcal, 500);
        assert_eq!(gain.protein_g, 160); // 80 * 2.0
    }

    #[test]
    fn test_diverges_from_harris_benedict() {
        // Same inputs as the energy module's reference case; Mifflin-St Jeor
        // yields a different BMR (1642.5 vs 1700.057), which is intentional.
        let plan = MacroCalculator::calculate(
            Sex::Male,
            dec!(70),
            dec!(170),
            dec!(25),
            ActivityLevel::Moderate,
            Goal::Maintain,
        )
        .unwrap();
        assert_ne!(plan.calories_kcal, 2635);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(MacroCalculator::calculate(
            Sex::Male,
            dec!(0),
            dec!(170),
            dec!(25),
            ActivityLevel::Moderate,
            Goal::Maintain
        )
        .is_err());
        assert!(MacroCalculator::calculate(
            Sex::Male,
            dec!(70),
            dec!(170),
            dec!(-25),
            ActivityLevel::Moderate,
            Goal::Maintain
        )
        .is_err());
    }
}
