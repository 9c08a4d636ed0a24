//! Basal metabolic rate and daily energy expenditure (Harris-Benedict)
//!
//! Uses the revised Harris-Benedict equations. The nutrition planner in
//! [`crate::nutrition`] deliberately uses Mifflin-St Jeor instead; the two
//! tools serve different audiences and their formulas are kept separate.

use crate::error::CalculationError;
use crate::models::{ActivityLevel, Goal, Sex};
use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Daily energy expenditure estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyExpenditure {
    /// Basal metabolic rate in kcal/day
    pub bmr_kcal: u32,

    /// Total daily energy expenditure in kcal/day
    pub tdee_kcal: u32,

    /// Activity level the TDEE was computed for
    pub activity_level: ActivityLevel,

    /// Goal carried through for presentation; this calculator performs no
    /// goal-based calorie adjustment
    pub goal: Option<Goal>,
}

/// BMR/TDEE calculation utilities
pub struct EnergyCalculator;

impl EnergyCalculator {
    /// Calculate BMR and TDEE using the Harris-Benedict equations
    pub fn calculate(
        sex: Sex,
        weight_kg: Decimal,
        height_cm: Decimal,
        age_years: Decimal,
        activity_level: ActivityLevel,
        goal: Option<Goal>,
    ) -> Result<EnergyExpenditure> {
        if weight_kg <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("bmr", "weight_kg", weight_kg)));
        }
        if height_cm <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("bmr", "height_cm", height_cm)));
        }
        if age_years <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("bmr", "age_years", age_years)));
        }

        let bmr = match sex {
            Sex::Male => {
                dec!(88.362) + dec!(13.397) * weight_kg + dec!(4.799) * height_cm
                    - dec!(5.677) * age_years
            }
            Sex::Female => {
                dec!(447.593) + dec!(9.247) * weight_kg + dec!(3.098) * height_cm
                    - dec!(4.330) * age_years
            }
        };

        let tdee = bmr * activity_level.tdee_multiplier();

        tracing::debug!(%bmr, %tdee, ?activity_level, "calculated energy expenditure");

        Ok(EnergyExpenditure {
            bmr_kcal: round_kcal(bmr, "bmr")?,
            tdee_kcal: round_kcal(tdee, "tdee")?,
            activity_level,
            goal,
        })
    }
}

fn round_kcal(value: Decimal, field: &str) -> Result<u32> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .ok_or_else(|| {
            anyhow!(CalculationError::OutOfDomain {
                calculation: "bmr".to_string(),
                reason: format!("{} is not representable as kcal/day", field),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_male_bmr() {
        // 88.362 + 13.397*70 + 4.799*170 - 5.677*25 = 1700.057
        let result = EnergyCalculator::calculate(
            Sex::Male,
            dec!(70),
            dec!(170),
            dec!(25),
            ActivityLevel::Moderate,
            None,
        )
        .unwrap();
        assert_eq!(result.bmr_kcal, 1700);
        assert_eq!(result.tdee_kcal, 2635); // 1700.057 * 1.55 = 2635.09
    }

    #[test]
    fn test_reference_female_bmr() {
        // 447.593 + 9.247*60 + 3.098*165 - 4.330*30 = 1383.683
        let result = EnergyCalculator::calculate(
            Sex::Female,
            dec!(60),
            dec!(165),
            dec!(30),
            ActivityLevel::Sedentary,
            Some(Goal::Maintain),
        )
        .unwrap();
        assert_eq!(result.bmr_kcal, 1384);
        assert_eq!(result.tdee_kcal, 1660); // 1383.683 * 1.2 = 1660.42
        assert_eq!(result.goal, Some(Goal::Maintain));
    }

    #[test]
    fn test_goal_does_not_change_output() {
        // The goal is presentation-only here; calorie adjustment belongs to
        // the nutrition planner.
        let base = EnergyCalculator::calculate(
            Sex::Male,
            dec!(80),
            dec!(180),
            dec!(40),
            ActivityLevel::Active,
            None,
        )
        .unwrap();
        for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
            let with_goal = EnergyCalculator::calculate(
                Sex::Male,
                dec!(80),
                dec!(180),
                dec!(40),
                ActivityLevel::Active,
                Some(goal),
            )
            .unwrap();
            assert_eq!(with_goal.bmr_kcal, base.bmr_kcal);
            assert_eq!(with_goal.tdee_kcal, base.tdee_kcal);
        }
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(EnergyCalculator::calculate(
            Sex::Male,
            dec!(0),
            dec!(170),
            dec!(25),
            ActivityLevel::Light,
            None
        )
        .is_err());
        assert!(EnergyCalculator::calculate(
            Sex::Female,
            dec!(70),
            dec!(-1),
            dec!(25),
            ActivityLevel::Light,
            None
        )
        .is_err());
        assert!(EnergyCalculator::calculate(
            Sex::Female,
            dec!(70),
            dec!(170),
            dec!(0),
            ActivityLevel::Light,
            None
        )
        .is_err());
    }
}
