//! Body Mass Index calculation and classification

use crate::error::CalculationError;
use anyhow::{anyhow, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// BMI categories using the standard WHO cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI 18.5 to 24.9
    Normal,
    /// BMI 25.0 to 29.9
    Overweight,
    /// BMI 30.0 and above
    Obese,
}

impl BmiCategory {
    /// Classify a (pre-rounding) BMI value
    pub fn from_bmi(bmi: Decimal) -> Self {
        if bmi < dec!(18.5) {
            BmiCategory::Underweight
        } else if bmi < dec!(25) {
            BmiCategory::Normal
        } else if bmi < dec!(30) {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Fixed advice string for the category
    pub fn advice(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "Consider a balanced diet with more calories and strength training."
            }
            BmiCategory::Normal => "Great! Maintain your current healthy lifestyle.",
            BmiCategory::Overweight => "Consider regular exercise and a balanced diet.",
            BmiCategory::Obese => "Consult a healthcare provider for a personalized plan.",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::Normal => write!(f, "Normal"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// Result of a BMI calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiAssessment {
    /// BMI in kg/m², rounded to 1 decimal place
    pub bmi: Decimal,

    /// Weight category
    pub category: BmiCategory,

    /// Advice for the category
    pub advice: String,
}

/// BMI calculation utilities
pub struct BmiCalculator;

impl BmiCalculator {
    /// Calculate BMI from height and weight
    ///
    /// Classification happens before rounding so that values like 18.45
    /// (displayed as 18.5) still fall in the Underweight bucket.
    pub fn calculate(height_cm: Decimal, weight_kg: Decimal) -> Result<BmiAssessment> {
        if height_cm <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("bmi", "height_cm", height_cm)));
        }
        if weight_kg <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid("bmi", "weight_kg", weight_kg)));
        }

        let height_m = height_cm / dec!(100);
        let bmi = weight_kg / (height_m * height_m);
        let category = BmiCategory::from_bmi(bmi);

        tracing::debug!(%bmi, ?category, "calculated BMI");

        Ok(BmiAssessment {
            bmi: bmi.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            category,
            advice: category.advice().to_string(),
        })
    }
}
