//! Fitness age estimation
//!
//! Starts from chronological age and applies signed adjustments from five
//! independent factors: BMI, resting heart rate, VO2max, exercise frequency,
//! and smoking history. The result is an age a person's physiology "behaves
//! like" rather than a clinical measurement.

use crate::error::CalculationError;
use crate::models::{ExerciseFrequency, Sex, SmokingStatus};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs to the fitness age estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessAgeInput {
    /// Chronological age in years
    pub age_years: u8,

    /// Biological sex (collected for future model revisions; the current
    /// adjustment tables are sex-independent)
    pub sex: Sex,

    /// Weight in kilograms
    pub weight_kg: Decimal,

    /// Height in centimeters
    pub height_cm: Decimal,

    /// Resting heart rate in bpm
    pub resting_hr: u16,

    /// VO2max in ml/kg/min
    pub vo2max: f64,

    /// Weekly exercise frequency band
    pub exercise_frequency: ExerciseFrequency,

    /// Smoking history
    pub smoking_status: SmokingStatus,
}

/// Fitness age categories from the difference to chronological age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessAgeCategory {
    /// 5+ years younger than chronological age
    Excellent,
    /// 2-4 years younger
    Good,
    /// Within 2 years either way
    Average,
    /// 3+ years older
    NeedsImprovement,
}

impl FitnessAgeCategory {
    /// Classify an age difference (fitness age − chronological age)
    pub fn from_difference(age_difference: i32) -> Self {
        if age_difference <= -5 {
            FitnessAgeCategory::Excellent
        } else if age_difference <= -2 {
            FitnessAgeCategory::Good
        } else if age_difference <= 2 {
            FitnessAgeCategory::Average
        } else {
            FitnessAgeCategory::NeedsImprovement
        }
    }

    /// Fixed advice string for the category
    pub fn advice(&self) -> &'static str {
        match self {
            FitnessAgeCategory::Excellent => {
                "Your fitness age is significantly younger than your chronological age! Keep up the great work."
            }
            FitnessAgeCategory::Good => {
                "Your fitness age is younger than your chronological age. You're on the right track!"
            }
            FitnessAgeCategory::Average => {
                "Your fitness age is close to your chronological age. There's room for improvement."
            }
            FitnessAgeCategory::NeedsImprovement => {
                "Your fitness age is higher than your chronological age. Focus on improving your fitness metrics."
            }
        }
    }

    fn base_improvements(&self) -> [&'static str; 4] {
        match self {
            FitnessAgeCategory::Excellent => [
                "Maintain your current exercise routine",
                "Focus on recovery and injury prevention",
                "Consider adding variety to your workouts",
                "Share your fitness journey to inspire others",
            ],
            FitnessAgeCategory::Good => [
                "Gradually increase exercise intensity",
                "Add strength training if not already included",
                "Focus on flexibility and mobility",
                "Maintain a balanced diet",
            ],
            FitnessAgeCategory::Average => [
                "Increase weekly exercise frequency",
                "Add high-intensity interval training",
                "Improve sleep quality",
                "Reduce sedentary time",
            ],
            FitnessAgeCategory::NeedsImprovement => [
                "Start with moderate exercise 3-4 times per week",
                "Gradually increase physical activity",
                "Focus on improving cardiovascular health",
                "Consider consulting a fitness professional",
            ],
        }
    }
}

impl fmt::Display for FitnessAgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitnessAgeCategory::Excellent => write!(f, "Excellent"),
            FitnessAgeCategory::Good => write!(f, "Good"),
            FitnessAgeCategory::Average => write!(f, "Average"),
            FitnessAgeCategory::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// Result of a fitness age estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessAgeEstimate {
    /// Estimated fitness age in years
    pub fitness_age: i32,

    /// Fitness age minus chronological age; negative is better
    pub age_difference: i32,

    /// Category from the age difference
    pub category: FitnessAgeCategory,

    /// Advice for the category
    pub advice: String,

    /// Category improvements, extended by metric-specific suggestions
    pub improvements: Vec<String>,
}

/// Fitness age calculation utilities
pub struct FitnessAgeCalculator;

impl FitnessAgeCalculator {
    /// Estimate fitness age from physiology and lifestyle factors
    pub fn calculate(input: &FitnessAgeInput) -> Result<FitnessAgeEstimate> {
        if input.age_years == 0 {
            return Err(anyhow!(CalculationError::invalid("fitness_age", "age_years", 0)));
        }
        if input.weight_kg <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid(
                "fitness_age",
                "weight_kg",
                input.weight_kg
            )));
        }
        if input.height_cm <= Decimal::ZERO {
            return Err(anyhow!(CalculationError::invalid(
                "fitness_age",
                "height_cm",
                input.height_cm
            )));
        }
        if input.resting_hr == 0 {
            return Err(anyhow!(CalculationError::invalid("fitness_age", "resting_hr", 0)));
        }
        if input.vo2max <= 0.0 {
            return Err(anyhow!(CalculationError::invalid(
                "fitness_age",
                "vo2max",
                input.vo2max
            )));
        }

        let height_m = input.height_cm / dec!(100);
        let bmi = input.weight_kg / (height_m * height_m);

        let adjustment = bmi_adjustment(bmi)
            + resting_hr_adjustment(input.resting_hr)
            + vo2max_adjustment(input.vo2max)
            + exercise_adjustment(input.exercise_frequency)
            + smoking_adjustment(input.smoking_status);

        let fitness_age = input.age_years as i32 + adjustment;
        let age_difference = fitness_age - input.age_years as i32;
        let category = FitnessAgeCategory::from_difference(age_difference);

        let mut improvements: Vec<String> = category
            .base_improvements()
            .iter()
            .map(|s| s.to_string())
            .collect();

        // Metric-specific suggestions on top of the category list
        if input.resting_hr >= 70 {
            improvements.push(
                "Work on improving cardiovascular fitness to lower resting heart rate".to_string(),
            );
        }
        if input.vo2max < 40.0 {
            improvements.push("Incorporate more cardio exercises to improve VO2 max".to_string());
        }
        if bmi >= dec!(25) {
            improvements
                .push("Focus on healthy weight management through diet and exercise".to_string());
        }

        tracing::debug!(%bmi, adjustment, fitness_age, "calculated fitness age");

        Ok(FitnessAgeEstimate {
            fitness_age,
            age_difference,
            category,
            advice: category.advice().to_string(),
            improvements,
        })
    }
}

fn bmi_adjustment(bmi: Decimal) -> i32 {
    if bmi < dec!(18.5) {
        2
    } else if bmi >= dec!(30) {
        5
    } else if bmi >= dec!(25) {
        3
    } else {
        0
    }
}

fn resting_hr_adjustment(resting_hr: u16) -> i32 {
    if resting_hr < 60 {
        -2
    } else if resting_hr >= 80 {
        3
    } else if resting_hr >= 70 {
        1
    } else {
        0
    }
}

fn vo2max_adjustment(vo2max: f64) -> i32 {
    if vo2max >= 50.0 {
        -5
    } else if vo2max >= 40.0 {
        -3
    } else if vo2max >= 30.0 {
        0
    } else {
        5
    }
}

fn exercise_adjustment(frequency: ExerciseFrequency) -> i32 {
    match frequency {
        ExerciseFrequency::Sedentary => 5,
        ExerciseFrequency::Light => 2,
        ExerciseFrequency::Moderate => -1,
        ExerciseFrequency::Active => -3,
        ExerciseFrequency::VeryActive => -5,
    }
}

fn smoking_adjustment(status: SmokingStatus) -> i32 {
    match status {
        SmokingStatus::Current => 8,
        SmokingStatus::Former => 3,
        SmokingStatus::Never => -1,
    }
}
