//! Body fat percentage estimation using the US Navy circumference method
//!
//! The method estimates body fat from tape measurements alone. Because the
//! formulas take base-10 logarithms of circumference differences, the girth
//! terms must be strictly positive; impossible measurement combinations are
//! rejected before any math runs.

use crate::error::CalculationError;
use crate::models::Sex;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body fat categories with sex-specific cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFatCategory {
    /// Minimum fat needed for basic physiological function
    EssentialFat,
    /// Typical for competitive athletes
    Athletic,
    /// Lean and fit
    Fitness,
    /// Healthy general-population range
    Average,
    /// Above the healthy range
    High,
}

impl BodyFatCategory {
    /// Classify a (pre-rounding) body fat percentage for the given sex
    ///
    /// Cutoffs differ by sex:
    /// - Male: <6 Essential, <14 Athletic, <18 Fitness, <25 Average, else High
    /// - Female: <14 Essential, <21 Athletic, <25 Fitness, <32 Average, else High
    pub fn from_percentage(body_fat: f64, sex: Sex) -> Self {
        let cutoffs = match sex {
            Sex::Male => [6.0, 14.0, 18.0, 25.0],
            Sex::Female => [14.0, 21.0, 25.0, 32.0],
        };

        if body_fat < cutoffs[0] {
            BodyFatCategory::EssentialFat
        } else if body_fat < cutoffs[1] {
            BodyFatCategory::Athletic
        } else if body_fat < cutoffs[2] {
            BodyFatCategory::Fitness
        } else if body_fat < cutoffs[3] {
            BodyFatCategory::Average
        } else {
            BodyFatCategory::High
        }
    }

    /// Fixed advice string for the category
    pub fn advice(&self) -> &'static str {
        match self {
            BodyFatCategory::EssentialFat => {
                "Your body fat is at essential levels. Consider increasing body fat slightly for optimal health."
            }
            BodyFatCategory::Athletic => {
                "Excellent body composition! Maintain your current fitness routine."
            }
            BodyFatCategory::Fitness => {
                "Good body composition. Consider strength training to maintain muscle mass."
            }
            BodyFatCategory::Average => {
                "Healthy body fat percentage. Focus on balanced nutrition and regular exercise."
            }
            BodyFatCategory::High => {
                "Consider consulting a healthcare provider for a personalized fitness and nutrition plan."
            }
        }
    }
}

impl fmt::Display for BodyFatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyFatCategory::EssentialFat => write!(f, "Essential Fat"),
            BodyFatCategory::Athletic => write!(f, "Athletic"),
            BodyFatCategory::Fitness => write!(f, "Fitness"),
            BodyFatCategory::Average => write!(f, "Average"),
            BodyFatCategory::High => write!(f, "High"),
        }
    }
}

/// Result of a body fat estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatAssessment {
    /// Estimated body fat percentage, rounded to 1 decimal place
    pub body_fat_pct: f64,

    /// Sex the classification was made for
    pub sex: Sex,

    /// Body composition category
    pub category: BodyFatCategory,

    /// Advice for the category
    pub advice: String,
}

/// US Navy body fat calculation utilities
pub struct BodyFatCalculator;

impl BodyFatCalculator {
    /// Estimate body fat percentage from circumference measurements
    ///
    /// `hip_cm` is required when `sex` is female and ignored otherwise.
    pub fn calculate(
        sex: Sex,
        height_cm: f64,
        waist_cm: f64,
        neck_cm: f64,
        hip_cm: Option<f64>,
    ) -> Result<BodyFatAssessment> {
        if height_cm <= 0.0 {
            return Err(anyhow!(CalculationError::invalid("body_fat", "height_cm", height_cm)));
        }
        if waist_cm <= 0.0 {
            return Err(anyhow!(CalculationError::invalid("body_fat", "waist_cm", waist_cm)));
        }
        if neck_cm <= 0.0 {
            return Err(anyhow!(CalculationError::invalid("body_fat", "neck_cm", neck_cm)));
        }

        let body_fat = match sex {
            Sex::Male => {
                let girth = waist_cm - neck_cm;
                if girth <= 0.0 {
                    return Err(anyhow!(CalculationError::OutOfDomain {
                        calculation: "body_fat".to_string(),
                        reason: "waist circumference must exceed neck circumference".to_string(),
                    }));
                }
                495.0 / (1.0324 - 0.19077 * girth.log10() + 0.15456 * height_cm.log10()) - 450.0
            }
            Sex::Female => {
                let hip_cm = hip_cm.ok_or_else(|| {
                    anyhow!(CalculationError::MissingProfile {
                        field: "hip_cm".to_string(),
                    })
                })?;
                if hip_cm <= 0.0 {
                    return Err(anyhow!(CalculationError::invalid("body_fat", "hip_cm", hip_cm)));
                }
                let girth = waist_cm + hip_cm - neck_cm;
                if girth <= 0.0 {
                    return Err(anyhow!(CalculationError::OutOfDomain {
                        calculation: "body_fat".to_string(),
                        reason: "waist plus hip circumference must exceed neck circumference"
                            .to_string(),
                    }));
                }
                495.0 / (1.29579 - 0.35004 * girth.log10() + 0.22100 * height_cm.log10()) - 450.0
            }
        };

        let category = BodyFatCategory::from_percentage(body_fat, sex);

        tracing::debug!(body_fat, ?category, "calculated body fat percentage");

        Ok(BodyFatAssessment {
            body_fat_pct: (body_fat * 10.0).round() / 10.0,
            sex,
            category,
            advice: category.advice().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_male_body_fat() {
        // 495 / (1.0324 - 0.19077*log10(47) + 0.15456*log10(178)) - 450 = 16.44
        let result = BodyFatCalculator::calculate(Sex::Male, 178.0, 85.0, 38.0, None).unwrap();
        assert_eq!(result.body_fat_pct, 16.4);
        assert_eq!(result.category, BodyFatCategory::Fitness);
    }

    #[test]
    fn test_female_requires_hip() {
        let result = BodyFatCalculator::calculate(Sex::Female, 165.0, 70.0, 33.0, None);
        assert!(result.is_err());

        let result =
            BodyFatCalculator::calculate(Sex::Female, 165.0, 70.0, 33.0, Some(95.0)).unwrap();
        assert!(result.body_fat_pct > 0.0);
    }

    #[test]
    fn test_male_ignores_hip() {
        let without = BodyFatCalculator::calculate(Sex::Male, 178.0, 85.0, 38.0, None).unwrap();
        let with = BodyFatCalculator::calculate(Sex::Male, 178.0, 85.0, 38.0, Some(95.0)).unwrap();
        assert_eq!(without.body_fat_pct, with.body_fat_pct);
    }

    #[test]
    fn test_rejects_degenerate_girth() {
        // waist <= neck makes the male log argument non-positive
        assert!(BodyFatCalculator::calculate(Sex::Male, 178.0, 38.0, 38.0, None).is_err());
        assert!(BodyFatCalculator::calculate(Sex::Male, 178.0, 30.0, 38.0, None).is_err());
        // waist + hip <= neck for the female variant
        assert!(
            BodyFatCalculator::calculate(Sex::Female, 165.0, 10.0, 30.0, Some(15.0)).is_err()
        );
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(BodyFatCalculator::calculate(Sex::Male, 0.0, 85.0, 38.0, None).is_err());
        assert!(BodyFatCalculator::calculate(Sex::Male, 178.0, -85.0, 38.0, None).is_err());
        assert!(BodyFatCalculator::calculate(Sex::Female, 165.0, 70.0, 33.0, Some(0.0)).is_err());
    }

    #[test]
    fn test_sex_specific_categories() {
        // 20% is Average for men but Athletic for women
        assert_eq!(
            BodyFatCategory::from_percentage(20.0, Sex::Male),
            BodyFatCategory::Average
        );
        assert_eq!(
            BodyFatCategory::from_percentage(20.0, Sex::Female),
            BodyFatCategory::Athletic
        );
    }
}
