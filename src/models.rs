use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex, used by the sex-specific formula variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

/// Self-reported daily activity level
///
/// Carries two unrelated multiplier tables: the TDEE multiplier applied to
/// basal metabolic rate, and the fraction of base water added for activity in
/// the hydration calculation. The tables are independent and must stay so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR to obtain total daily energy expenditure
    pub fn tdee_multiplier(&self) -> Decimal {
        match self {
            ActivityLevel::Sedentary => dec!(1.2),
            ActivityLevel::Light => dec!(1.375),
            ActivityLevel::Moderate => dec!(1.55),
            ActivityLevel::Active => dec!(1.725),
            ActivityLevel::VeryActive => dec!(1.9),
        }
    }

    /// Fraction of base water intake added for daily activity
    pub fn hydration_multiplier(&self) -> Decimal {
        match self {
            ActivityLevel::Sedentary => dec!(0.3),
            ActivityLevel::Light => dec!(0.4),
            ActivityLevel::Moderate => dec!(0.5),
            ActivityLevel::Active => dec!(0.6),
            ActivityLevel::VeryActive => dec!(0.7),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "Sedentary"),
            ActivityLevel::Light => write!(f, "Light"),
            ActivityLevel::Moderate => write!(f, "Moderate"),
            ActivityLevel::Active => write!(f, "Active"),
            ActivityLevel::VeryActive => write!(f, "Very Active"),
        }
    }
}

/// Ambient climate bands used by the hydration calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Climate {
    /// Below 10°C
    Cold,
    /// 10-25°C
    Temperate,
    /// 25-35°C
    Hot,
    /// Above 35°C
    VeryHot,
}

impl Climate {
    /// Climate multiplier; the surplus over 1.0 is applied to base water
    pub fn multiplier(&self) -> Decimal {
        match self {
            Climate::Cold => dec!(0.9),
            Climate::Temperate => dec!(1.0),
            Climate::Hot => dec!(1.2),
            Climate::VeryHot => dec!(1.4),
        }
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Climate::Cold => write!(f, "Cold"),
            Climate::Temperate => write!(f, "Temperate"),
            Climate::Hot => write!(f, "Hot"),
            Climate::VeryHot => write!(f, "Very Hot"),
        }
    }
}

/// Body-composition goal driving calorie adjustment and macro split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Lose => write!(f, "Lose Weight"),
            Goal::Maintain => write!(f, "Maintain Weight"),
            Goal::Gain => write!(f, "Gain Weight"),
        }
    }
}

/// Weekly exercise frequency bands for the fitness age estimate
///
/// Distinct from [`ActivityLevel`]: the bands are labelled by sessions per
/// week rather than intensity, and carry their own adjustment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseFrequency {
    /// Little or no exercise
    Sedentary,
    /// 1-2 times/week
    Light,
    /// 3-4 times/week
    Moderate,
    /// 5-6 times/week
    Active,
    /// Daily exercise
    VeryActive,
}

impl fmt::Display for ExerciseFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseFrequency::Sedentary => write!(f, "Sedentary"),
            ExerciseFrequency::Light => write!(f, "Light"),
            ExerciseFrequency::Moderate => write!(f, "Moderate"),
            ExerciseFrequency::Active => write!(f, "Active"),
            ExerciseFrequency::VeryActive => write!(f, "Very Active"),
        }
    }
}

/// Smoking history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmokingStatus::Never => write!(f, "Never Smoked"),
            SmokingStatus::Former => write!(f, "Former Smoker"),
            SmokingStatus::Current => write!(f, "Current Smoker"),
        }
    }
}

/// Self-reported sleep quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    /// Frequent waking, difficulty falling asleep
    Poor,
    /// Occasional disturbances
    Average,
    /// Restful, uninterrupted sleep
    Good,
}

impl fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepQuality::Poor => write!(f, "Poor"),
            SleepQuality::Average => write!(f, "Average"),
            SleepQuality::Good => write!(f, "Good"),
        }
    }
}

/// Self-reported daytime energy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Frequent fatigue
    Low,
    /// Consistent energy
    Moderate,
    /// Excess energy, difficulty winding down
    High,
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyLevel::Low => write!(f, "Low"),
            EnergyLevel::Moderate => write!(f, "Moderate"),
            EnergyLevel::High => write!(f, "High"),
        }
    }
}

/// User profile containing measurements and lifestyle data
///
/// Every field beyond the name is optional; each calculator requires its own
/// subset and a report simply skips sections whose inputs are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name for the profile
    pub name: String,

    /// Biological sex
    pub sex: Option<Sex>,

    /// Age in whole years
    pub age: Option<u8>,

    /// Height in centimeters
    pub height_cm: Option<Decimal>,

    /// Weight in kilograms
    pub weight_kg: Option<Decimal>,

    /// Neck circumference in centimeters
    pub neck_cm: Option<Decimal>,

    /// Waist circumference in centimeters
    pub waist_cm: Option<Decimal>,

    /// Hip circumference in centimeters (required for the female body-fat
    /// formula)
    pub hip_cm: Option<Decimal>,

    /// Resting heart rate in beats per minute
    pub resting_hr: Option<u16>,

    /// Measured or estimated VO2max in ml/kg/min
    pub vo2max: Option<f64>,

    /// Daily activity level
    pub activity_level: Option<ActivityLevel>,

    /// Typical ambient climate
    pub climate: Option<Climate>,

    /// Body-composition goal
    pub goal: Option<Goal>,

    /// Daily exercise duration in hours
    pub exercise_hours: Option<Decimal>,

    /// Weekly exercise frequency band
    pub exercise_frequency: Option<ExerciseFrequency>,

    /// Smoking history
    pub smoking_status: Option<SmokingStatus>,

    /// Usual wake-up time
    pub wake_time: Option<NaiveTime>,

    /// Usual bed time
    pub bed_time: Option<NaiveTime>,

    /// Self-reported sleep quality
    pub sleep_quality: Option<SleepQuality>,

    /// Self-reported daytime energy level
    pub energy_level: Option<EnergyLevel>,

    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserProfile {
    /// Create an empty profile with just a name
    pub fn new(name: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        UserProfile {
            name: name.into(),
            sex: None,
            age: None,
            height_cm: None,
            weight_kg: None,
            neck_cm: None,
            waist_cm: None,
            hip_cm: None,
            resting_hr: None,
            vo2max: None,
            activity_level: None,
            climate: None,
            goal: None,
            exercise_hours: None,
            exercise_frequency: None,
            smoking_status: None,
            wake_time: None,
            bed_time: None,
            sleep_quality: None,
            energy_level: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the basic anthropometrics needed by the energy and
    /// macro calculators are present
    pub fn has_anthropometrics(&self) -> bool {
        self.sex.is_some()
            && self.age.is_some()
            && self.height_cm.is_some()
            && self.weight_kg.is_some()
    }

    /// Check whether the circumference measurements needed by the body-fat
    /// calculator are present
    pub fn has_circumferences(&self) -> bool {
        let base = self.height_cm.is_some() && self.neck_cm.is_some() && self.waist_cm.is_some();
        match self.sex {
            Some(Sex::Female) => base && self.hip_cm.is_some(),
            Some(Sex::Male) => base,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_multiplier_tables_are_distinct() {
        // The TDEE and hydration tables cover different ranges and must not
        // be collapsed into one.
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ] {
            assert!(level.tdee_multiplier() >= dec!(1.2));
            assert!(level.hydration_multiplier() <= dec!(0.7));
        }
        assert_eq!(ActivityLevel::Moderate.tdee_multiplier(), dec!(1.55));
        assert_eq!(ActivityLevel::Moderate.hydration_multiplier(), dec!(0.5));
    }

    #[test]
    fn test_profile_completeness_checks() {
        let mut profile = UserProfile::new("test");
        assert!(!profile.has_anthropometrics());
        assert!(!profile.has_circumferences());

        profile.sex = Some(Sex::Male);
        profile.age = Some(30);
        profile.height_cm = Some(dec!(178));
        profile.weight_kg = Some(dec!(75));
        assert!(profile.has_anthropometrics());

        profile.neck_cm = Some(dec!(38));
        profile.waist_cm = Some(dec!(85));
        assert!(profile.has_circumferences());

        // Female profiles additionally need a hip measurement
        profile.sex = Some(Sex::Female);
        assert!(!profile.has_circumferences());
        profile.hip_cm = Some(dec!(95));
        assert!(profile.has_circumferences());
    }
}
