//! Health report assembly and export
//!
//! A report runs every calculator whose inputs are present on a profile and
//! collects the results into optional sections. Sections whose inputs are
//! missing or rejected are skipped with a warning rather than failing the
//! whole report.

use crate::bmi::{BmiAssessment, BmiCalculator};
use crate::body_composition::{BodyFatAssessment, BodyFatCalculator};
use crate::energy::{EnergyCalculator, EnergyExpenditure};
use crate::error::ExportError;
use crate::fitness_age::{FitnessAgeCalculator, FitnessAgeEstimate, FitnessAgeInput};
use crate::heart_rate::{KarvonenCalculator, KarvonenZones};
use crate::hydration::{HydrationCalculator, HydrationPlan};
use crate::models::{EnergyLevel, SleepQuality, UserProfile};
use crate::nutrition::{MacroCalculator, MacroPlan};
use crate::sleep::{SleepOptimizer, SleepPlan};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Full health report for one profile
///
/// Each section is present only when the profile carries the inputs its
/// calculator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Name of the profile the report was generated for
    pub profile_name: String,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,

    /// Body mass index
    pub bmi: Option<BmiAssessment>,

    /// Harris-Benedict BMR/TDEE
    pub energy: Option<EnergyExpenditure>,

    /// US Navy body fat estimate
    pub body_fat: Option<BodyFatAssessment>,

    /// Karvonen heart rate zones
    pub heart_rate_zones: Option<KarvonenZones>,

    /// Calorie target and macro split
    pub macros: Option<MacroPlan>,

    /// Daily water intake
    pub hydration: Option<HydrationPlan>,

    /// Sleep schedule optimization
    pub sleep: Option<SleepPlan>,

    /// Fitness age estimate
    pub fitness_age: Option<FitnessAgeEstimate>,
}

impl HealthReport {
    /// Run every calculator the profile has inputs for
    pub fn from_profile(profile: &UserProfile) -> Self {
        HealthReport {
            profile_name: profile.name.clone(),
            generated_at: Utc::now(),
            bmi: bmi_section(profile),
            energy: energy_section(profile),
            body_fat: body_fat_section(profile),
            heart_rate_zones: heart_rate_section(profile),
            macros: macros_section(profile),
            hydration: hydration_section(profile),
            sleep: sleep_section(profile),
            fitness_age: fitness_age_section(profile),
        }
    }

    /// True when no section could be computed
    pub fn is_empty(&self) -> bool {
        self.section_count() == 0
    }

    /// Number of populated sections
    pub fn section_count(&self) -> usize {
        [
            self.bmi.is_some(),
            self.energy.is_some(),
            self.body_fat.is_some(),
            self.heart_rate_zones.is_some(),
            self.macros.is_some(),
            self.hydration.is_some(),
            self.sleep.is_some(),
            self.fitness_age.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count()
    }

    /// Export the report to a file in the given format
    pub fn export<P: AsRef<Path>>(
        &self,
        format: ExportFormat,
        output_path: P,
    ) -> Result<(), ExportError> {
        if self.is_empty() {
            return Err(ExportError::EmptyReport {
                reason: "profile has no inputs for any calculator".to_string(),
            });
        }
        match format {
            ExportFormat::Json => self.export_json(output_path),
            ExportFormat::Csv => self.export_csv(output_path),
            ExportFormat::Text => self.export_text(output_path),
        }
    }

    fn export_json<P: AsRef<Path>>(&self, output_path: P) -> Result<(), ExportError> {
        let file = std::fs::File::create(output_path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// One row per headline metric; list-valued details are left to the JSON
    /// and text formats
    fn export_csv<P: AsRef<Path>>(&self, output_path: P) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(output_path)?;
        writer.write_record(["metric", "value", "unit", "category"])?;

        if let Some(bmi) = &self.bmi {
            writer.write_record([
                "bmi",
                bmi.bmi.to_string().as_str(),
                "kg/m2",
                bmi.category.to_string().as_str(),
            ])?;
        }
        if let Some(energy) = &self.energy {
            writer.write_record(["bmr", energy.bmr_kcal.to_string().as_str(), "kcal/day", ""])?;
            writer.write_record(["tdee", energy.tdee_kcal.to_string().as_str(), "kcal/day", ""])?;
        }
        if let Some(body_fat) = &self.body_fat {
            writer.write_record([
                "body_fat",
                body_fat.body_fat_pct.to_string().as_str(),
                "%",
                body_fat.category.to_string().as_str(),
            ])?;
        }
        if let Some(zones) = &self.heart_rate_zones {
            writer.write_record(["max_hr", zones.max_hr.to_string().as_str(), "bpm", ""])?;
            for zone in &zones.zones {
                writer.write_record([
                    format!("zone:{}", zone.name).as_str(),
                    format!("{}-{}", zone.bpm_min, zone.bpm_max).as_str(),
                    "bpm",
                    "",
                ])?;
            }
        }
        if let Some(macros) = &self.macros {
            writer.write_record([
                "calories",
                macros.calories_kcal.to_string().as_str(),
                "kcal/day",
                "",
            ])?;
            writer.write_record(["protein", macros.protein_g.to_string().as_str(), "g/day", ""])?;
            writer.write_record(["carbs", macros.carbs_g.to_string().as_str(), "g/day", ""])?;
            writer.write_record(["fat", macros.fat_g.to_string().as_str(), "g/day", ""])?;
        }
        if let Some(hydration) = &self.hydration {
            writer.write_record(["water", hydration.total_ml.to_string().as_str(), "ml/day", ""])?;
        }
        if let Some(sleep) = &self.sleep {
            writer.write_record([
                "sleep_cycles",
                sleep.sleep_cycles.to_string().as_str(),
                "cycles",
                "",
            ])?;
        }
        if let Some(fitness_age) = &self.fitness_age {
            writer.write_record([
                "fitness_age",
                fitness_age.fitness_age.to_string().as_str(),
                "years",
                fitness_age.category.to_string().as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    fn export_text<P: AsRef<Path>>(&self, output_path: P) -> Result<(), ExportError> {
        let mut file = std::fs::File::create(output_path)?;
        write!(file, "{}", self.render_text())?;
        Ok(())
    }

    /// Render the report as plain text (also used for terminal output)
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("HEALTH REPORT\n");
        out.push_str(&format!("Profile: {}\n", self.profile_name));
        out.push_str(&format!(
            "Generated: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if let Some(bmi) = &self.bmi {
            out.push_str("BODY MASS INDEX\n");
            out.push_str(&format!("  BMI: {} ({})\n", bmi.bmi, bmi.category));
            out.push_str(&format!("  {}\n\n", bmi.advice));
        }
        if let Some(energy) = &self.energy {
            out.push_str("ENERGY EXPENDITURE (Harris-Benedict)\n");
            out.push_str(&format!("  BMR: {} kcal/day\n", energy.bmr_kcal));
            out.push_str(&format!("  TDEE: {} kcal/day\n\n", energy.tdee_kcal));
        }
        if let Some(body_fat) = &self.body_fat {
            out.push_str("BODY FAT (US Navy method)\n");
            out.push_str(&format!(
                "  Body fat: {}% ({})\n",
                body_fat.body_fat_pct, body_fat.category
            ));
            out.push_str(&format!("  {}\n\n", body_fat.advice));
        }
        if let Some(zones) = &self.heart_rate_zones {
            out.push_str("HEART RATE ZONES (Karvonen)\n");
            out.push_str(&format!("  Maximum heart rate: {} bpm\n", zones.max_hr));
            for zone in &zones.zones {
                out.push_str(&format!(
                    "  {:<16} {:>3}-{:<3} bpm  {}\n",
                    zone.name, zone.bpm_min, zone.bpm_max, zone.description
                ));
            }
            out.push('\n');
        }
        if let Some(macros) = &self.macros {
            out.push_str(&format!("NUTRITION PLAN ({})\n", macros.goal));
            out.push_str(&format!("  Calories: {} kcal/day\n", macros.calories_kcal));
            out.push_str(&format!(
                "  Protein: {} g   Carbs: {} g   Fat: {} g\n",
                macros.protein_g, macros.carbs_g, macros.fat_g
            ));
            out.push_str(&format!("  {}\n\n", macros.advice));
        }
        if let Some(hydration) = &self.hydration {
            out.push_str("HYDRATION\n");
            out.push_str(&format!("  Daily water intake: {} ml\n", hydration.total_ml));
            out.push_str(&format!(
                "  Base: {} ml   Activity: +{} ml   Climate: {:+} ml   Exercise: +{} ml\n",
                hydration.base_ml, hydration.activity_ml, hydration.climate_ml, hydration.exercise_ml
            ));
            out.push_str(&format!("  {}\n\n", hydration.advice));
        }
        if let Some(sleep) = &self.sleep {
            out.push_str("SLEEP SCHEDULE\n");
            out.push_str(&format!(
                "  Recommended bedtime: {}   Recommended wake time: {}\n",
                sleep.recommended_bedtime.format("%H:%M"),
                sleep.recommended_wake_time.format("%H:%M")
            ));
            out.push_str(&format!(
                "  Current schedule: {} ({} cycles)\n",
                sleep.total_sleep_formatted(),
                sleep.sleep_cycles
            ));
            out.push_str(&format!("  {}\n", sleep.advice));
            for tip in &sleep.tips {
                out.push_str(&format!("  - {}\n", tip));
            }
            out.push('\n');
        }
        if let Some(fitness_age) = &self.fitness_age {
            out.push_str("FITNESS AGE\n");
            out.push_str(&format!(
                "  Fitness age: {} ({:+} years, {})\n",
                fitness_age.fitness_age, fitness_age.age_difference, fitness_age.category
            ));
            out.push_str(&format!("  {}\n", fitness_age.advice));
            for improvement in &fitness_age.improvements {
                out.push_str(&format!("  - {}\n", improvement));
            }
            out.push('\n');
        }

        out
    }
}

fn bmi_section(profile: &UserProfile) -> Option<BmiAssessment> {
    let height = profile.height_cm?;
    let weight = profile.weight_kg?;
    run_section("bmi", BmiCalculator::calculate(height, weight))
}

fn energy_section(profile: &UserProfile) -> Option<EnergyExpenditure> {
    let sex = profile.sex?;
    let weight = profile.weight_kg?;
    let height = profile.height_cm?;
    let age = Decimal::from(profile.age?);
    let activity = profile.activity_level?;
    run_section(
        "energy",
        EnergyCalculator::calculate(sex, weight, height, age, activity, profile.goal),
    )
}

fn body_fat_section(profile: &UserProfile) -> Option<BodyFatAssessment> {
    let sex = profile.sex?;
    let height = profile.height_cm?.to_f64()?;
    let waist = profile.waist_cm?.to_f64()?;
    let neck = profile.neck_cm?.to_f64()?;
    let hip = match profile.hip_cm {
        Some(h) => Some(h.to_f64()?),
        None => None,
    };
    run_section(
        "body_fat",
        BodyFatCalculator::calculate(sex, height, waist, neck, hip),
    )
}

fn heart_rate_section(profile: &UserProfile) -> Option<KarvonenZones> {
    let age = profile.age?;
    let resting_hr = profile.resting_hr?;
    run_section("heart_rate", KarvonenCalculator::calculate(age, resting_hr))
}

fn macros_section(profile: &UserProfile) -> Option<MacroPlan> {
    let sex = profile.sex?;
    let weight = profile.weight_kg?;
    let height = profile.height_cm?;
    let age = Decimal::from(profile.age?);
    let activity = profile.activity_level?;
    let goal = profile.goal?;
    run_section(
        "macros",
        MacroCalculator::calculate(sex, weight, height, age, activity, goal),
    )
}

fn hydration_section(profile: &UserProfile) -> Option<HydrationPlan> {
    let weight = profile.weight_kg?;
    let activity = profile.activity_level?;
    let climate = profile.climate?;
    let exercise_hours = profile.exercise_hours.unwrap_or(Decimal::ZERO);
    run_section(
        "hydration",
        HydrationCalculator::calculate(weight, activity, climate, exercise_hours),
    )
}

fn sleep_section(profile: &UserProfile) -> Option<SleepPlan> {
    let wake = profile.wake_time?;
    let bed = profile.bed_time?;
    let quality = profile.sleep_quality.unwrap_or(SleepQuality::Average);
    let energy = profile.energy_level.unwrap_or(EnergyLevel::Moderate);
    Some(SleepOptimizer::calculate(wake, bed, quality, energy))
}

fn fitness_age_section(profile: &UserProfile) -> Option<FitnessAgeEstimate> {
    let input = FitnessAgeInput {
        age_years: profile.age?,
        sex: profile.sex?,
        weight_kg: profile.weight_kg?,
        height_cm: profile.height_cm?,
        resting_hr: profile.resting_hr?,
        vo2max: profile.vo2max?,
        exercise_frequency: profile.exercise_frequency?,
        smoking_status: profile.smoking_status?,
    };
    run_section("fitness_age", FitnessAgeCalculator::calculate(&input))
}

/// Unwrap a calculator result into an optional section, logging rejections
fn run_section<T>(section: &str, result: anyhow::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(section, %err, "skipping report section");
            None
        }
    }
}
