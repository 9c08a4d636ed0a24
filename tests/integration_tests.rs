use chrono::NaiveTime;
use rust_decimal_macros::dec;
use wellrs::models::{
    ActivityLevel, Climate, ExerciseFrequency, Goal, Sex, SmokingStatus, UserProfile,
};

/// Integration tests that exercise complete calculator and report workflows

#[cfg(test)]
mod integration_tests {
    use super::*;
    use wellrs::config::AppConfig;
    use wellrs::report::{ExportFormat, HealthReport};
    use wellrs::{
        BmiCalculator, BodyFatCalculator, ClassicZoneCalculator, EnergyCalculator,
        FitnessAgeCalculator, FitnessAgeInput, HydrationCalculator, KarvonenCalculator,
        MacroCalculator, SleepOptimizer,
    };

    fn create_test_profile() -> UserProfile {
        let mut profile = UserProfile::new("test_user");
        profile.sex = Some(Sex::Male);
        profile.age = Some(30);
        profile.height_cm = Some(dec!(178));
        profile.weight_kg = Some(dec!(75));
        profile.neck_cm = Some(dec!(38));
        profile.waist_cm = Some(dec!(85));
        profile.resting_hr = Some(60);
        profile.vo2max = Some(45.0);
        profile.activity_level = Some(ActivityLevel::Moderate);
        profile.climate = Some(Climate::Temperate);
        profile.goal = Some(Goal::Maintain);
        profile.exercise_hours = Some(dec!(1));
        profile.exercise_frequency = Some(ExerciseFrequency::Moderate);
        profile.smoking_status = Some(SmokingStatus::Never);
        profile.wake_time = NaiveTime::from_hms_opt(7, 0, 0);
        profile.bed_time = NaiveTime::from_hms_opt(23, 0, 0);
        profile
    }

    /// Reference values every release must reproduce exactly
    #[test]
    fn test_reference_calculations() {
        let bmi = BmiCalculator::calculate(dec!(170), dec!(70)).unwrap();
        assert_eq!(bmi.bmi, dec!(24.2));
        assert_eq!(bmi.category.to_string(), "Normal");

        let energy = EnergyCalculator::calculate(
            Sex::Male,
            dec!(70),
            dec!(170),
            dec!(25),
            ActivityLevel::Moderate,
            None,
        )
        .unwrap();
        assert_eq!(energy.bmr_kcal, 1700);
        assert_eq!(energy.tdee_kcal, 2635);

        let zones = KarvonenCalculator::calculate(30, 60).unwrap();
        assert_eq!(zones.max_hr, 187);
        let vo2max_zone = zones.zones.last().unwrap();
        assert_eq!((vo2max_zone.bpm_min, vo2max_zone.bpm_max), (181, 187));

        let hydration = HydrationCalculator::calculate(
            dec!(70),
            ActivityLevel::Moderate,
            Climate::Temperate,
            dec!(1),
        )
        .unwrap();
        assert_eq!(hydration.total_ml, 3650);

        let body_fat = BodyFatCalculator::calculate(Sex::Male, 178.0, 85.0, 38.0, None).unwrap();
        assert_eq!(body_fat.body_fat_pct, 16.4);
    }

    /// The calculators hold no state; identical inputs give identical outputs
    #[test]
    fn test_calculators_are_idempotent() {
        let a = BmiCalculator::calculate(dec!(182.5), dec!(77.3)).unwrap();
        let b = BmiCalculator::calculate(dec!(182.5), dec!(77.3)).unwrap();
        assert_eq!(a, b);

        let a = BodyFatCalculator::calculate(Sex::Female, 165.0, 70.0, 33.0, Some(95.0)).unwrap();
        let b = BodyFatCalculator::calculate(Sex::Female, 165.0, 70.0, 33.0, Some(95.0)).unwrap();
        assert_eq!(a, b);

        let a = KarvonenCalculator::calculate(42, 58).unwrap();
        let b = KarvonenCalculator::calculate(42, 58).unwrap();
        assert_eq!(a, b);

        let a = SleepOptimizer::calculate(
            NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(22, 45, 0).unwrap(),
            wellrs::models::SleepQuality::Poor,
            wellrs::models::EnergyLevel::Low,
        );
        let b = SleepOptimizer::calculate(
            NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(22, 45, 0).unwrap(),
            wellrs::models::SleepQuality::Poor,
            wellrs::models::EnergyLevel::Low,
        );
        assert_eq!(a, b);
    }

    /// The two BMR equations and the two max-HR formulas are separate tools
    /// and must keep disagreeing on the same inputs
    #[test]
    fn test_intentional_formula_divergence() {
        let harris = EnergyCalculator::calculate(
            Sex::Male,
            dec!(70),
            dec!(170),
            dec!(25),
            ActivityLevel::Moderate,
            None,
        )
        .unwrap();
        let mifflin = MacroCalculator::calculate(
            Sex::Male,
            dec!(70),
            dec!(170),
            dec!(25),
            ActivityLevel::Moderate,
            Goal::Maintain,
        )
        .unwrap();
        // Harris-Benedict TDEE 2635 vs Mifflin-St Jeor 2546
        assert_ne!(harris.tdee_kcal, mifflin.calories_kcal);

        let karvonen = KarvonenCalculator::calculate(40, 60).unwrap();
        let classic = ClassicZoneCalculator::calculate(40, 60).unwrap();
        // Tanaka 180 vs 220-age 180... at age 40 they happen to coincide
        assert_eq!(karvonen.max_hr, 180);
        assert_eq!(classic.max_hr, 180);
        // but the zone models still differ (7 vs 5 zones)
        assert_eq!(karvonen.zones.len(), 7);
        assert_eq!(classic.zones.len(), 5);

        let karvonen = KarvonenCalculator::calculate(60, 60).unwrap();
        let classic = ClassicZoneCalculator::calculate(60, 60).unwrap();
        assert_eq!(karvonen.max_hr, 166); // 208 - 42
        assert_eq!(classic.max_hr, 160); // 220 - 60
    }

    /// Complete profile -> report -> export workflow
    #[test]
    fn test_report_workflow() {
        let profile = create_test_profile();
        let report = HealthReport::from_profile(&profile);
        assert_eq!(report.section_count(), 8);

        // Cross-check a few sections against direct calculator calls
        let bmi = BmiCalculator::calculate(dec!(178), dec!(75)).unwrap();
        assert_eq!(report.bmi.as_ref().unwrap().bmi, bmi.bmi);

        let zones = KarvonenCalculator::calculate(30, 60).unwrap();
        assert_eq!(report.heart_rate_zones.as_ref().unwrap().max_hr, zones.max_hr);

        let dir = tempfile::tempdir().unwrap();
        for (format, name) in [
            (ExportFormat::Json, "report.json"),
            (ExportFormat::Csv, "report.csv"),
            (ExportFormat::Text, "report.txt"),
        ] {
            let path = dir.path().join(name);
            report.export(format, &path).unwrap();
            assert!(path.metadata().unwrap().len() > 0);
        }
    }

    /// Config persistence feeds the report workflow
    #[test]
    fn test_config_profile_report_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.upsert_profile("athlete", create_test_profile());
        config.save(&config_path).unwrap();

        let loaded = AppConfig::load(&config_path).unwrap();
        let profile = loaded.get_profile(None).expect("default profile");
        let report = HealthReport::from_profile(profile);
        assert_eq!(report.section_count(), 8);
    }

    /// Partial profiles degrade to partial reports, never errors
    #[test]
    fn test_partial_profile_report() {
        let mut profile = UserProfile::new("minimal");
        profile.age = Some(28);
        profile.resting_hr = Some(55);

        let report = HealthReport::from_profile(&profile);
        assert!(report.heart_rate_zones.is_some());
        assert_eq!(report.section_count(), 1);
    }

    /// Female body-fat path needs the hip measurement end to end
    #[test]
    fn test_female_body_fat_in_report() {
        let mut profile = create_test_profile();
        profile.sex = Some(Sex::Female);

        let report = HealthReport::from_profile(&profile);
        assert!(report.body_fat.is_none()); // no hip measurement yet

        profile.hip_cm = Some(dec!(95));
        let report = HealthReport::from_profile(&profile);
        assert!(report.body_fat.is_some());
    }

    /// Fitness age workflow with adjustment verification
    #[test]
    fn test_fitness_age_workflow() {
        let input = FitnessAgeInput {
            age_years: 35,
            sex: Sex::Female,
            weight_kg: dec!(62),
            height_cm: dec!(168),
            resting_hr: 52,
            vo2max: 52.0,
            exercise_frequency: ExerciseFrequency::VeryActive,
            smoking_status: SmokingStatus::Never,
        };
        // BMI 22.0 (0), RHR 52 (-2), VO2max 52 (-5), very active (-5),
        // never smoked (-1) -> fitness age 22
        let estimate = FitnessAgeCalculator::calculate(&input).unwrap();
        assert_eq!(estimate.fitness_age, 22);
        assert_eq!(estimate.age_difference, -13);
        assert_eq!(estimate.category.to_string(), "Excellent");
    }
}
