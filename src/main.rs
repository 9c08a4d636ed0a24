use anyhow::{anyhow, Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use wellrs::config::AppConfig;
use wellrs::logging::{init_logging, LogLevel};
use wellrs::models::{
    ActivityLevel, Climate, EnergyLevel, ExerciseFrequency, Goal, Sex, SleepQuality,
    SmokingStatus, UserProfile,
};
use wellrs::report::{ExportFormat, HealthReport};
use wellrs::{
    BmiCalculator, BodyFatCalculator, ClassicZoneCalculator, EnergyCalculator,
    FitnessAgeCalculator, FitnessAgeInput, HydrationCalculator, KarvonenCalculator,
    MacroCalculator, SleepOptimizer,
};

/// wellrs - Health Metrics CLI
///
/// A Rust-based toolbox of health and fitness calculators: BMI, energy
/// expenditure, body fat, heart rate zones, macros, hydration, sleep
/// scheduling, and fitness age.
#[derive(Parser)]
#[command(name = "wellrs")]
#[command(author = "wellrs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Health Metrics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Heart rate zone calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ZoneMethod {
    /// Seven zones, Tanaka maximum (208 - 0.7*age)
    Karvonen,
    /// Five zones, traditional maximum (220 - age)
    Classic,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate body mass index
    Bmi {
        /// Height in centimeters
        #[arg(long)]
        height_cm: Decimal,

        /// Weight in kilograms
        #[arg(long)]
        weight_kg: Decimal,
    },

    /// Calculate BMR and TDEE (Harris-Benedict)
    Bmr {
        /// Biological sex
        #[arg(long, value_enum)]
        sex: Sex,

        /// Weight in kilograms
        #[arg(long)]
        weight_kg: Decimal,

        /// Height in centimeters
        #[arg(long)]
        height_cm: Decimal,

        /// Age in years
        #[arg(long)]
        age: Decimal,

        /// Activity level
        #[arg(long, value_enum, default_value = "sedentary")]
        activity: ActivityLevel,
    },

    /// Estimate body fat percentage (US Navy method)
    BodyFat {
        /// Biological sex
        #[arg(long, value_enum)]
        sex: Sex,

        /// Height in centimeters
        #[arg(long)]
        height_cm: f64,

        /// Waist circumference in centimeters
        #[arg(long)]
        waist_cm: f64,

        /// Neck circumference in centimeters
        #[arg(long)]
        neck_cm: f64,

        /// Hip circumference in centimeters (required for females)
        #[arg(long)]
        hip_cm: Option<f64>,
    },

    /// Calculate heart rate training zones
    HeartRate {
        /// Age in years
        #[arg(long)]
        age: u8,

        /// Resting heart rate in bpm
        #[arg(long)]
        resting_hr: u16,

        /// Zone calculation method
        #[arg(short, long, value_enum, default_value = "karvonen")]
        method: ZoneMethod,
    },

    /// Calculate daily calories and macro split (Mifflin-St Jeor)
    Macros {
        /// Biological sex
        #[arg(long, value_enum)]
        sex: Sex,

        /// Weight in kilograms
        #[arg(long)]
        weight_kg: Decimal,

        /// Height in centimeters
        #[arg(long)]
        height_cm: Decimal,

        /// Age in years
        #[arg(long)]
        age: Decimal,

        /// Activity level
        #[arg(long, value_enum, default_value = "moderate")]
        activity: ActivityLevel,

        /// Body-composition goal
        #[arg(long, value_enum, default_value = "maintain")]
        goal: Goal,
    },

    /// Calculate recommended daily water intake
    Hydration {
        /// Weight in kilograms
        #[arg(long)]
        weight_kg: Decimal,

        /// Activity level
        #[arg(long, value_enum, default_value = "moderate")]
        activity: ActivityLevel,

        /// Ambient climate
        #[arg(long, value_enum, default_value = "temperate")]
        climate: Climate,

        /// Daily exercise duration in hours
        #[arg(long, default_value = "0")]
        exercise_hours: Decimal,
    },

    /// Optimize a sleep schedule around 90-minute cycles
    Sleep {
        /// Current wake time (HH:MM)
        #[arg(long)]
        wake_time: String,

        /// Current bed time (HH:MM)
        #[arg(long)]
        bed_time: String,

        /// Sleep quality
        #[arg(long, value_enum, default_value = "average")]
        quality: SleepQuality,

        /// Daytime energy level
        #[arg(long, value_enum, default_value = "moderate")]
        energy: EnergyLevel,
    },

    /// Estimate fitness age from physiology and lifestyle
    FitnessAge {
        /// Chronological age in years
        #[arg(long)]
        age: u8,

        /// Biological sex
        #[arg(long, value_enum)]
        sex: Sex,

        /// Weight in kilograms
        #[arg(long)]
        weight_kg: Decimal,

        /// Height in centimeters
        #[arg(long)]
        height_cm: Decimal,

        /// Resting heart rate in bpm
        #[arg(long)]
        resting_hr: u16,

        /// VO2max in ml/kg/min
        #[arg(long)]
        vo2max: f64,

        /// Weekly exercise frequency
        #[arg(long, value_enum, default_value = "moderate")]
        exercise_frequency: ExerciseFrequency,

        /// Smoking history
        #[arg(long, value_enum, default_value = "never")]
        smoking: SmokingStatus,
    },

    /// Generate a full health report from a stored profile
    Report {
        /// Profile name (defaults to the configured default profile)
        #[arg(short, long)]
        profile: Option<String>,

        /// Output file path; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (json, csv, text)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Manage stored profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List stored profiles
    List,

    /// Show a stored profile
    Show {
        /// Profile name (defaults to the configured default profile)
        name: Option<String>,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,

        #[arg(long, value_enum)]
        sex: Option<Sex>,

        #[arg(long)]
        age: Option<u8>,

        #[arg(long)]
        height_cm: Option<Decimal>,

        #[arg(long)]
        weight_kg: Option<Decimal>,

        #[arg(long)]
        neck_cm: Option<Decimal>,

        #[arg(long)]
        waist_cm: Option<Decimal>,

        #[arg(long)]
        hip_cm: Option<Decimal>,

        #[arg(long)]
        resting_hr: Option<u16>,

        #[arg(long)]
        vo2max: Option<f64>,

        #[arg(long, value_enum)]
        activity: Option<ActivityLevel>,

        #[arg(long, value_enum)]
        climate: Option<Climate>,

        #[arg(long, value_enum)]
        goal: Option<Goal>,

        #[arg(long)]
        exercise_hours: Option<Decimal>,

        #[arg(long, value_enum)]
        exercise_frequency: Option<ExerciseFrequency>,

        #[arg(long, value_enum)]
        smoking: Option<SmokingStatus>,

        /// Wake time (HH:MM)
        #[arg(long)]
        wake_time: Option<String>,

        /// Bed time (HH:MM)
        #[arg(long)]
        bed_time: Option<String>,

        #[arg(long, value_enum)]
        sleep_quality: Option<SleepQuality>,

        #[arg(long, value_enum)]
        energy_level: Option<EnergyLevel>,
    },
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Range (bpm)")]
    range: String,
    #[tabled(rename = "Purpose")]
    purpose: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Command-line verbosity overrides the configured log level
    let mut log_config = config.settings.log.clone();
    match cli.verbose {
        0 => {}
        1 => log_config.level = LogLevel::Info,
        2 => log_config.level = LogLevel::Debug,
        _ => log_config.level = LogLevel::Trace,
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Bmi { height_cm, weight_kg } => {
            let result = BmiCalculator::calculate(height_cm, weight_kg)?;
            println!("{}", "Body Mass Index".bold());
            println!(
                "  BMI: {} ({})",
                result.bmi.to_string().cyan().bold(),
                result.category
            );
            println!("  {}", result.advice.dimmed());
        }

        Commands::Bmr {
            sex,
            weight_kg,
            height_cm,
            age,
            activity,
        } => {
            let result = EnergyCalculator::calculate(sex, weight_kg, height_cm, age, activity, None)?;
            println!("{}", "Energy Expenditure (Harris-Benedict)".bold());
            println!("  BMR:  {} kcal/day", result.bmr_kcal.to_string().cyan().bold());
            println!(
                "  TDEE: {} kcal/day ({})",
                result.tdee_kcal.to_string().cyan().bold(),
                result.activity_level
            );
        }

        Commands::BodyFat {
            sex,
            height_cm,
            waist_cm,
            neck_cm,
            hip_cm,
        } => {
            let result = BodyFatCalculator::calculate(sex, height_cm, waist_cm, neck_cm, hip_cm)?;
            println!("{}", "Body Fat (US Navy method)".bold());
            println!(
                "  Body fat: {}% ({})",
                result.body_fat_pct.to_string().cyan().bold(),
                result.category
            );
            println!("  {}", result.advice.dimmed());
        }

        Commands::HeartRate {
            age,
            resting_hr,
            method,
        } => match method {
            ZoneMethod::Karvonen => {
                let zones = KarvonenCalculator::calculate(age, resting_hr)?;
                println!("{}", "Heart Rate Zones (Karvonen, Tanaka max)".bold());
                println!(
                    "  Maximum heart rate: {} bpm   Reserve: {} bpm",
                    zones.max_hr.to_string().cyan().bold(),
                    zones.heart_rate_reserve
                );
                let rows: Vec<ZoneRow> = zones
                    .zones
                    .iter()
                    .map(|z| ZoneRow {
                        zone: z.name.clone(),
                        range: format!("{}-{}", z.bpm_min, z.bpm_max),
                        purpose: z.description.clone(),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
            ZoneMethod::Classic => {
                let zones = ClassicZoneCalculator::calculate(age, resting_hr)?;
                println!("{}", "Heart Rate Zones (220 - age)".bold());
                println!(
                    "  Maximum heart rate: {} bpm   Reserve: {} bpm",
                    zones.max_hr.to_string().cyan().bold(),
                    zones.heart_rate_reserve
                );
                let rows: Vec<ZoneRow> = zones
                    .zones
                    .iter()
                    .map(|z| ZoneRow {
                        zone: z.name.clone(),
                        range: format!("{}-{}", z.bpm_min, z.bpm_max),
                        purpose: z.purpose.clone(),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        },

        Commands::Macros {
            sex,
            weight_kg,
            height_cm,
            age,
            activity,
            goal,
        } => {
            let plan = MacroCalculator::calculate(sex, weight_kg, height_cm, age, activity, goal)?;
            println!("{}", format!("Nutrition Plan ({})", plan.goal).bold());
            println!(
                "  Calories: {} kcal/day",
                plan.calories_kcal.to_string().cyan().bold()
            );
            println!(
                "  Protein: {} g   Carbs: {} g   Fat: {} g",
                plan.protein_g.to_string().green(),
                plan.carbs_g.to_string().yellow(),
                plan.fat_g.to_string().magenta()
            );
            println!("  {}", plan.advice.dimmed());
        }

        Commands::Hydration {
            weight_kg,
            activity,
            climate,
            exercise_hours,
        } => {
            let plan = HydrationCalculator::calculate(weight_kg, activity, climate, exercise_hours)?;
            println!("{}", "Daily Water Intake".bold());
            println!("  Total: {} ml", plan.total_ml.to_string().cyan().bold());
            println!(
                "  Base: {} ml   Activity: +{} ml   Climate: {:+} ml   Exercise: +{} ml",
                plan.base_ml, plan.activity_ml, plan.climate_ml, plan.exercise_ml
            );
            println!("  {}", plan.advice.dimmed());
        }

        Commands::Sleep {
            wake_time,
            bed_time,
            quality,
            energy,
        } => {
            let wake = parse_time(&wake_time)?;
            let bed = parse_time(&bed_time)?;
            let plan = SleepOptimizer::calculate(wake, bed, quality, energy);
            println!("{}", "Sleep Schedule".bold());
            println!(
                "  Recommended bedtime: {}   Recommended wake time: {}",
                plan.recommended_bedtime.format("%H:%M").to_string().cyan().bold(),
                plan.recommended_wake_time.format("%H:%M").to_string().cyan().bold()
            );
            println!(
                "  Current schedule: {} ({} cycles)",
                plan.total_sleep_formatted(),
                plan.sleep_cycles
            );
            println!("  {}", plan.advice.dimmed());
            for tip in &plan.tips {
                println!("  - {}", tip);
            }
        }

        Commands::FitnessAge {
            age,
            sex,
            weight_kg,
            height_cm,
            resting_hr,
            vo2max,
            exercise_frequency,
            smoking,
        } => {
            let input = FitnessAgeInput {
                age_years: age,
                sex,
                weight_kg,
                height_cm,
                resting_hr,
                vo2max,
                exercise_frequency,
                smoking_status: smoking,
            };
            let estimate = FitnessAgeCalculator::calculate(&input)?;
            println!("{}", "Fitness Age".bold());
            let delta = if estimate.age_difference < 0 {
                format!("{} years younger", estimate.age_difference.abs()).green()
            } else {
                format!("{} years older", estimate.age_difference).red()
            };
            println!(
                "  Fitness age: {} ({} than your actual age)",
                estimate.fitness_age.to_string().cyan().bold(),
                delta
            );
            println!("  Category: {}", estimate.category);
            println!("  {}", estimate.advice.dimmed());
            for improvement in &estimate.improvements {
                println!("  - {}", improvement);
            }
        }

        Commands::Report {
            profile,
            output,
            format,
        } => {
            let profile = config
                .get_profile(profile.as_deref())
                .ok_or_else(|| anyhow!("no matching profile; create one with `wellrs profile set`"))?;
            let report = HealthReport::from_profile(profile);

            match output {
                Some(path) => {
                    let format_name = format
                        .unwrap_or_else(|| config.settings.default_export_format.clone());
                    let format = ExportFormat::from_str(&format_name)?;
                    report.export(format, &path)?;
                    println!(
                        "{}",
                        format!("✓ Report written to {}", path.display()).green()
                    );
                }
                None => print!("{}", report.render_text()),
            }
        }

        Commands::Profile { action } => {
            let config_path = match &cli.config {
                Some(p) => p.clone(),
                None => AppConfig::default_path()?,
            };
            handle_profile(&mut config, action)?;
            config.save(&config_path)?;
        }
    }

    Ok(())
}

fn handle_profile(config: &mut AppConfig, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::List => {
            if config.profiles.is_empty() {
                println!("No profiles stored yet. Create one with `wellrs profile set <name>`.");
            }
            let mut names: Vec<&String> = config.profiles.keys().collect();
            names.sort();
            for name in names {
                let marker = if config.default_profile.as_deref() == Some(name.as_str()) {
                    " (default)"
                } else {
                    ""
                };
                println!("  {}{}", name, marker);
            }
        }

        ProfileAction::Show { name } => {
            let profile = config
                .get_profile(name.as_deref())
                .ok_or_else(|| anyhow!("no matching profile"))?;
            println!("{}", profile.name.bold());
            print_field("Sex", &profile.sex);
            print_field("Age", &profile.age);
            print_field("Height (cm)", &profile.height_cm);
            print_field("Weight (kg)", &profile.weight_kg);
            print_field("Neck (cm)", &profile.neck_cm);
            print_field("Waist (cm)", &profile.waist_cm);
            print_field("Hip (cm)", &profile.hip_cm);
            print_field("Resting HR (bpm)", &profile.resting_hr);
            print_field("VO2max (ml/kg/min)", &profile.vo2max);
            print_field("Activity level", &profile.activity_level);
            print_field("Climate", &profile.climate);
            print_field("Goal", &profile.goal);
            print_field("Exercise (h/day)", &profile.exercise_hours);
            print_field("Exercise frequency", &profile.exercise_frequency);
            print_field("Smoking", &profile.smoking_status);
            print_field("Wake time", &profile.wake_time);
            print_field("Bed time", &profile.bed_time);
            print_field("Sleep quality", &profile.sleep_quality);
            print_field("Energy level", &profile.energy_level);
        }

        ProfileAction::Set {
            name,
            sex,
            age,
            height_cm,
            weight_kg,
            neck_cm,
            waist_cm,
            hip_cm,
            resting_hr,
            vo2max,
            activity,
            climate,
            goal,
            exercise_hours,
            exercise_frequency,
            smoking,
            wake_time,
            bed_time,
            sleep_quality,
            energy_level,
        } => {
            let mut profile = config
                .profiles
                .get(&name)
                .cloned()
                .unwrap_or_else(|| UserProfile::new(name.clone()));

            if let Some(v) = sex {
                profile.sex = Some(v);
            }
            if let Some(v) = age {
                profile.age = Some(v);
            }
            if let Some(v) = height_cm {
                profile.height_cm = Some(v);
            }
            if let Some(v) = weight_kg {
                profile.weight_kg = Some(v);
            }
            if let Some(v) = neck_cm {
                profile.neck_cm = Some(v);
            }
            if let Some(v) = waist_cm {
                profile.waist_cm = Some(v);
            }
            if let Some(v) = hip_cm {
                profile.hip_cm = Some(v);
            }
            if let Some(v) = resting_hr {
                profile.resting_hr = Some(v);
            }
            if let Some(v) = vo2max {
                profile.vo2max = Some(v);
            }
            if let Some(v) = activity {
                profile.activity_level = Some(v);
            }
            if let Some(v) = climate {
                profile.climate = Some(v);
            }
            if let Some(v) = goal {
                profile.goal = Some(v);
            }
            if let Some(v) = exercise_hours {
                profile.exercise_hours = Some(v);
            }
            if let Some(v) = exercise_frequency {
                profile.exercise_frequency = Some(v);
            }
            if let Some(v) = smoking {
                profile.smoking_status = Some(v);
            }
            if let Some(v) = wake_time {
                profile.wake_time = Some(parse_time(&v)?);
            }
            if let Some(v) = bed_time {
                profile.bed_time = Some(parse_time(&v)?);
            }
            if let Some(v) = sleep_quality {
                profile.sleep_quality = Some(v);
            }
            if let Some(v) = energy_level {
                profile.energy_level = Some(v);
            }

            profile.updated_at = chrono::Utc::now();
            config.upsert_profile(&name, profile);
            println!("{}", format!("✓ Profile '{}' saved", name).green());
        }
    }
    Ok(())
}

fn print_field<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    if let Some(v) = value {
        println!("  {:<20} {}", format!("{}:", label), v);
    }
}

/// Parse a time of day, accepting HH:MM or HH:MM:SS
fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .with_context(|| format!("invalid time '{}', expected HH:MM", s))
}
