// Library interface for the wellrs modules
// This allows integration tests to access the core calculators

pub mod bmi;
pub mod body_composition;
pub mod config;
pub mod energy;
pub mod error;
pub mod fitness_age;
pub mod heart_rate;
pub mod hydration;
pub mod logging;
pub mod models;
pub mod nutrition;
pub mod report;
pub mod sleep;

// Re-export commonly used types for convenience
pub use models::*;
pub use bmi::BmiCalculator;
pub use body_composition::BodyFatCalculator;
pub use energy::EnergyCalculator;
pub use fitness_age::{FitnessAgeCalculator, FitnessAgeInput};
pub use heart_rate::{ClassicZoneCalculator, KarvonenCalculator};
pub use hydration::HydrationCalculator;
pub use nutrition::MacroCalculator;
pub use report::{ExportFormat, HealthReport};
pub use sleep::SleepOptimizer;
pub use config::AppConfig;
pub use error::{Result, WellRsError};
pub use logging::{LogConfig, LogFormat, LogLevel};
