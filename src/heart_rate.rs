//! Heart rate training zone calculators
//!
//! Two independent tools with different accuracy tradeoffs, kept as separate
//! entry points:
//!
//! - [`KarvonenCalculator`]: seven zones from heart rate reserve, with
//!   maximum heart rate estimated by the Tanaka formula (208 − 0.7·age).
//! - [`ClassicZoneCalculator`]: five zones from heart rate reserve, with the
//!   traditional 220 − age maximum.
//!
//! Both anchor zone boundaries to resting heart rate (the Karvonen approach),
//! so two people of the same age with different resting rates get different
//! zones.

use crate::error::CalculationError;
use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A heart rate zone with its training metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingZone {
    /// Zone name, e.g. "Recovery Zone"
    pub name: String,

    /// Lower bound in bpm (inclusive)
    pub bpm_min: u16,

    /// Upper bound in bpm (inclusive)
    pub bpm_max: u16,

    /// What training in this zone feels like
    pub description: String,

    /// Physiological benefits of training in this zone
    pub benefits: Vec<String>,

    /// Typical activities for this zone
    pub activities: Vec<String>,
}

/// Seven ordered heart rate zones computed by the Karvonen method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarvonenZones {
    /// Estimated maximum heart rate (Tanaka formula)
    pub max_hr: u16,

    /// Heart rate reserve (max HR − resting HR)
    pub heart_rate_reserve: u16,

    /// Resting heart rate the zones were anchored to
    pub resting_hr: u16,

    /// Zones ordered from recovery to VO2 max
    pub zones: Vec<TrainingZone>,
}

impl KarvonenZones {
    /// Find the zone a given heart rate falls into, if any
    pub fn zone_for(&self, bpm: u16) -> Option<&TrainingZone> {
        self.zones
            .iter()
            .find(|z| bpm >= z.bpm_min && bpm <= z.bpm_max)
    }
}

/// Percentage-of-reserve boundaries and metadata for the seven zones
const KARVONEN_ZONES: [(&str, Decimal, Decimal, &str, [&str; 3], [&str; 3]); 7] = [
    (
        "Recovery Zone",
        dec!(0.50),
        dec!(0.60),
        "Light activity for recovery and warm-up",
        ["Promotes recovery", "Improves blood flow", "Reduces muscle soreness"],
        ["Walking", "Light cycling", "Stretching"],
    ),
    (
        "Aerobic Zone",
        dec!(0.60),
        dec!(0.70),
        "Moderate intensity for building aerobic base",
        ["Improves cardiovascular health", "Builds endurance", "Burns fat"],
        ["Jogging", "Cycling", "Swimming"],
    ),
    (
        "Endurance Zone",
        dec!(0.70),
        dec!(0.80),
        "Moderate-high intensity for endurance training",
        ["Increases stamina", "Improves aerobic capacity", "Builds muscular endurance"],
        ["Running", "Cycling", "Rowing"],
    ),
    (
        "Tempo Zone",
        dec!(0.80),
        dec!(0.85),
        "Challenging but sustainable pace",
        ["Improves lactate threshold", "Builds race pace endurance", "Enhances running economy"],
        ["Tempo runs", "Interval training", "Hill repeats"],
    ),
    (
        "Threshold Zone",
        dec!(0.85),
        dec!(0.90),
        "High intensity at lactate threshold",
        ["Increases lactate threshold", "Improves race performance", "Builds mental toughness"],
        ["Threshold intervals", "Race pace training", "Hill climbs"],
    ),
    (
        "Anaerobic Zone",
        dec!(0.90),
        dec!(0.95),
        "Very high intensity for short bursts",
        ["Improves anaerobic capacity", "Increases power output", "Builds speed"],
        ["Sprint intervals", "High-intensity intervals", "Plyometrics"],
    ),
    (
        "VO2 Max Zone",
        dec!(0.95),
        dec!(1.00),
        "Maximum intensity for short intervals",
        ["Improves VO2 max", "Enhances cardiovascular capacity", "Builds maximum power"],
        ["Maximum effort intervals", "Short sprints", "High-intensity intervals"],
    ),
];

/// Karvonen heart rate zone calculation (Tanaka maximum)
pub struct KarvonenCalculator;

impl KarvonenCalculator {
    /// Calculate the seven training zones for an athlete
    pub fn calculate(age_years: u8, resting_hr: u16) -> Result<KarvonenZones> {
        if age_years == 0 {
            return Err(anyhow!(CalculationError::invalid("heart_rate_zones", "age_years", 0)));
        }
        if resting_hr == 0 {
            return Err(anyhow!(CalculationError::invalid("heart_rate_zones", "resting_hr", 0)));
        }

        // Tanaka: max HR = 208 - 0.7 * age, rounded to the nearest bpm
        let max_hr = (dec!(208) - dec!(0.7) * Decimal::from(age_years))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u16()
            .ok_or_else(|| {
                anyhow!(CalculationError::OutOfDomain {
                    calculation: "heart_rate_zones".to_string(),
                    reason: "estimated maximum heart rate out of range".to_string(),
                })
            })?;

        if resting_hr >= max_hr {
            return Err(anyhow!(CalculationError::OutOfDomain {
                calculation: "heart_rate_zones".to_string(),
                reason: format!(
                    "resting heart rate {} exceeds estimated maximum {}",
                    resting_hr, max_hr
                ),
            }));
        }

        let hrr = max_hr - resting_hr;

        let zones = KARVONEN_ZONES
            .iter()
            .map(|(name, lo, hi, description, benefits, activities)| {
                // The last zone tops out at max HR itself rather than a
                // rounded percentage.
                let bpm_max = if *hi == dec!(1.00) {
                    max_hr
                } else {
                    reserve_bound(resting_hr, hrr, *hi)
                };
                TrainingZone {
                    name: name.to_string(),
                    bpm_min: reserve_bound(resting_hr, hrr, *lo),
                    bpm_max,
                    description: description.to_string(),
                    benefits: benefits.iter().map(|s| s.to_string()).collect(),
                    activities: activities.iter().map(|s| s.to_string()).collect(),
                }
            })
            .collect();

        tracing::debug!(max_hr, hrr, "calculated Karvonen zones");

        Ok(KarvonenZones {
            max_hr,
            heart_rate_reserve: hrr,
            resting_hr,
            zones,
        })
    }
}

/// A simple heart rate zone with its training purpose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRange {
    /// Zone name, e.g. "Fat Burn Zone"
    pub name: String,

    /// Lower bound in bpm (inclusive)
    pub bpm_min: u16,

    /// Upper bound in bpm (inclusive)
    pub bpm_max: u16,

    /// Training purpose of the zone
    pub purpose: String,
}

/// Five ordered heart rate zones computed with the 220 − age maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicZones {
    /// Maximum heart rate (220 − age)
    pub max_hr: u16,

    /// Heart rate reserve (max HR − resting HR)
    pub heart_rate_reserve: u16,

    /// Zones ordered from recovery to max effort
    pub zones: Vec<ZoneRange>,
}

const CLASSIC_ZONES: [(&str, Decimal, Decimal, &str); 5] = [
    ("Recovery Zone", dec!(0.5), dec!(0.6), "Active recovery and warm-up"),
    ("Fat Burn Zone", dec!(0.6), dec!(0.7), "Fat burning and endurance"),
    ("Cardio Zone", dec!(0.7), dec!(0.8), "Cardiovascular fitness"),
    ("Threshold Zone", dec!(0.8), dec!(0.9), "Lactate threshold training"),
    ("Max Zone", dec!(0.9), dec!(1.0), "Maximum effort training"),
];

/// Traditional five-zone calculation (220 − age maximum)
///
/// Less accurate than the Tanaka estimate for older athletes, but familiar
/// from gym charts; kept as its own tool rather than folded into
/// [`KarvonenCalculator`].
pub struct ClassicZoneCalculator;

impl ClassicZoneCalculator {
    /// Calculate the five training zones for an athlete
    pub fn calculate(age_years: u8, resting_hr: u16) -> Result<ClassicZones> {
        if age_years == 0 {
            return Err(anyhow!(CalculationError::invalid("heart_rate_zones", "age_years", 0)));
        }
        if resting_hr == 0 {
            return Err(anyhow!(CalculationError::invalid("heart_rate_zones", "resting_hr", 0)));
        }

        let max_hr = 220u16.saturating_sub(age_years as u16);

        if resting_hr >= max_hr {
            return Err(anyhow!(CalculationError::OutOfDomain {
                calculation: "heart_rate_zones".to_string(),
                reason: format!(
                    "resting heart rate {} exceeds estimated maximum {}",
                    resting_hr, max_hr
                ),
            }));
        }

        let hrr = max_hr - resting_hr;

        let zones = CLASSIC_ZONES
            .iter()
            .map(|(name, lo, hi, purpose)| {
                let bpm_max = if *hi == dec!(1.0) {
                    max_hr
                } else {
                    reserve_bound(resting_hr, hrr, *hi)
                };
                ZoneRange {
                    name: name.to_string(),
                    bpm_min: reserve_bound(resting_hr, hrr, *lo),
                    bpm_max,
                    purpose: purpose.to_string(),
                }
            })
            .collect();

        tracing::debug!(max_hr, hrr, "calculated classic zones");

        Ok(ClassicZones {
            max_hr,
            heart_rate_reserve: hrr,
            zones,
        })
    }
}

/// Round resting HR + reserve percentage to the nearest bpm
fn reserve_bound(resting_hr: u16, hrr: u16, pct: Decimal) -> u16 {
    (Decimal::from(resting_hr) + Decimal::from(hrr) * pct)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u16()
        .unwrap_or(u16::MAX)
}
