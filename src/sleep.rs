//! Sleep schedule optimization around 90-minute sleep cycles
//!
//! Recommendations target six full cycles (9 hours) and anchor to the user's
//! current schedule: the suggested bedtime counts back from the wake time and
//! the suggested wake time counts forward from the bedtime. Times wrap around
//! midnight.

use crate::models::{EnergyLevel, SleepQuality};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Length of one sleep cycle in minutes
const CYCLE_MINUTES: i64 = 90;

/// Six cycles of 90 minutes
const RECOMMENDED_SLEEP_HOURS: i64 = 9;

/// Optimized sleep schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepPlan {
    /// Suggested bedtime (9 h before the current wake time)
    pub recommended_bedtime: NaiveTime,

    /// Suggested wake time (9 h after the current bedtime)
    pub recommended_wake_time: NaiveTime,

    /// Number of complete 90-minute cycles in the current schedule
    pub sleep_cycles: u32,

    /// Minutes between wake time and bedtime in the current schedule
    pub total_sleep_minutes: u32,

    /// Advice for the reported sleep quality
    pub advice: String,

    /// Quality-specific tips, extended by energy-level tips
    pub tips: Vec<String>,
}

impl SleepPlan {
    /// Format the schedule length as "Xh Ym"
    pub fn total_sleep_formatted(&self) -> String {
        format!(
            "{}h {}m",
            self.total_sleep_minutes / 60,
            self.total_sleep_minutes % 60
        )
    }
}

fn quality_advice(quality: SleepQuality) -> (&'static str, [&'static str; 4]) {
    match quality {
        SleepQuality::Poor => (
            "Your current sleep schedule may be affecting your sleep quality. Consider adjusting your bedtime to align with your natural sleep cycles.",
            [
                "Avoid screens 1 hour before bed",
                "Keep your bedroom cool and dark",
                "Establish a consistent sleep schedule",
                "Limit caffeine after 2 PM",
            ],
        ),
        SleepQuality::Average => (
            "Your sleep schedule is decent, but there's room for improvement. Try to maintain consistent sleep and wake times.",
            [
                "Create a relaxing bedtime routine",
                "Exercise regularly, but not close to bedtime",
                "Avoid large meals before sleep",
                "Consider using white noise if needed",
            ],
        ),
        SleepQuality::Good => (
            "Your sleep schedule is good! Maintain your current routine and focus on sleep hygiene practices.",
            [
                "Keep your sleep environment comfortable",
                "Stay active during the day",
                "Manage stress through relaxation techniques",
                "Maintain a consistent sleep schedule",
            ],
        ),
    }
}

fn energy_tips(energy: EnergyLevel) -> &'static [&'static str] {
    match energy {
        EnergyLevel::Low => &[
            "Consider a short nap (20-30 minutes) in the early afternoon",
            "Increase exposure to natural light during the day",
        ],
        EnergyLevel::High => &[
            "Ensure you're getting enough physical activity during the day",
            "Practice relaxation techniques before bed",
        ],
        EnergyLevel::Moderate => &[],
    }
}

/// Sleep schedule calculation utilities
pub struct SleepOptimizer;

impl SleepOptimizer {
    /// Build an optimized sleep plan from the current schedule
    ///
    /// A bedtime earlier on the clock than the wake time is treated as
    /// belonging to the next day.
    pub fn calculate(
        wake_time: NaiveTime,
        bed_time: NaiveTime,
        sleep_quality: SleepQuality,
        energy_level: EnergyLevel,
    ) -> SleepPlan {
        let mut minutes = bed_time.signed_duration_since(wake_time).num_minutes();
        if minutes < 0 {
            minutes += 24 * 60;
        }

        let sleep_cycles = ((minutes as f64) / (CYCLE_MINUTES as f64)).round() as u32;

        // NaiveTime arithmetic wraps around midnight
        let recommended_bedtime = wake_time - Duration::hours(RECOMMENDED_SLEEP_HOURS);
        let recommended_wake_time = bed_time + Duration::hours(RECOMMENDED_SLEEP_HOURS);

        let (advice, base_tips) = quality_advice(sleep_quality);
        let mut tips: Vec<String> = base_tips.iter().map(|s| s.to_string()).collect();
        tips.extend(energy_tips(energy_level).iter().map(|s| s.to_string()));

        tracing::debug!(minutes, sleep_cycles, "calculated sleep plan");

        SleepPlan {
            recommended_bedtime,
            recommended_wake_time,
            sleep_cycles,
            total_sleep_minutes: minutes as u32,
            advice: advice.to_string(),
            tips,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_same_day_schedule() {
        // Wake 07:00, bed 23:00 -> 16 h on the clock between them
        let plan = SleepOptimizer::calculate(
            t(7, 0),
            t(23, 0),
            SleepQuality::Average,
            EnergyLevel::Moderate,
        );
        assert_eq!(plan.total_sleep_minutes, 960);
        assert_eq!(plan.sleep_cycles, 11); // round(960 / 90) = round(10.67)
        assert_eq!(plan.recommended_bedtime, t(22, 0));
        assert_eq!(plan.recommended_wake_time, t(8, 0)); // wraps past midnight
        assert_eq!(plan.total_sleep_formatted(), "16h 0m");
    }

    #[test]
    fn test_bedtime_before_wake_rolls_to_next_day() {
        // Wake 07:30, bed 00:15 -> bed is next-day, 16 h 45 m apart
        let plan = SleepOptimizer::calculate(
            t(7, 30),
            t(0, 15),
            SleepQuality::Good,
            EnergyLevel::Moderate,
        );
        assert_eq!(plan.total_sleep_minutes, 1005);
        assert_eq!(plan.sleep_cycles, 11); // round(11.17)
        assert_eq!(plan.recommended_bedtime, t(22, 30));
        assert_eq!(plan.recommended_wake_time, t(9, 15));
    }

    #[test]
    fn test_quality_selects_advice_and_tips() {
        let poor = SleepOptimizer::calculate(
            t(7, 0),
            t(23, 0),
            SleepQuality::Poor,
            EnergyLevel::Moderate,
        );
        assert!(poor.advice.contains("may be affecting"));
        assert_eq!(poor.tips.len(), 4);
        assert_eq!(poor.tips[3], "Limit caffeine after 2 PM");

        let good = SleepOptimizer::calculate(
            t(7, 0),
            t(23, 0),
            SleepQuality::Good,
            EnergyLevel::Moderate,
        );
        assert!(good.advice.contains("is good"));
    }

    #[test]
    fn test_energy_level_appends_tips() {
        let low = SleepOptimizer::calculate(t(7, 0), t(23, 0), SleepQuality::Average, EnergyLevel::Low);
        assert_eq!(low.tips.len(), 6);
        assert!(low.tips[4].contains("short nap"));

        let high =
            SleepOptimizer::calculate(t(7, 0), t(23, 0), SleepQuality::Average, EnergyLevel::High);
        assert_eq!(high.tips.len(), 6);
        assert!(high.tips[5].contains("relaxation"));

        let moderate = SleepOptimizer::calculate(
            t(7, 0),
            t(23, 0),
            SleepQuality::Average,
            EnergyLevel::Moderate,
        );
        assert_eq!(moderate.tips.len(), 4);
    }

    #[test]
    fn test_identical_times_give_zero_cycles() {
        let plan = SleepOptimizer::calculate(
            t(22, 0),
            t(22, 0),
            SleepQuality::Average,
            EnergyLevel::Moderate,
        );
        assert_eq!(plan.total_sleep_minutes, 0);
        assert_eq!(plan.sleep_cycles, 0);
    }
}
