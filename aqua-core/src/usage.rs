//! Household water-usage estimation.
//!
//! The estimate is a weighted sum of per-activity rates (see
//! [`Activity::rate`]). Weekly quantities are divided by seven to get a
//! daily figure, and per-person activities are multiplied by the family size.

use crate::activity::Activity;
use aqua_utils::input::{coerce_family_size, coerce_non_negative};
use aqua_utils::numbers::{percent_of, round_liters};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// National average daily consumption per person, in liters.
pub const NATIONAL_AVERAGE_DAILY_PER_PERSON: f64 = 135.0;

pub const DEFAULT_FAMILY_SIZE: u32 = 4;

const DAYS_PER_WEEK: f64 = 7.0;

/// Adjustable habit parameters of a household profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Habit {
    ShowerMinutes,
    BathsPerWeek,
    ToiletFlushesPerDay,
    TeethBrushingMinutes,
    DishwasherLoadsPerWeek,
    DishWashingMinutes,
    LaundryLoadsPerWeek,
    GardeningMinutes,
}

/// Plausible bounds for a habit value. `max` is `None` for plain numeric
/// fields that only have a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HabitRange {
    pub min: f64,
    pub max: Option<f64>,
    pub step: f64,
}

impl HabitRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        let value = value.max(self.min);
        match self.max {
            Some(max) => value.min(max),
            None => value,
        }
    }
}

impl fmt::Display for HabitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{} or more", self.min),
        }
    }
}

impl Habit {
    pub const ALL: [Habit; 8] = [
        Habit::ShowerMinutes,
        Habit::BathsPerWeek,
        Habit::ToiletFlushesPerDay,
        Habit::TeethBrushingMinutes,
        Habit::DishwasherLoadsPerWeek,
        Habit::DishWashingMinutes,
        Habit::LaundryLoadsPerWeek,
        Habit::GardeningMinutes,
    ];

    /// camelCase key, as used in profile JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Habit::ShowerMinutes => "showerMinutes",
            Habit::BathsPerWeek => "bathsPerWeek",
            Habit::ToiletFlushesPerDay => "toiletFlushesPerDay",
            Habit::TeethBrushingMinutes => "teethBrushingMinutes",
            Habit::DishwasherLoadsPerWeek => "dishwasherLoadsPerWeek",
            Habit::DishWashingMinutes => "dishWashingMinutes",
            Habit::LaundryLoadsPerWeek => "laundryLoadsPerWeek",
            Habit::GardeningMinutes => "gardeningMinutes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Habit::ShowerMinutes => "Shower Minutes (per person)",
            Habit::BathsPerWeek => "Baths (per week per person)",
            Habit::ToiletFlushesPerDay => "Toilet Flushes (per day per person)",
            Habit::TeethBrushingMinutes => "Teeth Brushing Minutes (per person)",
            Habit::DishwasherLoadsPerWeek => "Dishwasher Loads (per week)",
            Habit::DishWashingMinutes => "Hand Dishwashing Minutes (per session)",
            Habit::LaundryLoadsPerWeek => "Laundry Loads (per week)",
            Habit::GardeningMinutes => "Gardening Minutes (per week)",
        }
    }

    /// Slider bounds for habits that have a slider; the rest are plain
    /// inputs bounded only below.
    pub fn range(&self) -> HabitRange {
        let (min, max, step) = match self {
            Habit::ShowerMinutes => (1.0, Some(20.0), 1.0),
            Habit::BathsPerWeek => (0.0, Some(7.0), 1.0),
            Habit::ToiletFlushesPerDay => (1.0, Some(10.0), 1.0),
            Habit::TeethBrushingMinutes => (0.0, None, 1.0),
            Habit::DishwasherLoadsPerWeek => (0.0, None, 1.0),
            Habit::DishWashingMinutes => (0.0, None, 1.0),
            Habit::LaundryLoadsPerWeek => (0.0, Some(10.0), 1.0),
            Habit::GardeningMinutes => (0.0, Some(60.0), 5.0),
        };
        HabitRange { min, max, step }
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown habit '{0}'")]
pub struct UnknownHabit(pub String);

impl FromStr for Habit {
    type Err = UnknownHabit;

    /// Accepts `showerMinutes`, `shower_minutes` or `shower-minutes`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Habit::ALL
            .iter()
            .copied()
            .find(|habit| habit.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownHabit(s.to_string()))
    }
}

/// Values for each habit. Missing JSON keys fall back to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitValues {
    #[serde(alias = "shower_minutes")]
    pub shower_minutes: f64,
    #[serde(alias = "baths_per_week")]
    pub baths_per_week: f64,
    #[serde(alias = "toilet_flushes_per_day")]
    pub toilet_flushes_per_day: f64,
    #[serde(alias = "teeth_brushing_minutes")]
    pub teeth_brushing_minutes: f64,
    #[serde(alias = "dishwasher_loads_per_week")]
    pub dishwasher_loads_per_week: f64,
    #[serde(alias = "dish_washing_minutes")]
    pub dish_washing_minutes: f64,
    #[serde(alias = "laundry_loads_per_week")]
    pub laundry_loads_per_week: f64,
    #[serde(alias = "gardening_minutes")]
    pub gardening_minutes: f64,
}

impl Default for HabitValues {
    fn default() -> Self {
        Self {
            shower_minutes: 8.0,
            baths_per_week: 2.0,
            toilet_flushes_per_day: 5.0,
            teeth_brushing_minutes: 4.0,
            dishwasher_loads_per_week: 4.0,
            dish_washing_minutes: 10.0,
            laundry_loads_per_week: 3.0,
            gardening_minutes: 20.0,
        }
    }
}

impl HabitValues {
    pub fn get(&self, habit: Habit) -> f64 {
        match habit {
            Habit::ShowerMinutes => self.shower_minutes,
            Habit::BathsPerWeek => self.baths_per_week,
            Habit::ToiletFlushesPerDay => self.toilet_flushes_per_day,
            Habit::TeethBrushingMinutes => self.teeth_brushing_minutes,
            Habit::DishwasherLoadsPerWeek => self.dishwasher_loads_per_week,
            Habit::DishWashingMinutes => self.dish_washing_minutes,
            Habit::LaundryLoadsPerWeek => self.laundry_loads_per_week,
            Habit::GardeningMinutes => self.gardening_minutes,
        }
    }

    /// Set a habit value. Negative or non-finite values are stored as zero.
    pub fn set(&mut self, habit: Habit, value: f64) {
        let value = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };
        let slot = match habit {
            Habit::ShowerMinutes => &mut self.shower_minutes,
            Habit::BathsPerWeek => &mut self.baths_per_week,
            Habit::ToiletFlushesPerDay => &mut self.toilet_flushes_per_day,
            Habit::TeethBrushingMinutes => &mut self.teeth_brushing_minutes,
            Habit::DishwasherLoadsPerWeek => &mut self.dishwasher_loads_per_week,
            Habit::DishWashingMinutes => &mut self.dish_washing_minutes,
            Habit::LaundryLoadsPerWeek => &mut self.laundry_loads_per_week,
            Habit::GardeningMinutes => &mut self.gardening_minutes,
        };
        *slot = value;
    }

    /// Habits whose value lies outside their plausible range.
    pub fn out_of_range(&self) -> Vec<(Habit, f64)> {
        Habit::ALL
            .iter()
            .map(|habit| (*habit, self.get(*habit)))
            .filter(|(habit, value)| !habit.range().contains(*value))
            .collect()
    }
}

fn default_family_size() -> u32 {
    DEFAULT_FAMILY_SIZE
}

/// Household profile: family size plus habit values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdProfile {
    #[serde(default = "default_family_size", alias = "family_size")]
    family_size: u32,
    #[serde(flatten)]
    pub habits: HabitValues,
}

impl Default for HouseholdProfile {
    fn default() -> Self {
        Self {
            family_size: DEFAULT_FAMILY_SIZE,
            habits: HabitValues::default(),
        }
    }
}

impl HouseholdProfile {
    pub fn new(family_size: u32, habits: HabitValues) -> Self {
        let mut profile = Self {
            family_size: 1,
            habits: HabitValues::default(),
        };
        profile.set_family_size(family_size);
        for habit in Habit::ALL {
            profile.habits.set(habit, habits.get(habit));
        }
        profile
    }

    /// Parse a profile from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: HouseholdProfile = serde_json::from_str(json)?;
        Ok(HouseholdProfile::new(parsed.family_size, parsed.habits))
    }

    pub fn family_size(&self) -> u32 {
        self.family_size
    }

    /// Set the family size; zero is raised to one.
    pub fn set_family_size(&mut self, family_size: u32) {
        self.family_size = family_size.max(1);
    }

    /// Set the family size from raw text input.
    pub fn set_family_size_input(&mut self, raw: &str) {
        self.family_size = coerce_family_size(raw);
    }

    pub fn habit(&self, habit: Habit) -> f64 {
        self.habits.get(habit)
    }

    pub fn set_habit(&mut self, habit: Habit, value: f64) {
        self.habits.set(habit, value);
    }

    /// Set a habit from raw text input; malformed input becomes zero.
    pub fn set_habit_input(&mut self, habit: Habit, raw: &str) {
        self.habits.set(habit, coerce_non_negative(raw));
    }

    pub fn estimate(&self) -> UsageEstimate {
        estimate_usage(self)
    }
}

/// Daily liters attributed to one activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityUsage {
    pub activity: Activity,
    pub liters_per_day: f64,
}

/// Result of running the estimator over a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageEstimate {
    pub family_size: u32,
    /// Unrounded household total, liters per day
    pub raw_total_liters: f64,
    /// Household total rounded to whole liters per day
    pub total_liters: u64,
    /// Rounded total divided by family size, rounded
    pub per_person_liters: u64,
    /// Per-person usage as a percentage of the national average
    pub national_average_percent: u64,
    pub breakdown: Vec<ActivityUsage>,
}

impl UsageEstimate {
    pub fn liters_for(&self, activity: Activity) -> f64 {
        self.breakdown
            .iter()
            .find(|u| u.activity == activity)
            .map(|u| u.liters_per_day)
            .unwrap_or(0.0)
    }

    pub fn above_national_average(&self) -> bool {
        self.national_average_percent > 100
    }
}

/// Estimate daily household consumption for a profile.
pub fn estimate_usage(profile: &HouseholdProfile) -> UsageEstimate {
    let family = profile.family_size.max(1) as f64;
    let h = &profile.habits;

    let breakdown: Vec<ActivityUsage> = Activity::ALL
        .iter()
        .map(|activity| {
            let rate = activity.rate().liters();
            let liters_per_day = match activity {
                Activity::Shower => rate * h.shower_minutes * family,
                Activity::Bath => rate * h.baths_per_week * family / DAYS_PER_WEEK,
                Activity::Toilet => rate * h.toilet_flushes_per_day * family,
                Activity::Teeth => rate * h.teeth_brushing_minutes * family,
                Activity::Dishwasher => rate * h.dishwasher_loads_per_week / DAYS_PER_WEEK,
                // one hand-washing session per dishwasher load
                Activity::HandDishwashing => {
                    rate * h.dish_washing_minutes * h.dishwasher_loads_per_week / DAYS_PER_WEEK
                }
                Activity::Laundry => rate * h.laundry_loads_per_week / DAYS_PER_WEEK,
                Activity::Garden => rate * h.gardening_minutes / DAYS_PER_WEEK,
                Activity::Drinking => rate * family,
            };
            ActivityUsage {
                activity: *activity,
                liters_per_day,
            }
        })
        .collect();

    let raw_total_liters: f64 = breakdown.iter().map(|u| u.liters_per_day).sum();
    let total_liters = round_liters(raw_total_liters);
    UsageEstimate {
        family_size: profile.family_size.max(1),
        raw_total_liters,
        total_liters,
        per_person_liters: round_liters(total_liters as f64 / family),
        national_average_percent: percent_of(
            raw_total_liters / family,
            NATIONAL_AVERAGE_DAILY_PER_PERSON,
        ),
        breakdown,
    }
}
