// ABOUTME: Folds accepted meal entries into daily totals, percentages of target and calorie balance
// ABOUTME: Pure and stateless; every summary is recomputed from the entries it is given
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Daily Aggregator
//!
//! `summarize` sums whatever entries it is handed. Selecting "today's" entries
//! is the caller's job; [`entries_on`] is provided for that.
//!
//! Percentages are raw: 130% of the protein target is reported as `130.0`.
//! Use [`display_percentage`] when a bounded value is needed for a progress
//! bar.

use crate::models::{MealEntry, Nutrient, UserSettings};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where the day stands against the calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "calories", rename_all = "snake_case")]
pub enum CalorieBalance {
    /// At or under goal; kcal still available
    Remaining(f64),
    /// Above goal; kcal beyond it
    Over(f64),
}

impl CalorieBalance {
    /// The displayed amount, always non-negative
    #[must_use]
    pub const fn amount(self) -> f64 {
        match self {
            Self::Remaining(kcal) | Self::Over(kcal) => kcal,
        }
    }

    /// Whether the goal has been exceeded
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over(_))
    }
}

/// Derived daily statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Number of entries aggregated
    pub meal_count: usize,
    /// Sum of calories (kcal)
    pub total_calories: f64,
    /// Sum of protein (g)
    pub total_protein: f64,
    /// Sum of carbohydrates (g)
    pub total_carbs: f64,
    /// Sum of fat (g)
    pub total_fat: f64,
    /// Targets the percentages were computed against
    pub settings: UserSettings,
    /// Calories as a percentage of the daily goal
    pub calories_percentage: f64,
    /// Protein as a percentage of target
    pub protein_percentage: f64,
    /// Carbohydrates as a percentage of target
    pub carbs_percentage: f64,
    /// Fat as a percentage of target
    pub fat_percentage: f64,
    /// `max(0, goal - total_calories)`
    pub remaining_calories: f64,
    /// `max(0, total_calories - goal)`
    pub over_calories: f64,
}

impl DailySummary {
    /// Total for a nutrient
    #[must_use]
    pub const fn total(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.total_calories,
            Nutrient::Protein => self.total_protein,
            Nutrient::Carbs => self.total_carbs,
            Nutrient::Fat => self.total_fat,
        }
    }

    /// Target for a nutrient
    #[must_use]
    pub const fn target(&self, nutrient: Nutrient) -> f64 {
        self.settings.target(nutrient)
    }

    /// Raw percentage of target for a nutrient
    #[must_use]
    pub const fn percentage(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories_percentage,
            Nutrient::Protein => self.protein_percentage,
            Nutrient::Carbs => self.carbs_percentage,
            Nutrient::Fat => self.fat_percentage,
        }
    }

    /// Whether total calories exceed the goal
    #[must_use]
    pub fn is_over_goal(&self) -> bool {
        self.total_calories > self.settings.daily_calorie_goal
    }

    /// The single active calorie state
    #[must_use]
    pub fn balance(&self) -> CalorieBalance {
        if self.is_over_goal() {
            CalorieBalance::Over(self.over_calories)
        } else {
            CalorieBalance::Remaining(self.remaining_calories)
        }
    }
}

/// `100 * total / target`, or `0` when the target is not positive
#[must_use]
pub fn percentage_of_target(total: f64, target: f64) -> f64 {
    if target > 0.0 {
        100.0 * total / target
    } else {
        0.0
    }
}

/// Raw percentage bounded to `[0, 100]` for progress-bar width
#[must_use]
pub fn display_percentage(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

/// Entries whose timestamp falls on `day` (UTC)
pub fn entries_on<'a, I>(entries: I, day: NaiveDate) -> Vec<&'a MealEntry>
where
    I: IntoIterator<Item = &'a MealEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.timestamp.date_naive() == day)
        .collect()
}

/// Summarize a day's accepted entries against the user's targets
///
/// Every entry passed in is counted. The result depends only on the multiset
/// of entries, not on their order.
pub fn summarize<'a, I>(entries: I, settings: &UserSettings) -> DailySummary
where
    I: IntoIterator<Item = &'a MealEntry>,
{
    let mut meal_count = 0_usize;
    let mut totals = [0.0_f64; 4];

    for entry in entries {
        meal_count += 1;
        for (slot, nutrient) in totals.iter_mut().zip(Nutrient::ALL) {
            *slot += entry.amount(nutrient);
        }
    }

    let [total_calories, total_protein, total_carbs, total_fat] = totals;
    let goal = settings.daily_calorie_goal;

    DailySummary {
        meal_count,
        total_calories,
        total_protein,
        total_carbs,
        total_fat,
        settings: *settings,
        calories_percentage: percentage_of_target(total_calories, goal),
        protein_percentage: percentage_of_target(total_protein, settings.target_protein),
        carbs_percentage: percentage_of_target(total_carbs, settings.target_carbs),
        fat_percentage: percentage_of_target(total_fat, settings.target_fat),
        remaining_calories: (goal - total_calories).max(0.0),
        over_calories: (total_calories - goal).max(0.0),
    }
}
