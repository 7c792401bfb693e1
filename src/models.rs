// ABOUTME: Core data models for nutrition facts, estimates, meal entries and user targets
// ABOUTME: NutritionFact, NutritionEstimate, MealEntry, UserSettings and Nutrient definitions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::default_targets;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro-nutrient facts for one nominal serving
///
/// Values describe a single serving as encoded by whoever produced the fact
/// (reference table or estimator). No quantity scaling is ever applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFact {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein: f64,
    /// Carbohydrates (grams)
    pub carbs: f64,
    /// Fat (grams)
    pub fat: f64,
    /// Provenance and serving-size description
    pub explanation: String,
}

impl NutritionFact {
    /// Value of a single nutrient
    #[must_use]
    pub const fn amount(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
        }
    }

    /// First nutrient that is negative or not finite, if any
    #[must_use]
    pub fn first_invalid_nutrient(&self) -> Option<Nutrient> {
        Nutrient::ALL.into_iter().find(|&n| {
            let value = self.amount(n);
            !value.is_finite() || value < 0.0
        })
    }
}

/// A resolved nutrition result with confidence and provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    /// The nutrition values
    #[serde(flatten)]
    pub fact: NutritionFact,
    /// Reliability score in `[0, 1]`
    pub confidence: f64,
    /// Ordered provenance labels
    pub sources: Vec<String>,
}

impl NutritionEstimate {
    /// Wrap a fact with its confidence and sources
    #[must_use]
    pub fn new(fact: NutritionFact, confidence: f64, sources: Vec<String>) -> Self {
        Self {
            fact,
            confidence,
            sources,
        }
    }

    /// Energy (kcal)
    #[must_use]
    pub const fn calories(&self) -> f64 {
        self.fact.calories
    }

    /// Protein (grams)
    #[must_use]
    pub const fn protein(&self) -> f64 {
        self.fact.protein
    }

    /// Carbohydrates (grams)
    #[must_use]
    pub const fn carbs(&self) -> f64 {
        self.fact.carbs
    }

    /// Fat (grams)
    #[must_use]
    pub const fn fat(&self) -> f64 {
        self.fact.fat
    }
}

/// An accepted resolution recorded in the caller's meal history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Unique identifier
    pub id: String,
    /// Original user input, kept verbatim for display
    pub text: String,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein: f64,
    /// Carbohydrates (grams)
    pub carbs: f64,
    /// Fat (grams)
    pub fat: f64,
    /// When the meal was logged
    pub timestamp: DateTime<Utc>,
}

impl MealEntry {
    /// Record an accepted estimate with a fresh id and the current time
    #[must_use]
    pub fn from_estimate(text: impl Into<String>, estimate: &NutritionEstimate) -> Self {
        Self::from_estimate_at(text, estimate, Uuid::new_v4().to_string(), Utc::now())
    }

    /// Record an accepted estimate with a caller-assigned id and timestamp
    #[must_use]
    pub fn from_estimate_at(
        text: impl Into<String>,
        estimate: &NutritionEstimate,
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            calories: estimate.calories(),
            protein: estimate.protein(),
            carbs: estimate.carbs(),
            fat: estimate.fat(),
            timestamp,
        }
    }

    /// Value of a single nutrient
    #[must_use]
    pub const fn amount(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
        }
    }
}

/// User-configured daily targets
///
/// Non-positive targets are tolerated; they only degrade the matching
/// percentage to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Daily calorie goal (kcal)
    pub daily_calorie_goal: f64,
    /// Daily protein target (grams)
    pub target_protein: f64,
    /// Daily carbohydrate target (grams)
    pub target_carbs: f64,
    /// Daily fat target (grams)
    pub target_fat: f64,
}

impl UserSettings {
    /// Target for a single nutrient
    #[must_use]
    pub const fn target(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.daily_calorie_goal,
            Nutrient::Protein => self.target_protein,
            Nutrient::Carbs => self.target_carbs,
            Nutrient::Fat => self.target_fat,
        }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            daily_calorie_goal: default_targets::DAILY_CALORIE_GOAL,
            target_protein: default_targets::PROTEIN_G,
            target_carbs: default_targets::CARBS_G,
            target_fat: default_targets::FAT_G,
        }
    }
}

/// The four tracked nutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Energy (kcal)
    Calories,
    /// Protein (g)
    Protein,
    /// Carbohydrates (g)
    Carbs,
    /// Fat (g)
    Fat,
}

impl Nutrient {
    /// All nutrients in display order
    pub const ALL: [Self; 4] = [Self::Calories, Self::Protein, Self::Carbs, Self::Fat];

    /// Unit the nutrient is measured in
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Calories => "kcal",
            Self::Protein | Self::Carbs | Self::Fat => "g",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fat => "fat",
        };
        f.pad(name)
    }
}
