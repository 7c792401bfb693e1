// ABOUTME: Built-in reference table mapping canonical food names to per-serving nutrition facts
// ABOUTME: Validated once at startup and shared read-only for the rest of the process lifetime
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Reference Table
//!
//! Per-serving values for common foods, sourced from USDA `FoodData` Central
//! standard reference data. Serving sizes are fixed per entry and described in
//! the entry's explanation; no unit conversion is performed.
//!
//! The table is validated when it is loaded. A negative or non-finite value,
//! a key that is not in canonical form, or a duplicate key is a defect in the
//! static data and aborts loading instead of surfacing during lookups.

use super::normalizer::is_canonical;
use crate::errors::{AppError, AppResult};
use crate::models::NutritionFact;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Process-wide built-in table
static BUILTIN_TABLE: OnceLock<Arc<ReferenceTable>> = OnceLock::new();

/// A raw reference row before validation
#[derive(Debug, Clone, Copy)]
pub struct ReferenceEntry {
    /// Canonical food name
    pub name: &'static str,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
    /// Serving size and provenance
    pub explanation: &'static str,
}

const fn food(
    name: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    explanation: &'static str,
) -> ReferenceEntry {
    ReferenceEntry {
        name,
        calories,
        protein,
        carbs,
        fat,
        explanation,
    }
}

/// Built-in foods, values per standard serving
#[rustfmt::skip]
pub const BUILTIN_FOODS: &[ReferenceEntry] = &[
    // Fruits
    food("apple", 95.0, 0.0, 25.0, 0.0, "Medium apple (182g). Based on USDA standard reference data."),
    food("banana", 105.0, 1.0, 27.0, 0.0, "Medium banana (118g). Based on USDA standard reference data."),
    food("orange", 62.0, 1.0, 15.0, 0.0, "Medium orange (131g). Based on USDA standard reference data."),
    food("grapes", 104.0, 1.0, 27.0, 0.0, "1 cup of grapes (151g). Based on USDA standard reference data."),
    food("strawberries", 49.0, 1.0, 12.0, 0.0, "1 cup of strawberries (152g). Based on USDA standard reference data."),
    food("watermelon", 46.0, 1.0, 11.0, 0.0, "1 cup diced watermelon (152g). Based on USDA standard reference data."),
    // Fast food / common meals
    food("burger", 540.0, 25.0, 40.0, 25.0, "Standard fast food hamburger with cheese (150g). Includes bun, beef patty, cheese, lettuce, tomato."),
    food("cheeseburger", 563.0, 28.0, 38.0, 33.0, "Standard cheeseburger (155g). Based on USDA fast food composite data."),
    food("pizza", 285.0, 12.0, 36.0, 10.0, "One slice of cheese pizza (107g). Based on typical pizza chain data."),
    food("fries", 365.0, 4.0, 48.0, 17.0, "Medium french fries (117g). Based on USDA fast food data."),
    food("french fries", 365.0, 4.0, 48.0, 17.0, "Medium french fries (117g). Based on USDA fast food data."),
    food("hot dog", 290.0, 10.0, 24.0, 17.0, "Hot dog with bun (98g). Based on USDA standard reference."),
    food("sandwich", 350.0, 15.0, 42.0, 12.0, "Basic deli sandwich (150g). Turkey/ham with cheese, lettuce, tomato on bread."),
    food("taco", 210.0, 9.0, 13.0, 13.0, "One crunchy beef taco (78g). Based on USDA fast food data."),
    // Protein
    food("chicken breast", 165.0, 31.0, 0.0, 4.0, "100g cooked chicken breast (skinless). Based on USDA standard reference."),
    food("salmon", 206.0, 22.0, 0.0, 12.0, "100g cooked Atlantic salmon. Based on USDA standard reference."),
    food("steak", 271.0, 26.0, 0.0, 18.0, "100g beef steak, cooked. Based on USDA standard reference."),
    food("eggs", 155.0, 13.0, 1.0, 11.0, "Two large eggs (100g). Based on USDA standard reference."),
    food("egg", 78.0, 6.0, 1.0, 5.0, "One large egg (50g). Based on USDA standard reference."),
    // Grains & carbs
    food("rice", 206.0, 4.0, 45.0, 2.0, "1 cup cooked white rice (158g). Based on USDA standard reference."),
    food("pasta", 220.0, 8.0, 43.0, 1.0, "1 cup cooked pasta (140g). Based on USDA standard reference."),
    food("bread", 79.0, 4.0, 15.0, 1.0, "One slice of whole wheat bread (28g). Based on USDA standard reference."),
    food("toast", 79.0, 4.0, 15.0, 1.0, "One slice of toasted whole wheat bread (28g). Based on USDA standard reference."),
    food("oatmeal", 158.0, 6.0, 28.0, 3.0, "1 cup cooked oatmeal (234g). Based on USDA standard reference."),
    // Vegetables
    food("broccoli", 55.0, 4.0, 11.0, 1.0, "1 cup chopped broccoli (156g). Based on USDA standard reference."),
    food("carrots", 52.0, 1.0, 12.0, 0.0, "1 cup chopped carrots (128g). Based on USDA standard reference."),
    food("salad", 33.0, 3.0, 6.0, 0.0, "1 cup mixed green salad (55g), no dressing. Based on USDA standard reference."),
    food("lettuce", 5.0, 0.0, 1.0, 0.0, "1 cup shredded lettuce (47g). Based on USDA standard reference."),
    // Dairy
    food("milk", 149.0, 8.0, 12.0, 8.0, "1 cup whole milk (244g). Based on USDA standard reference."),
    food("yogurt", 149.0, 8.0, 11.0, 8.0, "1 cup plain whole milk yogurt (245g). Based on USDA standard reference."),
    food("cheese", 114.0, 7.0, 1.0, 9.0, "1 oz cheddar cheese (28g). Based on USDA standard reference."),
    // Beverages
    food("water", 0.0, 0.0, 0.0, 0.0, "Water contains no calories. Hydration is important for health!"),
    food("coffee", 2.0, 0.0, 0.0, 0.0, "Black coffee (240ml). Add calories for milk/sugar."),
    food("tea", 2.0, 0.0, 0.0, 0.0, "Plain tea (240ml). Add calories for milk/sugar."),
    food("soda", 140.0, 0.0, 39.0, 0.0, "12 oz can of cola (355ml). Based on typical soda nutrition data."),
    food("juice", 112.0, 2.0, 26.0, 0.0, "1 cup orange juice (248g). Based on USDA standard reference."),
    // Snacks
    food("chips", 152.0, 2.0, 15.0, 10.0, "1 oz potato chips (28g). Based on USDA standard reference."),
    food("popcorn", 31.0, 1.0, 6.0, 0.0, "1 cup air-popped popcorn (8g). Based on USDA standard reference."),
    food("nuts", 165.0, 6.0, 6.0, 14.0, "1 oz mixed nuts (28g). Based on USDA standard reference."),
    food("almonds", 164.0, 6.0, 6.0, 14.0, "1 oz almonds (28g, ~23 almonds). Based on USDA standard reference."),
    food("peanuts", 161.0, 7.0, 5.0, 14.0, "1 oz peanuts (28g). Based on USDA standard reference."),
    food("chocolate", 235.0, 3.0, 26.0, 13.0, "1.5 oz milk chocolate bar (43g). Based on USDA standard reference."),
    food("cookie", 49.0, 1.0, 7.0, 2.0, "One chocolate chip cookie (12g). Based on USDA standard reference."),
    food("ice cream", 207.0, 4.0, 24.0, 11.0, "1/2 cup vanilla ice cream (66g). Based on USDA standard reference."),
    // Breakfast
    food("cereal", 147.0, 3.0, 33.0, 1.0, "1 cup corn flakes (28g) with no milk. Based on USDA standard reference."),
    food("pancakes", 227.0, 6.0, 28.0, 10.0, "Two 4-inch pancakes (76g). Based on USDA standard reference."),
    food("waffle", 218.0, 6.0, 25.0, 11.0, "One 7-inch waffle (75g). Based on USDA standard reference."),
    food("bacon", 43.0, 3.0, 0.0, 3.0, "One slice of cooked bacon (8g). Based on USDA standard reference."),
];

/// Immutable mapping from canonical food name to nutrition facts
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    foods: HashMap<String, NutritionFact>,
}

impl ReferenceTable {
    /// The built-in table, validated on first access
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the built-in data contains a malformed entry
    pub fn builtin() -> AppResult<Arc<Self>> {
        if let Some(table) = BUILTIN_TABLE.get() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(Self::from_entries(BUILTIN_FOODS)?);
        info!(foods = table.len(), "Reference table loaded");
        Ok(Arc::clone(BUILTIN_TABLE.get_or_init(|| table)))
    }

    /// Build and validate a table from raw rows
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if any row has a negative or non-finite value,
    /// a key that is not canonical, or a key that appears twice
    pub fn from_entries(entries: &[ReferenceEntry]) -> AppResult<Self> {
        let mut foods = HashMap::with_capacity(entries.len());

        for entry in entries {
            if entry.name.is_empty() || !is_canonical(entry.name) {
                return Err(AppError::config_invalid(format!(
                    "Reference key '{}' is not in canonical form",
                    entry.name
                ))
                .with_resource_id(entry.name));
            }

            let fact = NutritionFact {
                calories: entry.calories,
                protein: entry.protein,
                carbs: entry.carbs,
                fat: entry.fat,
                explanation: entry.explanation.to_owned(),
            };

            if let Some(nutrient) = fact.first_invalid_nutrient() {
                return Err(AppError::config_invalid(format!(
                    "Reference entry '{}' has invalid {nutrient}: {}",
                    entry.name,
                    fact.amount(nutrient)
                ))
                .with_resource_id(entry.name));
            }

            if foods.insert(entry.name.to_owned(), fact).is_some() {
                return Err(AppError::config_invalid(format!(
                    "Duplicate reference key '{}'",
                    entry.name
                ))
                .with_resource_id(entry.name));
            }
        }

        Ok(Self { foods })
    }

    /// Facts for an exact canonical key
    #[must_use]
    pub fn get(&self, canonical: &str) -> Option<&NutritionFact> {
        self.foods.get(canonical)
    }

    /// Whether an exact canonical key exists
    #[must_use]
    pub fn contains(&self, canonical: &str) -> bool {
        self.foods.contains_key(canonical)
    }

    /// All canonical keys, sorted
    #[must_use]
    pub fn keys(&self) -> BTreeSet<&str> {
        self.foods.keys().map(String::as_str).collect()
    }

    /// Number of foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Whether the table has no foods
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
