// ABOUTME: Main library entry point for the Macro Ledger nutrition pipeline
// ABOUTME: Resolves food text to macro-nutrient estimates and aggregates daily intake
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Macro Ledger
//!
//! Turns free-text food descriptions into calorie, protein, carbohydrate and
//! fat estimates and folds accepted meals into a daily summary measured
//! against the user's targets.
//!
//! ## Pipeline
//!
//! - **Normalizer**: canonical lookup keys (lowercase, trimmed, single spaces)
//! - **Reference Table**: built-in per-serving facts for common foods
//! - **Resolution Cache**: exact-match hits tagged with fixed confidence and source
//! - **Resolver**: cache first, external estimator on a miss
//! - **Daily Aggregator**: totals, percentages of target, remaining/over calories
//!
//! ## Example
//!
//! ```rust,no_run
//! use macro_ledger::models::{MealEntry, UserSettings};
//! use macro_ledger::nutrition::{summarize, OfflineEstimator, ResolutionCache, Resolver};
//!
//! # async fn example() -> macro_ledger::errors::AppResult<()> {
//! let resolver = Resolver::new(ResolutionCache::builtin()?, OfflineEstimator);
//! let estimate = resolver.resolve("Chicken Breast").await?;
//! let entry = MealEntry::from_estimate("Chicken Breast", &estimate);
//!
//! let summary = summarize([&entry], &UserSettings::default());
//! assert_eq!(summary.total_calories, 165.0);
//! # Ok(())
//! # }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// External nutrition estimators (USDA `FoodData` Central)
pub mod external;

/// Logging configuration and structured events
pub mod logging;

/// Nutrition facts, estimates, meal entries and user targets
pub mod models;

/// Resolution and aggregation pipeline
pub mod nutrition;
