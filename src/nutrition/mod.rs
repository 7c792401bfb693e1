// ABOUTME: Nutrition resolution and aggregation pipeline
// ABOUTME: Normalizer, reference table, resolution cache, resolver and daily aggregator
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Nutrition pipeline
//!
//! ```text
//! raw text -> normalize -> ResolutionCache --hit--> NutritionEstimate (0.95)
//!                                          \-miss-> NutritionEstimator (as-is)
//! accepted MealEntry values -> summarize -> DailySummary
//! ```

/// Daily totals, percentages of target and calorie balance
pub mod aggregator;
/// Exact-match cache over the reference table
pub mod cache;
/// Fallback estimation capability
pub mod estimator;
/// Text canonicalization
pub mod normalizer;
/// Built-in per-serving nutrition facts
pub mod reference_table;
/// Cache-then-estimator orchestration
pub mod resolver;

pub use aggregator::{
    display_percentage, entries_on, percentage_of_target, summarize, CalorieBalance, DailySummary,
};
pub use cache::{CacheLookup, ResolutionCache};
pub use estimator::{NutritionEstimator, OfflineEstimator};
pub use normalizer::{is_separator, normalize};
pub use reference_table::{ReferenceEntry, ReferenceTable, BUILTIN_FOODS};
pub use resolver::Resolver;
