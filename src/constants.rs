// ABOUTME: Application-wide constants for resolution provenance, default targets and services
// ABOUTME: Centralizes the cache confidence, source labels and USDA nutrient identifiers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants shared across the ledger.

/// Service identifiers used in structured logs
pub mod service_names {
    /// Name of this service
    pub const MACRO_LEDGER: &str = "macro-ledger";
    /// Name of the USDA `FoodData` Central collaborator
    pub const USDA_API: &str = "USDA API";
}

/// Provenance attached to resolution results
pub mod resolution {
    /// Confidence reported for every reference-table hit
    pub const CACHE_CONFIDENCE: f64 = 0.95;
    /// Single source label reported for every reference-table hit
    pub const CACHE_SOURCE_LABEL: &str = "USDA FoodData Central (Cached)";
    /// Source label reported by the live USDA estimator
    pub const USDA_SOURCE_LABEL: &str = "USDA FoodData Central";
}

/// Default daily targets applied when the caller has no stored settings
pub mod default_targets {
    /// Daily calorie goal (kcal)
    pub const DAILY_CALORIE_GOAL: f64 = 2000.0;
    /// Daily protein target (g)
    pub const PROTEIN_G: f64 = 150.0;
    /// Daily carbohydrate target (g)
    pub const CARBS_G: f64 = 250.0;
    /// Daily fat target (g)
    pub const FAT_G: f64 = 65.0;
}

/// USDA `FoodData` Central API values
pub mod usda {
    /// Public API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Response cache lifetime (24 hours)
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;
    /// Requests allowed per rolling minute
    pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 30;
    /// Request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Confidence reported for a best-match search result
    pub const DEFAULT_ESTIMATE_CONFIDENCE: f64 = 0.7;

    /// Nutrient id: Energy (kcal)
    pub const NUTRIENT_ENERGY_KCAL: u32 = 1008;
    /// Nutrient id: Protein (g)
    pub const NUTRIENT_PROTEIN: u32 = 1003;
    /// Nutrient id: Total lipid (fat) (g)
    pub const NUTRIENT_FAT: u32 = 1004;
    /// Nutrient id: Carbohydrate, by difference (g)
    pub const NUTRIENT_CARBS: u32 = 1005;
}
