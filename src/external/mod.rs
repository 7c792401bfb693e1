// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Provides live nutrition estimators consulted on reference table misses

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External API Clients

pub mod usda_client;

pub use usda_client::{
    estimate_from_details, FoodDetails, FoodNutrient, FoodSearchResult, UsdaClient,
    UsdaClientConfig,
};
