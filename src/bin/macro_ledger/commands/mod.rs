// ABOUTME: Command implementations for the macro-ledger CLI
// ABOUTME: Estimator selection, resolution, reference listing and meal log summaries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::NaiveDate;
use macro_ledger::{
    config::LedgerConfig,
    errors::{AppError, AppResult, ErrorCode},
    external::UsdaClient,
    logging::AppLogger,
    models::{MealEntry, NutritionEstimate, UserSettings},
    nutrition::{
        entries_on, summarize, DailySummary, NutritionEstimator, OfflineEstimator, ResolutionCache,
        Resolver,
    },
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Pick the estimator consulted on reference-table misses
///
/// Falls back to the offline estimator when no USDA key is configured.
pub fn build_estimator(
    config: &LedgerConfig,
    offline: bool,
) -> AppResult<Arc<dyn NutritionEstimator>> {
    if offline {
        return Ok(Arc::new(OfflineEstimator));
    }
    if !config.usda_enabled() {
        warn!("USDA_API_KEY not set, resolving against the reference table only");
        return Ok(Arc::new(OfflineEstimator));
    }
    Ok(Arc::new(UsdaClient::new(config.usda.clone())?))
}

/// Resolve text and log the outcome
pub async fn resolve_text<E: NutritionEstimator>(
    resolver: &Resolver<E>,
    text: &str,
) -> AppResult<NutritionEstimate> {
    let started = Instant::now();
    let estimate = resolver.resolve(text).await?;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    AppLogger::log_resolution(
        text,
        estimate.confidence,
        estimate.sources.first().map_or("unknown", String::as_str),
        duration_ms,
    );
    Ok(estimate)
}

/// Canonical reference keys in sorted order
pub fn food_keys(cache: &ResolutionCache) -> Vec<&str> {
    cache.list_keys().into_iter().collect()
}

/// Read a JSON meal log from disk
pub async fn read_meal_log(path: &Path) -> AppResult<Vec<MealEntry>> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", path.display())).with_source(e)
    })?;
    parse_meal_log(&raw).map_err(|e| e.with_resource_id(path.display().to_string()))
}

/// Parse a JSON array of meal entries
pub fn parse_meal_log(raw: &str) -> AppResult<Vec<MealEntry>> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::new(ErrorCode::InvalidFormat, format!("Malformed meal log: {e}")).with_source(e)
    })
}

/// Summarize a meal log, optionally restricted to one UTC day
pub fn summarize_log(
    entries: &[MealEntry],
    settings: &UserSettings,
    day: Option<NaiveDate>,
) -> DailySummary {
    let summary = match day {
        Some(day) => {
            let selected = entries_on(entries, day);
            info!(
                total = entries.len(),
                selected = selected.len(),
                %day,
                "Filtered meal log to one day"
            );
            summarize(selected, settings)
        }
        None => summarize(entries, settings),
    };

    AppLogger::log_summary(
        summary.meal_count,
        summary.total_calories,
        settings.daily_calorie_goal,
    );
    summary
}
