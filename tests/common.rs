// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, meal entry builders and scripted estimators
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `macro_ledger`

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use macro_ledger::{
    errors::{AppError, AppResult},
    models::{MealEntry, NutritionEstimate, NutritionFact},
    nutrition::NutritionEstimator,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Noon UTC on the given day
pub fn at_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap()
}

/// Meal entry with the given macros, logged at noon on 2025-06-01
pub fn meal(id: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> MealEntry {
    MealEntry {
        id: id.to_owned(),
        text: format!("meal {id}"),
        calories,
        protein,
        carbs,
        fat,
        timestamp: at_noon(2025, 6, 1),
    }
}

/// Meal entry carrying only calories
pub fn calories_only(id: &str, calories: f64) -> MealEntry {
    meal(id, calories, 0.0, 0.0, 0.0)
}

/// Estimate an external service might return
pub fn external_estimate() -> NutritionEstimate {
    NutritionEstimate::new(
        NutritionFact {
            calories: 310.0,
            protein: 4.5,
            carbs: 62.0,
            fat: 3.25,
            explanation: "Blended fruit smoothie, 16 oz. Estimated.".to_owned(),
        },
        0.62,
        vec!["model:estimator-v1".to_owned(), "heuristic".to_owned()],
    )
}

/// What the scripted estimator answers with
pub enum Script {
    /// Return this estimate
    Succeed(NutritionEstimate),
    /// Fail with an external service error carrying this message
    Fail(&'static str),
}

/// Estimator that records every call and answers from a script
pub struct RecordingEstimator {
    script: Script,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl RecordingEstimator {
    pub fn succeeding(estimate: NutritionEstimate) -> Self {
        Self::new(Script::Succeed(estimate))
    }

    pub fn failing(message: &'static str) -> Self {
        Self::new(Script::Fail(message))
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl NutritionEstimator for RecordingEstimator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn estimate(&self, raw_text: &str) -> AppResult<NutritionEstimate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(raw_text.to_owned());
        match &self.script {
            Script::Succeed(estimate) => Ok(estimate.clone()),
            Script::Fail(message) => Err(AppError::external_service("Estimator", *message)
                .with_details(serde_json::json!({ "retryable": true }))),
        }
    }
}
