// ABOUTME: Estimator capability consulted when the resolution cache misses
// ABOUTME: Defines the NutritionEstimator trait and an offline estimator for cache-only operation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Estimator capability
//!
//! An estimator turns raw food text into a [`NutritionEstimate`] by some means
//! the ledger does not know about (remote AI model, nutrition API, ...). It may
//! be slow and it may fail. Timeouts, retries and cancellation are the
//! estimator's own business; the resolver forwards whatever it returns.

use crate::errors::{AppError, AppResult};
use crate::models::NutritionEstimate;
use async_trait::async_trait;
use std::sync::Arc;

/// External nutrition estimation capability
#[async_trait]
pub trait NutritionEstimator: Send + Sync {
    /// Short identifier used in logs (e.g. "usda", "offline")
    fn name(&self) -> &'static str;

    /// Estimate nutrition for the raw, un-normalized user text
    ///
    /// # Errors
    ///
    /// Any failure of the underlying service. Callers receive it unchanged.
    async fn estimate(&self, raw_text: &str) -> AppResult<NutritionEstimate>;
}

#[async_trait]
impl<T: NutritionEstimator + ?Sized> NutritionEstimator for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn estimate(&self, raw_text: &str) -> AppResult<NutritionEstimate> {
        (**self).estimate(raw_text).await
    }
}

/// Estimator that knows nothing; every request is reported as not found
///
/// Used when the ledger runs against the reference table only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineEstimator;

#[async_trait]
impl NutritionEstimator for OfflineEstimator {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn estimate(&self, raw_text: &str) -> AppResult<NutritionEstimate> {
        Err(AppError::not_found(format!("Food '{raw_text}'")).with_resource_id(raw_text))
    }
}
