// ABOUTME: Routes raw food text through the resolution cache and falls back to an estimator
// ABOUTME: Cache hits short-circuit; misses call the estimator once and forward its result as-is
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::cache::{CacheLookup, ResolutionCache};
use super::estimator::NutritionEstimator;
use super::normalizer::normalize;
use crate::errors::AppResult;
use crate::models::NutritionEstimate;
use tracing::{debug, warn};

/// Resolves raw food text into a [`NutritionEstimate`]
///
/// Holds no mutable state, so one resolver can serve any number of
/// concurrent `resolve` calls.
#[derive(Debug, Clone)]
pub struct Resolver<E> {
    cache: ResolutionCache,
    estimator: E,
}

impl<E: NutritionEstimator> Resolver<E> {
    /// Create a resolver from a cache and the fallback estimator
    #[must_use]
    pub const fn new(cache: ResolutionCache, estimator: E) -> Self {
        Self { cache, estimator }
    }

    /// Resolve raw user text
    ///
    /// A reference-table hit is returned without touching the estimator.
    /// On a miss the estimator receives the original text, not the canonical
    /// form, and its answer is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns exactly the error produced by the estimator on a cache miss
    pub async fn resolve(&self, raw_text: &str) -> AppResult<NutritionEstimate> {
        let canonical = normalize(raw_text);

        match self.cache.lookup(&canonical) {
            CacheLookup::Hit(estimate) => {
                debug!(food = %canonical, "Resolved from reference table");
                Ok(estimate)
            }
            CacheLookup::Miss => {
                debug!(
                    food = %canonical,
                    estimator = self.estimator.name(),
                    "Reference table miss, delegating to estimator"
                );
                self.estimator.estimate(raw_text).await.inspect_err(|e| {
                    warn!(
                        food = %canonical,
                        estimator = self.estimator.name(),
                        error = %e,
                        "Estimator failed"
                    );
                })
            }
        }
    }

    /// The cache consulted before the estimator
    #[must_use]
    pub const fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// The fallback estimator
    #[must_use]
    pub const fn estimator(&self) -> &E {
        &self.estimator
    }
}
