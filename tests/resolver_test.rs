// ABOUTME: Integration tests for the resolver's cache-first routing and estimator fallback
// ABOUTME: Verifies short-circuiting on hits and verbatim propagation of estimator results
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macro_ledger::{
    errors::ErrorCode,
    nutrition::{OfflineEstimator, ResolutionCache, Resolver},
};
use std::sync::Arc;

mod common;

use common::{external_estimate, init_test_logging, RecordingEstimator};

fn resolver(estimator: Arc<RecordingEstimator>) -> Resolver<Arc<RecordingEstimator>> {
    init_test_logging();
    Resolver::new(ResolutionCache::builtin().unwrap(), estimator)
}

#[tokio::test]
async fn test_cache_hit_skips_estimator() {
    let estimator = Arc::new(RecordingEstimator::succeeding(external_estimate()));
    let resolver = resolver(Arc::clone(&estimator));

    let estimate = resolver.resolve("Chicken Breast").await.unwrap();

    assert!((estimate.calories() - 165.0).abs() < f64::EPSILON);
    assert!((estimate.protein() - 31.0).abs() < f64::EPSILON);
    assert!(estimate.carbs().abs() < f64::EPSILON);
    assert!((estimate.fat() - 4.0).abs() < f64::EPSILON);
    assert!((estimate.confidence - 0.95).abs() < f64::EPSILON);
    assert_eq!(estimate.sources, vec!["USDA FoodData Central (Cached)"]);
    assert_eq!(estimator.calls(), 0);
}

#[tokio::test]
async fn test_hit_is_case_and_whitespace_insensitive() {
    let estimator = Arc::new(RecordingEstimator::succeeding(external_estimate()));
    let resolver = resolver(Arc::clone(&estimator));

    for text in [
        "ice cream",
        "  ICE   Cream ",
        "Ice\tCream",
        "\u{FEFF}Ice Cream\u{FEFF}",
        "ice\u{00A0}cream",
    ] {
        let estimate = resolver.resolve(text).await.unwrap();
        assert!((estimate.calories() - 207.0).abs() < f64::EPSILON, "{text:?}");
    }
    assert_eq!(estimator.calls(), 0);
}

#[tokio::test]
async fn test_miss_delegates_once_and_returns_verbatim() {
    let estimator = Arc::new(RecordingEstimator::succeeding(external_estimate()));
    let resolver = resolver(Arc::clone(&estimator));

    let estimate = resolver.resolve("unobtainium smoothie").await.unwrap();

    assert_eq!(estimate, external_estimate());
    assert_eq!(estimator.calls(), 1);
}

#[tokio::test]
async fn test_miss_passes_original_text() {
    let estimator = Arc::new(RecordingEstimator::succeeding(external_estimate()));
    let resolver = resolver(Arc::clone(&estimator));

    resolver.resolve("  Unobtainium   SMOOTHIE!! ").await.unwrap();

    assert_eq!(estimator.seen(), vec!["  Unobtainium   SMOOTHIE!! "]);
}

#[tokio::test]
async fn test_partial_phrase_is_a_miss() {
    let estimator = Arc::new(RecordingEstimator::succeeding(external_estimate()));
    let resolver = resolver(Arc::clone(&estimator));

    let estimate = resolver.resolve("green apple").await.unwrap();

    assert_eq!(estimate, external_estimate());
    assert_eq!(estimator.calls(), 1);
}

#[tokio::test]
async fn test_estimator_failure_propagates_unchanged() {
    let estimator = Arc::new(RecordingEstimator::failing("upstream timeout"));
    let resolver = resolver(Arc::clone(&estimator));

    let err = resolver.resolve("unobtainium smoothie").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.message, "Estimator: upstream timeout");
    assert_eq!(err.context.details["retryable"], true);
    assert_eq!(estimator.calls(), 1);
}

#[tokio::test]
async fn test_empty_text_goes_to_estimator() {
    let estimator = Arc::new(RecordingEstimator::succeeding(external_estimate()));
    let resolver = resolver(Arc::clone(&estimator));

    resolver.resolve("   ").await.unwrap();

    assert_eq!(estimator.calls(), 1);
}

#[tokio::test]
async fn test_offline_resolver_reports_not_found() {
    init_test_logging();
    let resolver = Resolver::new(ResolutionCache::builtin().unwrap(), OfflineEstimator);

    assert!(resolver.resolve("Banana").await.is_ok());
    let err = resolver.resolve("dragon fruit").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_concurrent_resolutions() {
    let estimator = Arc::new(RecordingEstimator::succeeding(external_estimate()));
    let resolver = Arc::new(resolver(Arc::clone(&estimator)));

    let texts = ["apple", "Apple", "salmon", "mystery stew", "mystery stew", "taco"];
    let handles: Vec<_> = texts
        .into_iter()
        .map(|text| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve(text).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(estimator.calls(), 2);
}
