// ABOUTME: Output formatting helpers for macro-ledger
// ABOUTME: Renders a daily summary as a table with clamped progress bars
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use macro_ledger::{
    models::Nutrient,
    nutrition::{display_percentage, DailySummary},
};
use std::fmt::Write;

const BAR_WIDTH: f64 = 20.0;

/// Bar of `#` proportional to the clamped percentage
fn progress_bar(raw_percentage: f64) -> String {
    let filled = (display_percentage(raw_percentage) / 100.0 * BAR_WIDTH).round() as usize;
    "#".repeat(filled)
}

/// Render a summary table; the bar is clamped, the printed percentage is not
pub fn render_table(summary: &DailySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Meals logged: {}", summary.meal_count);
    for nutrient in Nutrient::ALL {
        let raw = summary.percentage(nutrient);
        let _ = writeln!(
            out,
            "{:<9} {:>7.0} / {:<6.0} {:<4} [{:<20}] {:>4.0}%",
            nutrient,
            summary.total(nutrient),
            summary.target(nutrient),
            nutrient.unit(),
            progress_bar(raw),
            raw
        );
    }

    let balance = summary.balance();
    if balance.is_over() {
        let _ = writeln!(out, "Over goal: +{:.0} kcal", balance.amount());
    } else {
        let _ = writeln!(out, "Remaining: {:.0} kcal", balance.amount());
    }
    out
}
