// ABOUTME: Helper modules for the macro-ledger CLI
// ABOUTME: Output formatting for daily summaries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub mod display;
