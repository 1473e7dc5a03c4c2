// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Idea Hub AI service

/// Semantic version number, reported by `/` and `/health`
pub const VERSION: &str = "1.0.0";

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Idea Hub AI Service {}", VERSION)
}
