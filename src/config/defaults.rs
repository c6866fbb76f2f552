// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Processing**: Removal service endpoint, model, instruction and timeout
//! - **Comparison**: Divider position bounds for the before/after slider
//! - **Download**: Naming of saved results

// ==========================================================================
// Processing Defaults
// ==========================================================================

/// Instruction sent with every image unless the user edits it.
pub const DEFAULT_INSTRUCTION: &str =
    "Remove the watermark, text overlays, and logos from this image.";

/// Base URL of the Gemini REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Image-capable model used for inpainting.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Default time budget for a single removal request (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Environment variables checked for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

// ==========================================================================
// Comparison Defaults
// ==========================================================================

/// Divider position when a result is first shown (percent of width).
pub const DEFAULT_DIVIDER_PERCENT: f32 = 50.0;

/// Leftmost divider position.
pub const MIN_DIVIDER_PERCENT: f32 = 0.0;

/// Rightmost divider position.
pub const MAX_DIVIDER_PERCENT: f32 = 100.0;

// ==========================================================================
// Download Defaults
// ==========================================================================

/// Prefix prepended to the original file name when saving a result.
pub const DOWNLOAD_PREFIX: &str = "cleaned-";

/// Name used when the selection has no usable file name.
pub const FALLBACK_FILE_NAME: &str = "image";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_REQUEST_TIMEOUT_SECS > 0);
    assert!(MAX_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);

    assert!(MIN_DIVIDER_PERCENT < MAX_DIVIDER_PERCENT);
    assert!(DEFAULT_DIVIDER_PERCENT >= MIN_DIVIDER_PERCENT);
    assert!(DEFAULT_DIVIDER_PERCENT <= MAX_DIVIDER_PERCENT);
};
