// SPDX-License-Identifier: MPL-2.0
//! Reusable UI components.
//!
//! - [`error_banner`] - dismissable error strip above the workspace

pub mod error_banner;

pub use error_banner::ErrorBanner;
