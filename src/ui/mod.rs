// SPDX-License-Identifier: MPL-2.0
//! User interface building blocks, following the Elm-style "state down,
//! messages up" pattern.
//!
//! - [`state`] - comparison slider state
//! - [`widgets`] - canvas widgets (comparison slider, spinner)
//! - [`components`] - reusable composites (error banner)
//! - [`notifications`] - toast notifications
//! - [`styles`] - button and container styles
//! - [`design_tokens`] - colors, spacing, sizing
//! - [`theming`] - light/dark/system theme mode

pub mod components;
pub mod design_tokens;
pub mod notifications;
pub mod state;
pub mod styles;
pub mod theming;
pub mod widgets;
