// SPDX-License-Identifier: MPL-2.0
//! UI state kept outside the main App struct.

pub mod compare;

pub use compare::{divider_percent, CompareSliderState, DividerPercent, Pointer};
