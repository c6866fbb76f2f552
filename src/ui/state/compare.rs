// SPDX-License-Identifier: MPL-2.0
//! Before/after comparison slider state.
//!
//! The divider position is a percentage of the displayed image width,
//! measured from its left edge. Dragging is tracked per pointer: once a
//! mouse or a finger grabs the handle, only that pointer moves it until it
//! is released.

use crate::config::{DEFAULT_DIVIDER_PERCENT, MAX_DIVIDER_PERCENT, MIN_DIVIDER_PERCENT};
use iced::{touch, Point, Rectangle};

/// Divider position, guaranteed to stay within 0%–100%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerPercent(f32);

impl DividerPercent {
    /// Creates a position, clamping to the valid range. NaN maps to the default.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self::default();
        }
        Self(percent.clamp(MIN_DIVIDER_PERCENT, MAX_DIVIDER_PERCENT))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the position as a fraction (50% → 0.5).
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        self.0 / 100.0
    }

    /// Returns the divider x coordinate inside `bounds`.
    #[must_use]
    pub fn x_in(self, bounds: Rectangle) -> f32 {
        bounds.x + bounds.width * self.as_fraction()
    }
}

impl Default for DividerPercent {
    fn default() -> Self {
        Self(DEFAULT_DIVIDER_PERCENT)
    }
}

/// Converts a horizontal pointer coordinate to a divider position within
/// `bounds`. Coordinates outside the bounds clamp to the nearest edge.
#[must_use]
pub fn divider_percent(x: f32, bounds: Rectangle) -> DividerPercent {
    if bounds.width <= 0.0 {
        return DividerPercent::default();
    }
    DividerPercent::new((x - bounds.x) / bounds.width * 100.0)
}

/// The input device driving a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Mouse,
    Touch(touch::Finger),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging {
        pointer: Pointer,
        /// Displayed image rectangle, in window coordinates, at grab time.
        bounds: Rectangle,
    },
}

/// Comparison slider state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompareSliderState {
    position: DividerPercent,
    phase: Phase,
}

impl CompareSliderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn position(&self) -> DividerPercent {
        self.position
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Starts a drag with `pointer`. The divider stays put until the
    /// pointer moves.
    ///
    /// Ignored while another pointer is already dragging.
    pub fn start_drag(&mut self, pointer: Pointer, bounds: Rectangle) {
        if self.is_dragging() {
            return;
        }
        self.phase = Phase::Dragging { pointer, bounds };
    }

    /// Moves the divider when `pointer` is the one dragging.
    ///
    /// Returns the new position, or `None` if the event was ignored.
    pub fn pointer_moved(&mut self, pointer: Pointer, at: Point) -> Option<DividerPercent> {
        match self.phase {
            Phase::Dragging {
                pointer: active,
                bounds,
            } if active == pointer => {
                self.position = divider_percent(at.x, bounds);
                Some(self.position)
            }
            _ => None,
        }
    }

    /// Ends the drag if `pointer` is the one dragging.
    pub fn release(&mut self, pointer: Pointer) {
        if let Phase::Dragging { pointer: active, .. } = self.phase {
            if active == pointer {
                self.phase = Phase::Idle;
            }
        }
    }
}
