// SPDX-License-Identifier: MPL-2.0
pub mod animated_spinner;
pub mod compare_slider;

pub use animated_spinner::AnimatedSpinner;
pub use compare_slider::{CompareSlider, Interaction};
