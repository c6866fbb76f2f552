// SPDX-License-Identifier: MPL-2.0
//! Window icon, rendered procedurally: a brand gradient disc with a light
//! diagonal stroke standing for the removed mark.

use crate::ui::design_tokens::palette;
use iced::window::{icon, Icon};

const SIZE: u32 = 64;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Returns the RGBA pixels of the icon, row-major.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn icon_rgba() -> Vec<u8> {
    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    let center = SIZE as f32 / 2.0;
    let radius = center - 1.0;

    for y in 0..SIZE {
        for x in 0..SIZE {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let distance = ((fx - center).powi(2) + (fy - center).powi(2)).sqrt();
            if distance > radius {
                pixels.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }

            let t = (fx + fy) / (2.0 * SIZE as f32);
            let from = palette::PRIMARY_500;
            let to = palette::ACCENT_500;
            let mut color = [
                from.r + (to.r - from.r) * t,
                from.g + (to.g - from.g) * t,
                from.b + (to.b - from.b) * t,
            ];

            // Diagonal stroke from bottom-left to top-right
            if ((fx + fy) - SIZE as f32).abs() < 5.0 && distance < radius * 0.7 {
                color = [1.0, 1.0, 1.0];
            }

            pixels.extend_from_slice(&[
                channel(color[0]),
                channel(color[1]),
                channel(color[2]),
                255,
            ]);
        }
    }
    pixels
}

/// Builds the window icon. Returns `None` if the platform rejects it.
pub fn load_window_icon() -> Option<Icon> {
    match icon::from_rgba(icon_rgba(), SIZE, SIZE) {
        Ok(icon) => Some(icon),
        Err(err) => {
            tracing::debug!(error = %err, "window icon rejected");
            None
        }
    }
}
