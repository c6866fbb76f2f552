// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by every view.
//!
//! - **Palette**: base colors
//! - **Opacity**: overlay levels
//! - **Spacing**: 4px grid
//! - **Sizing**: component sizes, including the comparison handle
//! - **Typography**: font size scale
//! - **Border** / **Radius** / **Shadow**
//!
//! ```
//! use watermark_remover::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let scrim = Color {
//!     a: opacity::OVERLAY_STRONG,
//!     ..palette::BLACK
//! };
//! let padding = spacing::MD;
//! # let _ = (scrim, padding);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const SLATE_950: Color = Color::from_rgb(0.008, 0.024, 0.090);
    pub const SLATE_900: Color = Color::from_rgb(0.059, 0.090, 0.165);
    pub const SLATE_700: Color = Color::from_rgb(0.200, 0.255, 0.333);
    pub const SLATE_500: Color = Color::from_rgb(0.392, 0.455, 0.545);
    pub const SLATE_400: Color = Color::from_rgb(0.580, 0.639, 0.722);
    pub const SLATE_200: Color = Color::from_rgb(0.886, 0.910, 0.941);
    pub const SLATE_100: Color = Color::from_rgb(0.945, 0.961, 0.976);

    // Brand (indigo to violet)
    pub const PRIMARY_400: Color = Color::from_rgb(0.506, 0.549, 0.973);
    pub const PRIMARY_500: Color = Color::from_rgb(0.388, 0.400, 0.945);
    pub const PRIMARY_600: Color = Color::from_rgb(0.310, 0.275, 0.898);
    pub const ACCENT_500: Color = Color::from_rgb(0.545, 0.361, 0.965);

    // Semantic
    pub const ERROR_50: Color = Color::from_rgb(0.996, 0.949, 0.949);
    pub const ERROR_500: Color = Color::from_rgb(0.937, 0.267, 0.267);
    pub const ERROR_700: Color = Color::from_rgb(0.725, 0.110, 0.110);
    pub const WARNING_500: Color = Color::from_rgb(0.961, 0.620, 0.043);
    pub const SUCCESS_500: Color = Color::from_rgb(0.133, 0.773, 0.369);
    pub const INFO_500: Color = Color::from_rgb(0.231, 0.510, 0.965);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;

    /// Panels drawn over the window background.
    pub const SURFACE: f32 = 0.95;
}

// ============================================================================
// Spacing Scale (4px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_XL: f32 = 48.0;

    pub const BUTTON_HEIGHT: f32 = 40.0;

    /// Maximum width of the centered content column.
    pub const CONTENT_MAX_WIDTH: f32 = 960.0;
    pub const SIDEBAR_WIDTH: f32 = 300.0;
    pub const TOAST_WIDTH: f32 = 340.0;
    pub const WORKSPACE_HEIGHT: f32 = 480.0;
    pub const UPLOAD_HEIGHT: f32 = 280.0;
    /// Colored dot in front of the upload zone tags.
    pub const TAG_DOT: f32 = 8.0;

    /// Width of the divider line in the comparison view.
    pub const COMPARE_LINE_WIDTH: f32 = 2.0;
    /// Diameter of the round knob on the divider.
    pub const COMPARE_KNOB: f32 = 36.0;
    /// Horizontal distance from the divider within which a press grabs it.
    pub const COMPARE_HIT_SLOP: f32 = 22.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Window heading.
    pub const TITLE_LG: f32 = 28.0;
    /// Section headings.
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    /// Badges and footers.
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border / Radius / Shadow
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 16.0;
    pub const FULL: f32 = 9999.0;
}

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    assert!(typography::TITLE_LG > typography::TITLE_SM);
    assert!(typography::BODY_LG > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);

    assert!(sizing::COMPARE_HIT_SLOP * 2.0 >= sizing::COMPARE_KNOB);
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};
