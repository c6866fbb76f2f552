// SPDX-License-Identifier: MPL-2.0
//! Before/after comparison canvas.
//!
//! Draws the processed image over the full fitted area, then the original
//! clipped to the left of the divider. A vertical handle with a round knob
//! marks the divider. Pressing near the handle publishes
//! [`Interaction::Grab`]; moves and releases are delivered by the app-level
//! drag subscription so that a drag keeps working outside the canvas.

use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::state::{DividerPercent, Pointer};
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::widget::image::Handle;
use iced::widget::Action;
use iced::{mouse, touch, Color, Element, Length, Pixels, Point, Rectangle, Size, Theme};

/// Pointer interactions with the comparison slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// A pointer pressed the handle. `bounds` is the displayed image
    /// rectangle in window coordinates.
    Grab {
        pointer: Pointer,
        bounds: Rectangle,
    },
    Moved {
        pointer: Pointer,
        at: Point,
    },
    Released(Pointer),
}

/// Returns the rectangle an image of `image_size` occupies when fitted
/// inside `bounds` while preserving its aspect ratio.
///
/// Unknown or degenerate sizes fill `bounds`.
#[must_use]
pub fn fit_contain(image_size: Option<Size>, bounds: Rectangle) -> Rectangle {
    let Some(size) = image_size.filter(|s| s.width > 0.0 && s.height > 0.0) else {
        return bounds;
    };
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return bounds;
    }

    let scale = (bounds.width / size.width).min(bounds.height / size.height);
    let width = size.width * scale;
    let height = size.height * scale;
    Rectangle {
        x: bounds.x + (bounds.width - width) / 2.0,
        y: bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    }
}

/// Whether `point` is close enough to the divider to grab it.
#[must_use]
pub fn hits_handle(point: Point, image: Rectangle, position: DividerPercent) -> bool {
    let divider_x = position.x_in(image);
    (point.x - divider_x).abs() <= sizing::COMPARE_HIT_SLOP
        && point.y >= image.y
        && point.y <= image.y + image.height
}

/// Canvas program rendering the comparison.
pub struct CompareSlider<'a> {
    before: &'a Handle,
    after: &'a Handle,
    image_size: Option<Size>,
    position: DividerPercent,
    dragging: bool,
    before_label: String,
    after_label: String,
}

impl<'a> CompareSlider<'a> {
    #[must_use]
    pub fn new(before: &'a Handle, after: &'a Handle, position: DividerPercent) -> Self {
        Self {
            before,
            after,
            image_size: None,
            position,
            dragging: false,
            before_label: String::new(),
            after_label: String::new(),
        }
    }

    /// Intrinsic size of the images, used to letterbox them.
    #[must_use]
    pub fn image_size(mut self, dimensions: Option<(u32, u32)>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        // image dimensions are far below f32's exact integer range
        {
            self.image_size = dimensions.map(|(w, h)| Size::new(w as f32, h as f32));
        }
        self
    }

    #[must_use]
    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    #[must_use]
    pub fn labels(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_label = before.into();
        self.after_label = after.into();
        self
    }

    pub fn into_element(self) -> Element<'a, Interaction> {
        canvas::Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn grab(
        &self,
        pointer: Pointer,
        at: Point,
        bounds: Rectangle,
    ) -> Option<Action<Interaction>> {
        let image = fit_contain(self.image_size, bounds);
        hits_handle(at, image, self.position).then(|| {
            Action::publish(Interaction::Grab {
                pointer,
                bounds: image,
            })
            .and_capture()
        })
    }

    fn draw_label(frame: &mut Frame, content: &str, anchor: Point, align_right: bool) {
        if content.is_empty() {
            return;
        }
        // Approximate advance for the caption size
        #[allow(clippy::cast_precision_loss)]
        let text_width = content.chars().count() as f32 * typography::CAPTION * 0.6;
        let size = Size::new(
            text_width + spacing::SM * 2.0,
            typography::CAPTION + spacing::XS * 2.0,
        );
        let top_left = if align_right {
            Point::new(anchor.x - size.width, anchor.y)
        } else {
            anchor
        };

        frame.fill(
            &Path::rounded_rectangle(top_left, size, radius::FULL.min(size.height / 2.0).into()),
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            },
        );
        frame.fill_text(canvas::Text {
            content: content.to_string(),
            position: Point::new(top_left.x + spacing::SM, top_left.y + spacing::XS),
            color: palette::WHITE,
            size: Pixels(typography::CAPTION),
            ..canvas::Text::default()
        });
    }

    fn draw_handle(&self, frame: &mut Frame, image: Rectangle, theme: &Theme) {
        let x = self.position.x_in(image);
        let accent = theme.extended_palette().primary.base.color;

        frame.stroke(
            &Path::line(
                Point::new(x, image.y),
                Point::new(x, image.y + image.height),
            ),
            Stroke::default()
                .with_width(sizing::COMPARE_LINE_WIDTH)
                .with_color(palette::WHITE),
        );

        let center = Point::new(x, image.y + image.height / 2.0);
        let knob_radius = sizing::COMPARE_KNOB / 2.0;
        frame.fill(&Path::circle(center, knob_radius), palette::WHITE);
        frame.stroke(
            &Path::circle(center, knob_radius),
            Stroke::default()
                .with_width(if self.dragging { 3.0 } else { 2.0 })
                .with_color(accent),
        );

        // Left and right chevrons inside the knob
        let arm = knob_radius * 0.3;
        let gap = knob_radius * 0.25;
        let chevrons = Path::new(|builder| {
            builder.move_to(Point::new(center.x - gap, center.y - arm));
            builder.line_to(Point::new(center.x - gap - arm, center.y));
            builder.line_to(Point::new(center.x - gap, center.y + arm));
            builder.move_to(Point::new(center.x + gap, center.y - arm));
            builder.line_to(Point::new(center.x + gap + arm, center.y));
            builder.line_to(Point::new(center.x + gap, center.y + arm));
        });
        frame.stroke(
            &chevrons,
            Stroke::default()
                .with_width(2.0)
                .with_color(accent)
                .with_line_cap(canvas::LineCap::Round),
        );
    }
}

impl canvas::Program<Interaction> for CompareSlider<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Interaction>> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let at = cursor.position_over(bounds)?;
                self.grab(Pointer::Mouse, at, bounds)
            }
            iced::Event::Touch(touch::Event::FingerPressed { id, position })
                if bounds.contains(*position) =>
            {
                self.grab(Pointer::Touch(*id), *position, bounds)
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let image = fit_contain(self.image_size, Rectangle::with_size(bounds.size()));
        let divider_x = self.position.x_in(image);

        frame.draw_image(image, self.after);

        let clip = Rectangle {
            x: image.x,
            y: image.y,
            width: (divider_x - image.x).max(0.0),
            height: image.height,
        };
        if clip.width > 0.0 {
            // Clip coordinates are local to the clip region
            frame.with_clip(clip, |frame| {
                frame.draw_image(
                    Rectangle::new(Point::ORIGIN, image.size()),
                    self.before,
                );
            });
        }

        self.draw_handle(&mut frame, image, theme);

        let inset = spacing::SM;
        Self::draw_label(
            &mut frame,
            &self.before_label,
            Point::new(image.x + inset, image.y + inset),
            false,
        );
        Self::draw_label(
            &mut frame,
            &self.after_label,
            Point::new(image.x + image.width - inset, image.y + inset),
            true,
        );

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            return mouse::Interaction::ResizingHorizontally;
        }
        let image = fit_contain(self.image_size, bounds);
        match cursor.position_over(bounds) {
            Some(at) if hits_handle(at, image, self.position) => {
                mouse::Interaction::ResizingHorizontally
            }
            _ => mouse::Interaction::default(),
        }
    }
}
