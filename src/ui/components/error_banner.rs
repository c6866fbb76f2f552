// SPDX-License-Identifier: MPL-2.0
//! Dismissable error banner shown above the workspace.
//!
//! ```ignore
//! use crate::ui::components::error_banner::ErrorBanner;
//!
//! ErrorBanner::new(banner.text(&i18n))
//!     .dismiss(i18n.tr("action-dismiss"), Message::DismissError)
//!     .view()
//! ```

use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Container, Row};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone)]
pub struct ErrorBanner<Message> {
    message: String,
    dismiss: Option<(String, Message)>,
}

impl<Message: Clone + 'static> ErrorBanner<Message> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dismiss: None,
        }
    }

    /// Adds a dismiss button publishing `on_press`.
    #[must_use]
    pub fn dismiss(mut self, label: impl Into<String>, on_press: Message) -> Self {
        self.dismiss = Some((label.into(), on_press));
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn view<'a>(self) -> Element<'a, Message> {
        let mut row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(text("⚠").size(typography::BODY_LG))
            .push(
                text(self.message)
                    .size(typography::BODY)
                    .width(Length::Fill),
            );

        if let Some((label, on_press)) = self.dismiss {
            row = row.push(
                button(text(label).size(typography::CAPTION))
                    .on_press(on_press)
                    .padding([spacing::XXS, spacing::XS])
                    .style(styles::button::ghost),
            );
        }

        Container::new(row)
            .width(Length::Fill)
            .padding([spacing::SM, spacing::MD])
            .style(styles::container::error_banner)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum TestMessage {
        Dismiss,
    }

    #[test]
    fn banner_keeps_message_verbatim() {
        let banner: ErrorBanner<TestMessage> = ErrorBanner::new("quota exceeded");
        assert_eq!(banner.message(), "quota exceeded");
    }

    #[test]
    fn dismiss_is_optional() {
        let banner = ErrorBanner::new("x").dismiss("Dismiss", TestMessage::Dismiss);
        assert_eq!(
            banner.dismiss,
            Some(("Dismiss".to_string(), TestMessage::Dismiss))
        );
        let _element: Element<'_, TestMessage> = banner.view();
    }
}
