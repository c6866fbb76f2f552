// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layout: header, optional error banner, then the workspace (upload zone,
//! preview, processing overlay or comparison) beside the sidebar with the
//! instruction field and actions. Toasts float on top.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::session::{Session, SessionState};
use crate::ui::components::ErrorBanner;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use crate::ui::state::CompareSliderState;
use crate::ui::styles;
use crate::ui::widgets::{AnimatedSpinner, CompareSlider};
use iced::widget::{
    button, column, container, image, mouse_area, row, scrollable, stack, text, text_input,
    Column, Container, Row, Space,
};
use iced::{alignment, Color, ContentFit, Element, Length};

/// Watermark sources listed under the upload button.
const UPLOAD_TAGS: [(&str, Color); 3] = [
    ("upload-tag-doubao", palette::SUCCESS_500),
    ("upload-tag-jimeng", palette::INFO_500),
    ("upload-tag-any", palette::ACCENT_500),
];

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a Session,
    pub slider: &'a CompareSliderState,
    pub notifications: &'a notifications::Manager,
    pub spinner_rotation: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut body = Column::new()
        .spacing(spacing::MD)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .push(view_header(ctx.i18n));

    if let Some(banner) = ctx.session.banner() {
        body = body.push(
            ErrorBanner::new(banner.text(ctx.i18n))
                .dismiss(ctx.i18n.tr("action-dismiss"), Message::DismissError)
                .view(),
        );
    }

    let main: Element<'_, Message> = if ctx.session.selected().is_some() {
        row![view_workspace(&ctx), view_sidebar(&ctx)]
            .spacing(spacing::MD)
            .into()
    } else {
        column![view_upload_zone(ctx.i18n), view_info(ctx.i18n)]
            .spacing(spacing::MD)
            .into()
    };
    body = body.push(main);

    let page = Container::new(scrollable(
        Container::new(body)
            .width(Length::Fill)
            .padding(spacing::LG)
            .align_x(alignment::Horizontal::Center),
    ))
    .width(Length::Fill)
    .height(Length::Fill);

    stack![
        page,
        Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification)
    ]
    .into()
}

fn view_header(i18n: &I18n) -> Element<'_, Message> {
    column![
        text(i18n.tr("app-title")).size(typography::TITLE_LG),
        text(i18n.tr("app-powered-by"))
            .size(typography::CAPTION)
            .color(palette::SLATE_500),
    ]
    .spacing(spacing::XXS)
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .into()
}

fn view_upload_zone(i18n: &I18n) -> Element<'_, Message> {
    let content = column![
        text(i18n.tr("upload-title")).size(typography::TITLE_SM),
        text(i18n.tr("upload-hint")).size(typography::BODY),
        button(text(i18n.tr("action-select-image")))
            .on_press(Message::OpenFileDialog)
            .padding([spacing::XS, spacing::LG])
            .style(styles::button::primary),
        view_upload_tags(i18n),
    ]
    .spacing(spacing::MD)
    .align_x(alignment::Horizontal::Center);

    mouse_area(
        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::UPLOAD_HEIGHT))
            .padding(spacing::XL)
            .center_x(Length::Fill)
            .center_y(Length::Fixed(sizing::UPLOAD_HEIGHT))
            .style(styles::container::upload_zone),
    )
    .on_press(Message::OpenFileDialog)
    .interaction(iced::mouse::Interaction::Pointer)
    .into()
}

fn view_upload_tags(i18n: &I18n) -> Element<'_, Message> {
    let tags = UPLOAD_TAGS.iter().map(|&(key, color)| {
        Element::from(
            row![
                Container::new(Space::new())
                    .width(Length::Fixed(sizing::TAG_DOT))
                    .height(Length::Fixed(sizing::TAG_DOT))
                    .style(styles::container::dot(color)),
                text(i18n.tr(key))
                    .size(typography::CAPTION)
                    .color(palette::SLATE_500),
            ]
            .spacing(spacing::XXS)
            .align_y(alignment::Vertical::Center),
        )
    });

    Row::with_children(tags).spacing(spacing::MD).into()
}

fn view_workspace<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let Some(selected) = ctx.session.selected() else {
        return column![].into();
    };

    let content: Element<'a, Message> = match (ctx.session.state(), ctx.session.result()) {
        (SessionState::Complete, Some(result)) => CompareSlider::new(
            selected.preview(),
            result.handle(),
            ctx.slider.position(),
        )
        .image_size(selected.dimensions().or(result.dimensions()))
        .dragging(ctx.slider.is_dragging())
        .labels(
            ctx.i18n.tr("compare-label-original"),
            ctx.i18n.tr("compare-label-processed"),
        )
        .into_element()
        .map(Message::Slider),
        (SessionState::Processing, _) => stack![
            preview(selected.preview()),
            view_processing_overlay(ctx.i18n, ctx.spinner_rotation),
        ]
        .into(),
        _ => preview(selected.preview()),
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::WORKSPACE_HEIGHT))
        .padding(spacing::XS)
        .style(styles::container::panel)
        .into()
}

fn preview<'a>(handle: &image::Handle) -> Element<'a, Message> {
    image(handle.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_processing_overlay(i18n: &I18n, rotation: f32) -> Element<'_, Message> {
    let content = column![
        AnimatedSpinner::new(palette::PRIMARY_400, rotation).into_element(),
        text(i18n.tr("processing-title")).size(typography::TITLE_SM),
        text(i18n.tr("processing-subtitle")).size(typography::BODY),
    ]
    .spacing(spacing::SM)
    .align_x(alignment::Horizontal::Center);

    Container::new(content)
        .center(Length::Fill)
        .style(styles::container::processing_scrim)
        .into()
}

fn view_sidebar<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let session = ctx.session;
    let processing = session.is_processing();

    let mut instruction = text_input(&i18n.tr("instructions-placeholder"), session.instruction())
        .padding(spacing::XS)
        .size(typography::BODY);
    if !processing {
        instruction = instruction.on_input(Message::InstructionChanged);
    }

    let actions: Element<'a, Message> = if session.state() == SessionState::Complete {
        row![
            action_button(i18n.tr("action-redo"), Some(Message::Process), false),
            action_button(i18n.tr("action-download"), Some(Message::Download), true),
        ]
        .spacing(spacing::XS)
        .into()
    } else {
        action_button(
            i18n.tr("action-magic-remove"),
            (!processing).then_some(Message::Process),
            true,
        )
    };

    let change = action_button(
        i18n.tr("action-change-image"),
        (!processing).then_some(Message::Reset),
        false,
    );

    let mut sidebar = column![
        text(i18n.tr("instructions-label")).size(typography::BODY_LG),
        instruction,
        actions,
        change,
    ]
    .spacing(spacing::SM);

    if let Some(selected) = session.selected() {
        let details = match selected.dimensions() {
            Some((w, h)) => format!("{} · {w}×{h}", selected.name()),
            None => selected.name().to_string(),
        };
        sidebar = sidebar.push(
            text(details)
                .size(typography::CAPTION)
                .color(palette::SLATE_500),
        );
    }

    Container::new(sidebar)
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .padding(spacing::MD)
        .style(styles::container::panel)
        .into()
}

fn action_button<'a>(
    label: String,
    on_press: Option<Message>,
    primary: bool,
) -> Element<'a, Message> {
    let style = if primary {
        styles::button::primary
    } else {
        styles::button::secondary
    };
    button(Container::new(text(label)).center_x(Length::Fill))
        .on_press_maybe(on_press)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::MD])
        .style(style)
        .into()
}

fn info_card<'a>(i18n: &I18n, title: &str, body: &str) -> Element<'a, Message> {
    Container::new(
        column![
            text(i18n.tr(title)).size(typography::BODY_LG),
            text(i18n.tr(body)).size(typography::BODY),
        ]
        .spacing(spacing::XS),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}

fn view_info(i18n: &I18n) -> Element<'_, Message> {
    container(
        row![
            info_card(i18n, "info-how-title", "info-how-body"),
            info_card(i18n, "info-formats-title", "info-formats-body"),
            info_card(i18n, "info-privacy-title", "info-privacy-body"),
        ]
        .spacing(spacing::MD),
    )
    .width(Length::Fill)
    .into()
}
