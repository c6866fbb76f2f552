// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! - File drops are listened to for the whole lifetime of the window.
//! - Pointer tracking for the comparison slider exists only while a drag
//!   is in progress, so idle moves never reach `update`.
//! - A periodic tick runs while the spinner or a toast needs it.

use super::Message;
use crate::ui::state::Pointer;
use crate::ui::widgets::Interaction;
use iced::{event, mouse, time, touch, window, Event, Subscription};
use std::time::Duration;

/// Tick interval while the spinner is animating.
const SPINNER_TICK: Duration = Duration::from_millis(50);
/// Tick interval for toast expiry alone.
const NOTIFICATION_TICK: Duration = Duration::from_millis(100);

pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    })
}

/// Maps a raw window event to a slider drag interaction.
#[must_use]
pub fn drag_interaction(event: &Event) -> Option<Interaction> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Interaction::Moved {
            pointer: Pointer::Mouse,
            at: *position,
        }),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Interaction::Released(Pointer::Mouse))
        }
        Event::Touch(touch::Event::FingerMoved { id, position }) => Some(Interaction::Moved {
            pointer: Pointer::Touch(*id),
            at: *position,
        }),
        Event::Touch(
            touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
        ) => Some(Interaction::Released(Pointer::Touch(*id))),
        _ => None,
    }
}

pub fn create_drag_subscription(dragging: bool) -> Subscription<Message> {
    if dragging {
        event::listen_with(|event, _status, _window_id| {
            drag_interaction(&event).map(Message::Slider)
        })
    } else {
        Subscription::none()
    }
}

pub fn create_tick_subscription(
    is_processing: bool,
    has_notifications: bool,
) -> Subscription<Message> {
    if is_processing {
        time::every(SPINNER_TICK).map(Message::Tick)
    } else if has_notifications {
        time::every(NOTIFICATION_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
