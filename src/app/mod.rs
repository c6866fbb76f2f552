// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` struct wires the upload/processing session, the comparison
//! slider, localization and toasts together, and turns messages into
//! session operations plus asynchronous tasks (dialogs, file I/O, the
//! removal call).

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use subscription::drag_interaction;

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::removal::{GeminiRemover, SharedRemover};
use crate::session::Session;
use crate::ui::notifications::{self, Notification};
use crate::ui::state::CompareSliderState;
use crate::ui::theming::ThemeMode;
use iced::{task, window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub struct App {
    pub i18n: I18n,
    session: Session,
    slider: CompareSliderState,
    remover: SharedRemover,
    /// Handle of the removal call in flight, used to abort it.
    processing_task: Option<task::Handle>,
    /// Dropped file being read; further drops wait for it.
    dropped_file: Option<PathBuf>,
    theme_mode: ThemeMode,
    notifications: notifications::Manager,
    spinner_rotation: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("state", &self.session.state())
            .field("selected", &self.session.selected().map(|s| s.name()))
            .field("dragging", &self.slider.is_dragging())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 1100.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 720.0;
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        icon: crate::icon::load_window_icon(),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; flags are consumed on the first call
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        let remover: SharedRemover = Arc::new(GeminiRemover::from_config(&config.processing));
        Self::with_remover(&config, None, remover)
    }
}

impl App {
    /// Builds the application state around an explicit removal service.
    pub fn with_remover(config: &Config, lang: Option<String>, remover: SharedRemover) -> Self {
        Self {
            i18n: I18n::new(lang, config),
            session: Session::new(config.processing.default_instruction()),
            slider: CompareSliderState::new(),
            remover,
            processing_task: None,
            dropped_file: None,
            theme_mode: config.general.theme_mode,
            notifications: notifications::Manager::new(),
            spinner_rotation: 0.0,
        }
    }

    /// Loads settings, builds the production removal service and optionally
    /// starts reading the file given on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir.clone());
        let (config, config_warning) = config::load();

        let remover = GeminiRemover::from_config(&config.processing);
        if !remover.has_api_key() {
            tracing::warn!("no API key configured; processing will fail until one is set");
        }
        tracing::info!(endpoint = %config.processing.endpoint, model = %config.processing.model, "removal service configured");

        let mut app = Self::with_remover(&config, flags.lang, Arc::new(remover));
        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let task = match flags.file_path {
            Some(path) => update::load_file(PathBuf::from(path)),
            None => Task::none(),
        };
        (app, task)
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn slider(&self) -> &CompareSliderState {
        &self.slider
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("app-title");
        match self.session.selected() {
            Some(selected) => format!("{} - {app_name}", selected.name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_drag_subscription(self.slider.is_dragging()),
            subscription::create_tick_subscription(
                self.session.is_processing(),
                self.notifications.has_notifications(),
            ),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            session: &mut self.session,
            slider: &mut self.slider,
            remover: &self.remover,
            processing_task: &mut self.processing_task,
            dropped_file: &mut self.dropped_file,
            notifications: &mut self.notifications,
            spinner_rotation: &mut self.spinner_rotation,
        };

        match message {
            Message::OpenFileDialog => update::handle_open_file_dialog(&ctx),
            Message::OpenFileDialogResult(path) => path.map_or_else(Task::none, update::load_file),
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::FileLoaded { path, result } => {
                update::handle_file_loaded(&mut ctx, &path, result)
            }
            Message::InstructionChanged(text) => update::handle_instruction_changed(&mut ctx, text),
            Message::Process => update::handle_process(&mut ctx),
            Message::ProcessingFinished { ticket, result } => {
                update::handle_processing_finished(&mut ctx, ticket, result)
            }
            Message::Reset => update::handle_reset(&mut ctx),
            Message::Download => update::handle_download(&ctx),
            Message::SaveDialogResult { path, target } => {
                update::handle_save_dialog_result(path, target)
            }
            Message::DownloadWritten { path, result } => {
                update::handle_download_written(&mut ctx, &path, result)
            }
            Message::DismissError => {
                ctx.session.dismiss_error();
                Task::none()
            }
            Message::Slider(interaction) => update::handle_slider(&mut ctx, interaction),
            Message::Notification(message) => {
                ctx.notifications.handle_message(&message);
                Task::none()
            }
            Message::Tick(_) => update::handle_tick(&mut ctx),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            session: &self.session,
            slider: &self.slider,
            notifications: &self.notifications,
            spinner_rotation: self.spinner_rotation,
        })
    }
}
