// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Each handler translates one kind of message into session operations and,
//! where needed, an asynchronous [`Task`] for dialogs, file I/O or the
//! removal call.

use super::Message;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::removal::{RemovalResult, RemovedImage, SharedRemover};
use crate::session::{
    DownloadTarget, FileCandidate, Session, SessionState, Ticket, IMAGE_EXTENSIONS,
};
use crate::ui::notifications::{self, Notification};
use crate::ui::state::CompareSliderState;
use crate::ui::widgets::{animated_spinner, Interaction};
use iced::task;
use iced::Task;
use std::path::PathBuf;

/// Key prefix of toasts about unreadable files; retired when a file loads.
const FILE_NOTIFICATION_PREFIX: &str = "notification-file-";

/// Mutable view of the application state handed to handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a mut Session,
    pub slider: &'a mut CompareSliderState,
    pub remover: &'a SharedRemover,
    pub processing_task: &'a mut Option<task::Handle>,
    pub dropped_file: &'a mut Option<PathBuf>,
    pub notifications: &'a mut notifications::Manager,
    pub spinner_rotation: &'a mut f32,
}

impl UpdateContext<'_> {
    fn abort_processing(&mut self) {
        if let Some(handle) = self.processing_task.take() {
            tracing::debug!("aborting outstanding removal call");
            handle.abort();
        }
    }
}

pub fn handle_open_file_dialog(ctx: &UpdateContext<'_>) -> Task<Message> {
    let title = ctx.i18n.tr("dialog-open-title");
    let filter = ctx.i18n.tr("dialog-filter-images");

    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .add_filter(filter, IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Reads a picked or dropped file off the UI thread.
pub fn load_file(path: PathBuf) -> Task<Message> {
    tracing::debug!(path = %path.display(), "reading file");
    Task::perform(
        {
            let path = path.clone();
            async move { FileCandidate::read(&path).await }
        },
        move |result| Message::FileLoaded { path, result },
    )
}

/// Loads a dropped file. A multi-file drop delivers one event per file;
/// only the first is read and the rest are ignored until it has loaded.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if let Some(pending) = ctx.dropped_file.as_ref() {
        tracing::debug!(
            pending = %pending.display(),
            ignored = %path.display(),
            "ignoring extra dropped file"
        );
        return Task::none();
    }
    *ctx.dropped_file = Some(path.clone());
    load_file(path)
}

pub fn handle_file_loaded(
    ctx: &mut UpdateContext<'_>,
    path: &std::path::Path,
    result: Result<FileCandidate, Error>,
) -> Task<Message> {
    if ctx.dropped_file.as_deref() == Some(path) {
        *ctx.dropped_file = None;
    }
    match result {
        Ok(candidate) => {
            if ctx.session.select_file(candidate).is_ok() {
                ctx.abort_processing();
                *ctx.slider = CompareSliderState::new();
                ctx.notifications.clear_with_prefix(FILE_NOTIFICATION_PREFIX);
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read file");
            let name = path
                .file_name()
                .map_or_else(
                    || path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
            ctx.notifications.push(
                Notification::error("notification-file-read-error").with_arg("name", name),
            );
        }
    }
    Task::none()
}

pub fn handle_instruction_changed(ctx: &mut UpdateContext<'_>, text: String) -> Task<Message> {
    ctx.session.set_instruction(text);
    Task::none()
}

/// Starts the removal call as an abortable task.
pub fn handle_process(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some((ticket, request)) = ctx.session.begin_processing() else {
        return Task::none();
    };
    *ctx.spinner_rotation = 0.0;

    let (task, handle) = Task::perform(ctx.remover.remove(request), move |result| {
        Message::ProcessingFinished { ticket, result }
    })
    .abortable();
    ctx.abort_processing();
    *ctx.processing_task = Some(handle);
    task
}

pub fn handle_processing_finished(
    ctx: &mut UpdateContext<'_>,
    ticket: Ticket,
    result: RemovalResult<RemovedImage>,
) -> Task<Message> {
    if ctx.session.finish_processing(ticket, result) {
        *ctx.processing_task = None;
        if ctx.session.state() == SessionState::Complete {
            *ctx.slider = CompareSliderState::new();
        }
    }
    Task::none()
}

pub fn handle_reset(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.abort_processing();
    ctx.session.reset();
    *ctx.slider = CompareSliderState::new();
    Task::none()
}

pub fn handle_download(ctx: &UpdateContext<'_>) -> Task<Message> {
    let Some(target) = ctx.session.download() else {
        return Task::none();
    };
    let title = ctx.i18n.tr("dialog-save-title");
    let file_name = target.file_name.clone();

    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .set_file_name(file_name)
                .save_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        move |path| Message::SaveDialogResult { path, target },
    )
}

pub fn handle_save_dialog_result(path: Option<PathBuf>, target: DownloadTarget) -> Task<Message> {
    let Some(path) = path else {
        tracing::debug!("save dialog cancelled");
        return Task::none();
    };

    Task::perform(
        {
            let path = path.clone();
            async move {
                tokio::fs::write(&path, target.bytes.as_slice())
                    .await
                    .map_err(Error::from)
            }
        },
        move |result| Message::DownloadWritten { path, result },
    )
}

pub fn handle_download_written(
    ctx: &mut UpdateContext<'_>,
    path: &std::path::Path,
    result: Result<(), Error>,
) -> Task<Message> {
    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), "processed image saved");
            ctx.notifications.push(
                Notification::success("notification-download-saved")
                    .with_arg("path", path.display().to_string()),
            );
        }
        Err(err) => {
            ctx.notifications.push(
                Notification::error("notification-download-error")
                    .with_arg("reason", err.to_string()),
            );
        }
    }
    Task::none()
}

pub fn handle_slider(ctx: &mut UpdateContext<'_>, interaction: Interaction) -> Task<Message> {
    if ctx.session.result().is_none() {
        return Task::none();
    }
    match interaction {
        Interaction::Grab { pointer, bounds } => ctx.slider.start_drag(pointer, bounds),
        Interaction::Moved { pointer, at } => {
            ctx.slider.pointer_moved(pointer, at);
        }
        Interaction::Released(pointer) => ctx.slider.release(pointer),
    }
    Task::none()
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.notifications.tick();
    if ctx.session.is_processing() {
        *ctx.spinner_rotation = animated_spinner::advance(*ctx.spinner_rotation);
    }
    Task::none()
}
