// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::removal::{RemovalResult, RemovedImage};
use crate::session::{DownloadTarget, FileCandidate, Ticket};
use crate::ui::notifications;
use crate::ui::widgets::Interaction;
use std::path::PathBuf;
use std::time::Instant;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open the native file picker.
    OpenFileDialog,
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// A picked or dropped file finished reading.
    FileLoaded {
        path: PathBuf,
        result: Result<FileCandidate, Error>,
    },
    InstructionChanged(String),
    /// "Magic Remove" or "Redo".
    Process,
    ProcessingFinished {
        ticket: Ticket,
        result: RemovalResult<RemovedImage>,
    },
    /// Back to the upload screen.
    Reset,
    Download,
    /// The save dialog closed; `path` is `None` when cancelled.
    SaveDialogResult {
        path: Option<PathBuf>,
        target: DownloadTarget,
    },
    DownloadWritten {
        path: PathBuf,
        result: Result<(), Error>,
    },
    DismissError,
    Slider(Interaction),
    Notification(notifications::NotificationMessage),
    /// Periodic tick for the spinner and toast expiry.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to preselect on startup.
    pub file_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `WATERMARK_REMOVER_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
