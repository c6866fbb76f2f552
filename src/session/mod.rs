// SPDX-License-Identifier: MPL-2.0
//! Upload and processing session.
//!
//! [`Session`] owns everything the main screen shows: the selected image,
//! the processing phase, the processed result, the instruction text and the
//! error banner. It holds no UI handles beyond image handles and performs no
//! I/O itself; the application shell drives remote calls through
//! [`Session::begin_processing`] and [`Session::finish_processing`].
//!
//! # Phases
//!
//! ```text
//!          select_file            begin_processing
//!   Idle ─────────────► Idle ─────────────────────► Processing
//!    ▲                   ▲                             │
//!    │ reset             │ select_file   finish(ok)    │ finish(err)
//!    │                   │          ┌──────────────────┴──────┐
//!    └───────────────────┴──────── Complete                Error
//! ```
//!
//! Every processing run gets a [`Ticket`]; completions carrying a ticket
//! other than the current one are dropped. This keeps a late answer from
//! overwriting a session that was reset or given a new image meanwhile.

pub mod selection;

pub use selection::{
    mime_for_name, read_dimensions, FileCandidate, ResultImage, SelectedImage,
    IMAGE_EXTENSIONS,
};

use crate::config::{DOWNLOAD_PREFIX, FALLBACK_FILE_NAME};
use crate::i18n::fluent::I18n;
use crate::removal::{RemovalRequest, RemovalResult, RemovedImage, WatermarkRemover};
use std::sync::Arc;
use thiserror::Error;

/// Public view of the processing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Processing,
    Complete,
    Error,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Processing {
        ticket: Ticket,
    },
    Complete(ResultImage),
    Error,
}

/// Identifies one processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Message shown above the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// The selected file does not declare an image type.
    InvalidInput,
    /// The removal service failed. Carries its message when it had one.
    ProcessingFailed(Option<String>),
}

impl Banner {
    /// Resolves the text to display.
    #[must_use]
    pub fn text(&self, i18n: &I18n) -> String {
        match self {
            Banner::InvalidInput => i18n.tr("error-invalid-image"),
            Banner::ProcessingFailed(Some(message)) => message.clone(),
            Banner::ProcessingFailed(None) => i18n.tr("error-processing-generic"),
        }
    }
}

/// Rejections from [`Session::select_file`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{name} is not an image (declared type: {})", .mime_type.as_deref().unwrap_or("none"))]
    InvalidInput {
        name: String,
        mime_type: Option<String>,
    },
}

/// A processed image ready to be written to disk.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    pub file_name: String,
    pub bytes: Arc<Vec<u8>>,
}

/// Returns the suggested file name for a processed image.
#[must_use]
pub fn download_file_name(original: &str) -> String {
    let name = original.trim();
    let name = if name.is_empty() {
        FALLBACK_FILE_NAME
    } else {
        name
    };
    format!("{DOWNLOAD_PREFIX}{name}")
}

#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    selected: Option<SelectedImage>,
    banner: Option<Banner>,
    instruction: String,
    default_instruction: String,
    next_ticket: u64,
}

impl Session {
    /// Creates an idle session whose instruction starts at, and resets to,
    /// `default_instruction`.
    #[must_use]
    pub fn new(default_instruction: impl Into<String>) -> Self {
        let default_instruction = default_instruction.into();
        Self {
            phase: Phase::Idle,
            selected: None,
            banner: None,
            instruction: default_instruction.clone(),
            default_instruction,
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Processing { .. } => SessionState::Processing,
            Phase::Complete(_) => SessionState::Complete,
            Phase::Error => SessionState::Error,
        }
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Processing { .. })
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    /// The processed image. Only present while the session is complete.
    #[must_use]
    pub fn result(&self) -> Option<&ResultImage> {
        match &self.phase {
            Phase::Complete(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// The ticket of the run in flight, if any.
    #[must_use]
    pub fn current_ticket(&self) -> Option<Ticket> {
        match self.phase {
            Phase::Processing { ticket } => Some(ticket),
            _ => None,
        }
    }

    /// Accepts a file when it declares an image type.
    ///
    /// On success the previous result and banner are discarded and the
    /// session returns to idle. On rejection only the banner changes.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidInput`] when the declared type is not
    /// `image/*`.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Result<(), SessionError> {
        let mime_type = match candidate.mime_type.clone() {
            Some(mime) if candidate.is_image() => mime,
            _ => {
                tracing::info!(
                    name = %candidate.name,
                    mime_type = ?candidate.mime_type,
                    "rejected non-image selection"
                );
                self.banner = Some(Banner::InvalidInput);
                return Err(SessionError::InvalidInput {
                    name: candidate.name,
                    mime_type: candidate.mime_type,
                });
            }
        };

        if self.is_processing() {
            tracing::debug!("new selection supersedes the run in flight");
        }

        let selected = SelectedImage::from_candidate(candidate, mime_type);
        tracing::info!(
            name = %selected.name(),
            mime_type = %selected.mime_type(),
            bytes = selected.bytes().len(),
            "image selected"
        );
        self.selected = Some(selected);
        self.banner = None;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Replaces the instruction text. Ignored while processing.
    ///
    /// Returns whether the text was applied.
    pub fn set_instruction(&mut self, text: impl Into<String>) -> bool {
        if self.is_processing() {
            return false;
        }
        self.instruction = text.into();
        true
    }

    /// Starts a processing run.
    ///
    /// Returns `None` when nothing is selected or a run is already in
    /// flight. Otherwise clears the banner and any previous result, and
    /// returns the ticket for [`Session::finish_processing`] together with
    /// the request to send.
    pub fn begin_processing(&mut self) -> Option<(Ticket, RemovalRequest)> {
        if self.is_processing() {
            return None;
        }
        let selected = self.selected.as_ref()?;

        let ticket = Ticket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);

        let request = RemovalRequest {
            bytes: Arc::clone(selected.bytes()),
            mime_type: selected.mime_type().to_string(),
            instruction: self.instruction.clone(),
        };

        self.banner = None;
        self.phase = Phase::Processing { ticket };
        tracing::info!(ticket = ticket.0, name = %selected.name(), "processing started");
        Some((ticket, request))
    }

    /// Applies the outcome of a processing run.
    ///
    /// Returns `false`, leaving the session untouched, when `ticket` does
    /// not belong to the run in flight.
    pub fn finish_processing(
        &mut self,
        ticket: Ticket,
        outcome: RemovalResult<RemovedImage>,
    ) -> bool {
        if self.current_ticket() != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "dropping stale processing result");
            return false;
        }

        match outcome {
            Ok(removed) => {
                let result = ResultImage::from(removed);
                tracing::info!(
                    ticket = ticket.0,
                    mime_type = %result.mime_type(),
                    bytes = result.bytes().len(),
                    "processing complete"
                );
                self.banner = None;
                self.phase = Phase::Complete(result);
            }
            Err(err) => {
                tracing::warn!(ticket = ticket.0, error = %err, "processing failed");
                self.banner = Some(Banner::ProcessingFailed(err.user_message()));
                self.phase = Phase::Error;
            }
        }
        true
    }

    /// Runs a complete processing cycle against `remover`.
    ///
    /// Does nothing when [`Session::begin_processing`] would refuse.
    pub async fn process(&mut self, remover: &dyn WatermarkRemover) -> SessionState {
        let Some((ticket, request)) = self.begin_processing() else {
            return self.state();
        };
        let outcome = remover.remove(request).await;
        self.finish_processing(ticket, outcome);
        self.state()
    }

    /// Returns to the initial state: no image, no result, no banner, and
    /// the default instruction. A run in flight is orphaned.
    pub fn reset(&mut self) {
        tracing::info!("session reset");
        self.phase = Phase::Idle;
        self.selected = None;
        self.banner = None;
        self.instruction = self.default_instruction.clone();
    }

    /// Clears the banner without touching anything else.
    pub fn dismiss_error(&mut self) {
        self.banner = None;
    }

    /// Returns the processed image and its suggested file name.
    ///
    /// `None` unless the session is complete.
    #[must_use]
    pub fn download(&self) -> Option<DownloadTarget> {
        let result = self.result()?;
        let original = self
            .selected
            .as_ref()
            .map_or(FALLBACK_FILE_NAME, SelectedImage::name);
        Some(DownloadTarget {
            file_name: download_file_name(original),
            bytes: Arc::clone(result.bytes()),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_INSTRUCTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DEFAULT_INSTRUCTION};
    use crate::removal::RemovalError;
    use futures_util::future::{self, BoxFuture, FutureExt};
    use std::sync::Mutex;

    /// Answers every request with a fixed outcome and records what it saw.
    struct FixedRemover {
        outcome: RemovalResult<RemovedImage>,
        seen: Mutex<Vec<RemovalRequest>>,
    }

    impl FixedRemover {
        fn new(outcome: RemovalResult<RemovedImage>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl WatermarkRemover for FixedRemover {
        fn remove(
            &self,
            request: RemovalRequest,
        ) -> BoxFuture<'static, RemovalResult<RemovedImage>> {
            self.seen.lock().unwrap().push(request);
            future::ready(self.outcome.clone()).boxed()
        }
    }

    fn image_candidate(name: &str) -> FileCandidate {
        FileCandidate::from_named_bytes(name, vec![1, 2, 3])
    }

    fn cleaned() -> RemovedImage {
        RemovedImage {
            bytes: vec![9, 9, 9],
            mime_type: "image/png".to_string(),
        }
    }

    fn english() -> I18n {
        let config = Config::default();
        I18n::new(Some("en-US".to_string()), &config)
    }

    #[test]
    fn declared_type_decides_acceptance() {
        let mut session = Session::default();
        let custom = FileCandidate::new("scan", Some("image/x-custom".to_string()), vec![0]);
        assert!(session.select_file(custom).is_ok());
        assert_eq!(
            session.selected().map(SelectedImage::mime_type),
            Some("image/x-custom")
        );

        let untyped = FileCandidate::new("scan.png", None, vec![0]);
        assert!(session.select_file(untyped).is_err());
        assert_eq!(session.banner(), Some(&Banner::InvalidInput));
        assert_eq!(session.selected().map(SelectedImage::name), Some("scan"));
    }

    #[test]
    fn new_session_is_idle_with_default_instruction() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.selected().is_none());
        assert!(session.result().is_none());
        assert!(session.banner().is_none());
        assert_eq!(session.instruction(), DEFAULT_INSTRUCTION);
    }

    #[test]
    fn selecting_non_image_keeps_state_and_sets_banner() {
        let mut session = Session::default();
        let result = session.select_file(FileCandidate::from_named_bytes("notes.txt", vec![]));

        assert_eq!(
            result,
            Err(SessionError::InvalidInput {
                name: "notes.txt".to_string(),
                mime_type: Some("text/plain".to_string()),
            })
        );
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.selected().is_none());
        assert_eq!(session.banner(), Some(&Banner::InvalidInput));
        assert_eq!(
            session.banner().map(|b| b.text(&english())).as_deref(),
            Some("Please upload a valid image file (JPG, PNG, WEBP).")
        );
    }

    #[test]
    fn rejected_selection_keeps_previous_image() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let _ = session.select_file(FileCandidate::new("clip", None, vec![]));

        assert_eq!(session.selected().map(SelectedImage::name), Some("photo.png"));
        assert_eq!(session.banner(), Some(&Banner::InvalidInput));
    }

    #[test]
    fn valid_selection_clears_banner_and_result() {
        let mut session = Session::default();
        session.select_file(image_candidate("a.png")).unwrap();
        let (ticket, _) = session.begin_processing().unwrap();
        session.finish_processing(ticket, Ok(cleaned()));
        let _ = session.select_file(image_candidate("bad.txt"));
        assert!(session.banner().is_some());

        session.select_file(image_candidate("b.jpg")).unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
        assert!(session.banner().is_none());
        let selected = session.selected().unwrap();
        assert_eq!(selected.name(), "b.jpg");
        assert_eq!(selected.mime_type(), "image/jpeg");
    }

    #[test]
    fn begin_processing_requires_a_selection() {
        let mut session = Session::default();
        assert!(session.begin_processing().is_none());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn begin_processing_builds_request_from_selection_and_instruction() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.webp")).unwrap();
        session.set_instruction("Remove the date stamp");

        let (_, request) = session.begin_processing().unwrap();

        assert_eq!(session.state(), SessionState::Processing);
        assert_eq!(request.bytes.as_slice(), &[1, 2, 3]);
        assert_eq!(request.mime_type, "image/webp");
        assert_eq!(request.instruction, "Remove the date stamp");
    }

    #[test]
    fn begin_processing_is_refused_while_in_flight() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        assert!(session.begin_processing().is_some());
        assert!(session.begin_processing().is_none());
    }

    #[test]
    fn instruction_is_frozen_while_processing() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        session.set_instruction("first");
        session.begin_processing().unwrap();

        assert!(!session.set_instruction("second"));
        assert_eq!(session.instruction(), "first");
    }

    #[test]
    fn service_message_is_shown_verbatim() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let (ticket, _) = session.begin_processing().unwrap();

        session.finish_processing(
            ticket,
            Err(RemovalError::Api {
                status: 429,
                message: Some("quota exceeded".to_string()),
            }),
        );

        assert_eq!(session.state(), SessionState::Error);
        assert!(session.result().is_none());
        assert_eq!(
            session.banner().map(|b| b.text(&english())).as_deref(),
            Some("quota exceeded")
        );
    }

    #[test]
    fn failure_without_message_uses_generic_text() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let (ticket, _) = session.begin_processing().unwrap();

        session.finish_processing(
            ticket,
            Err(RemovalError::MalformedResponse("missing candidates".into())),
        );

        assert_eq!(session.banner(), Some(&Banner::ProcessingFailed(None)));
        assert_eq!(
            session.banner().map(|b| b.text(&english())).as_deref(),
            Some("An unexpected error occurred while processing the image.")
        );
    }

    #[test]
    fn stale_ticket_is_ignored_after_reset() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let (ticket, _) = session.begin_processing().unwrap();
        session.reset();

        assert!(!session.finish_processing(ticket, Ok(cleaned())));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn stale_ticket_is_ignored_after_new_run() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let (first, _) = session.begin_processing().unwrap();
        session.select_file(image_candidate("other.png")).unwrap();
        let (second, _) = session.begin_processing().unwrap();

        assert_ne!(first, second);
        assert!(!session.finish_processing(
            first,
            Err(RemovalError::Transport("late".into()))
        ));
        assert_eq!(session.state(), SessionState::Processing);

        assert!(session.finish_processing(second, Ok(cleaned())));
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[test]
    fn redo_discards_previous_result() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let (ticket, _) = session.begin_processing().unwrap();
        session.finish_processing(ticket, Ok(cleaned()));
        assert!(session.result().is_some());

        session.begin_processing().unwrap();

        assert!(session.result().is_none());
        assert!(session.download().is_none());
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut session = Session::new("custom default");
        session.select_file(image_candidate("photo.png")).unwrap();
        session.set_instruction("edited");
        let (ticket, _) = session.begin_processing().unwrap();
        session.finish_processing(ticket, Err(RemovalError::MissingApiKey));

        session.reset();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.selected().is_none());
        assert!(session.result().is_none());
        assert!(session.banner().is_none());
        assert_eq!(session.instruction(), "custom default");
    }

    #[test]
    fn dismiss_error_only_clears_banner() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let (ticket, _) = session.begin_processing().unwrap();
        session.finish_processing(ticket, Err(RemovalError::MissingApiKey));

        session.dismiss_error();

        assert!(session.banner().is_none());
        assert_eq!(session.state(), SessionState::Error);
        assert!(session.selected().is_some());
    }

    #[test]
    fn download_uses_cleaned_prefix() {
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();
        let (ticket, _) = session.begin_processing().unwrap();
        session.finish_processing(ticket, Ok(cleaned()));

        let target = session.download().unwrap();
        assert_eq!(target.file_name, "cleaned-photo.png");
        assert_eq!(target.bytes.as_slice(), &[9, 9, 9]);
    }

    #[test]
    fn download_requires_a_result() {
        let mut session = Session::default();
        assert!(session.download().is_none());
        session.select_file(image_candidate("photo.png")).unwrap();
        assert!(session.download().is_none());
    }

    #[test]
    fn download_file_name_falls_back_for_blank_names() {
        assert_eq!(download_file_name("x.jpg"), "cleaned-x.jpg");
        assert_eq!(download_file_name("  "), "cleaned-image");
    }

    #[tokio::test]
    async fn process_success_reaches_complete() {
        let remover = FixedRemover::new(Ok(cleaned()));
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();

        let state = session.process(&remover).await;

        assert_eq!(state, SessionState::Complete);
        assert_eq!(session.result().unwrap().bytes().as_slice(), &[9, 9, 9]);
        assert_eq!(remover.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn process_failure_reaches_error() {
        let remover = FixedRemover::new(Err(RemovalError::NoImage {
            model_text: Some("I cannot edit this image.".to_string()),
        }));
        let mut session = Session::default();
        session.select_file(image_candidate("photo.png")).unwrap();

        let state = session.process(&remover).await;

        assert_eq!(state, SessionState::Error);
        assert_eq!(
            session.banner(),
            Some(&Banner::ProcessingFailed(Some(
                "I cannot edit this image.".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn process_without_selection_does_not_call_remover() {
        let remover = FixedRemover::new(Ok(cleaned()));
        let mut session = Session::default();

        let state = session.process(&remover).await;

        assert_eq!(state, SessionState::Idle);
        assert!(remover.seen.lock().unwrap().is_empty());
    }
}
