// SPDX-License-Identifier: MPL-2.0
use futures_util::future::{self, BoxFuture, FutureExt};
use std::sync::Mutex;
use tempfile::tempdir;
use watermark_remover::config::{self, Config, GeneralConfig};
use watermark_remover::i18n::fluent::I18n;
use watermark_remover::removal::{
    RemovalError, RemovalRequest, RemovalResult, RemovedImage, WatermarkRemover,
};
use watermark_remover::session::{Banner, FileCandidate, Session, SessionState};
use watermark_remover::ui::state::{CompareSliderState, Pointer};

/// Replays a scripted list of outcomes and records every request.
struct ScriptedRemover {
    outcomes: Mutex<Vec<RemovalResult<RemovedImage>>>,
    requests: Mutex<Vec<RemovalRequest>>,
}

impl ScriptedRemover {
    fn new(mut outcomes: Vec<RemovalResult<RemovedImage>>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl WatermarkRemover for ScriptedRemover {
    fn remove(&self, request: RemovalRequest) -> BoxFuture<'static, RemovalResult<RemovedImage>> {
        self.requests.lock().unwrap().push(request);
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(Err(RemovalError::Transport("script exhausted".into())));
        future::ready(outcome).boxed()
    }
}

fn english() -> I18n {
    I18n::new(Some("en-US".to_string()), &Config::default())
}

fn png() -> RemovedImage {
    RemovedImage {
        bytes: vec![0x89, b'P', b'N', b'G'],
        mime_type: "image/png".to_string(),
    }
}

#[tokio::test]
async fn failed_attempt_then_redo_succeeds() {
    let remover = ScriptedRemover::new(vec![
        Err(RemovalError::Api {
            status: 503,
            message: Some("The model is overloaded. Please try again later.".into()),
        }),
        Ok(png()),
    ]);
    let mut session = Session::default();
    session
        .select_file(FileCandidate::from_named_bytes("beach.jpg", vec![1, 2, 3]))
        .expect("jpg is an image");
    session.set_instruction("Remove the date stamp");

    assert_eq!(session.process(&remover).await, SessionState::Error);
    assert_eq!(
        session.banner().map(|b| b.text(&english())).as_deref(),
        Some("The model is overloaded. Please try again later.")
    );

    assert_eq!(session.process(&remover).await, SessionState::Complete);
    assert!(session.banner().is_none());

    let requests = remover.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| r.mime_type == "image/jpeg" && r.instruction == "Remove the date stamp"));

    let target = session.download().expect("complete session can download");
    assert_eq!(target.file_name, "cleaned-beach.jpg");
    assert_eq!(target.bytes.as_slice(), png().bytes.as_slice());
}

#[tokio::test]
async fn refusal_without_text_uses_generic_message() {
    let remover = ScriptedRemover::new(vec![Err(RemovalError::NoImage { model_text: None })]);
    let mut session = Session::default();
    session
        .select_file(FileCandidate::from_named_bytes("a.webp", vec![0]))
        .expect("webp is an image");

    session.process(&remover).await;

    assert_eq!(session.banner(), Some(&Banner::ProcessingFailed(None)));
    assert_eq!(
        session.banner().map(|b| b.text(&english())).as_deref(),
        Some("An unexpected error occurred while processing the image.")
    );
}

#[test]
fn non_image_file_is_rejected_with_localized_banner() {
    let mut session = Session::default();
    assert!(session
        .select_file(FileCandidate::from_named_bytes("report.pdf", vec![0]))
        .is_err());

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.selected().is_none());

    let french = I18n::new(Some("fr".to_string()), &Config::default());
    let text = session.banner().map(|b| b.text(&french)).unwrap_or_default();
    assert!(!text.is_empty());
    assert!(!text.starts_with("MISSING"));
}

#[test]
fn slider_ignores_second_finger() {
    use iced::{touch::Finger, Point, Rectangle};

    let bounds = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 500.0,
    };
    let mut slider = CompareSliderState::new();
    slider.start_drag(Pointer::Touch(Finger(1)), bounds);

    assert!(slider
        .pointer_moved(Pointer::Touch(Finger(2)), Point::new(100.0, 250.0))
        .is_none());
    let moved = slider.pointer_moved(Pointer::Touch(Finger(1)), Point::new(900.0, 250.0));
    assert!(moved.is_some_and(|p| (p.value() - 90.0).abs() < 1e-4));

    slider.release(Pointer::Touch(Finger(1)));
    assert!(!slider.is_dragging());
}

#[test]
fn language_follows_saved_config() {
    let dir = tempdir().expect("failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    for language in ["en-US", "fr"] {
        let config = Config {
            general: GeneralConfig {
                language: Some(language.to_string()),
                ..GeneralConfig::default()
            },
            ..Config::default()
        };
        config::save_to_path(&config, &path).expect("failed to write config");
        let loaded = config::load_from_path(&path).expect("failed to load config");
        let i18n = I18n::new(None, &loaded);
        assert_eq!(i18n.current_locale().to_string(), language);
    }
}

#[test]
fn configured_instruction_seeds_the_session() {
    let dir = tempdir().expect("failed to create temporary directory");
    std::fs::write(
        dir.path().join("settings.toml"),
        "[processing]\ninstruction = \"Remove the logo only\"\n",
    )
    .expect("failed to write config");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let mut session = Session::new(config.processing.default_instruction());
    assert_eq!(session.instruction(), "Remove the logo only");
    session.set_instruction("something else");
    session.reset();
    assert_eq!(session.instruction(), "Remove the logo only");
}
