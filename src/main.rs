// SPDX-License-Identifier: MPL-2.0
use tracing_subscriber::EnvFilter;
use watermark_remover::app::{self, Flags};

const HELP: &str = "\
watermark-remover

USAGE:
  watermark-remover [OPTIONS] [FILE]

OPTIONS:
  --lang <ID>          UI language (e.g. en-US, fr)
  --config-dir <DIR>   Directory holding settings.toml
  -h, --help           Print this help

ENVIRONMENT:
  GEMINI_API_KEY       API key for the removal service (falls back to API_KEY)
  WATERMARK_REMOVER_CONFIG_DIR
                       Directory holding settings.toml
  RUST_LOG             Log filter (default: watermark_remover=info)
";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("watermark_remover=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    init_logging();

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring invalid --lang");
        None
    });
    let config_dir = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring invalid --config-dir");
        None
    });
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    app::run(Flags {
        lang,
        file_path,
        config_dir,
    })
}
