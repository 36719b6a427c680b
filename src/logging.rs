// src/logging.rs

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// ログ出力（tracing）の初期化
///
/// `RUST_LOG` が無ければ `info` レベル。2 回目以降の呼び出しは何もしない。
pub fn init_tracing() {
    if INITIALISED.set(()).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    if let Err(err) = Registry::default().with(filter).with(fmt_layer).try_init() {
        debug!("tracing subscriber を設定できませんでした: {err}");
    }
}
