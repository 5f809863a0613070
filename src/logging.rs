// ============================================
// src/logging.rs
// ログ出力の初期化 (画面はTUIが使うのでファイルへ書く)
// ============================================

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ログレベルを指定する環境変数 (無ければ RUST_LOG)
const LOG_ENV: &str = "KURAL_QUIZ_LOG";

pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = open_log_file(path)?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(layer)
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}

/// ログファイルを追記モードで開く (親ディレクトリが無ければ作る)
fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("quiz.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_location_is_an_error() {
        // 親が通常ファイルなのでディレクトリを作れない
        let file = NamedTempFile::new().unwrap();
        let path = file.path().join("quiz.log");
        assert!(open_log_file(&path).is_err());
        assert!(init(&path).is_err());
    }
}
