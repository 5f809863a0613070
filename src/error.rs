// ============================================
// src/error.rs
// データセット読み込み時のエラー型
// ============================================

use std::path::PathBuf;

use thiserror::Error;

/// クラルのデータセットを読み込むときのエラー
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("failed to read dataset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("kural number must be positive (record #{index})")]
    InvalidNumber { index: usize },
    #[error("kural number {0} appears more than once")]
    DuplicateNumber(u32),
}
