// ============================================
// src/config.rs
// コマンドライン引数と既定のファイルパス
// ============================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use directories::ProjectDirs;

use crate::kural::{Language, Section};
use crate::quiz::ROUND_SIZE;
use crate::session::{REVEAL_DELAY, SessionConfig};

const DATA_FILE: &str = "kurals.json";
const LOG_FILE: &str = "kural-quiz.log";

/// ティルックラルの四択クイズ
#[derive(Debug, Parser)]
#[command(name = "kural-quiz", version, about)]
pub struct Args {
    /// クラルのデータセット (JSON)。省略時はデータディレクトリの kurals.json、無ければ組み込みデータ
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// 表示言語。省略時は起動時に選択する
    #[arg(long, value_enum)]
    pub lang: Option<Language>,

    /// 出題する部
    #[arg(long, value_enum, default_value_t = Section::Aram)]
    pub section: Section,

    /// 1ラウンドの問題数
    #[arg(long, default_value_t = ROUND_SIZE, value_parser = parse_round_size)]
    pub round_size: usize,

    /// 回答後、次の問題に進むまでの時間 (ミリ秒)
    #[arg(long, default_value_t = REVEAL_DELAY.as_millis() as u64)]
    pub reveal_ms: u64,

    /// ログの出力先
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            round_size: self.round_size,
            reveal_delay: Duration::from_millis(self.reveal_ms),
        }
    }

    /// 明示されたデータファイル、無ければ既定の場所
    pub fn data_path(&self) -> PathBuf {
        self.data.clone().unwrap_or_else(|| data_dir().join(DATA_FILE))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| data_dir().join(LOG_FILE))
    }
}

fn parse_round_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("round size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

// MARK:データディレクトリのパスを取得する (ディレクトリの作成はファイルを開く側で行う)
fn data_dir() -> PathBuf {
    ProjectDirs::from("org", "kural-quiz", "KURAL_QUIZ")
        .map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
