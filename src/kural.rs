// ============================================
// src/kural.rs
// クラル（出題データ）の定義と読み込み
// ============================================

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::DatasetError;

/// 組み込みのサンプルデータ (第1章 クラル1〜10、英語とタミル語の訳付き)
const BUILTIN_DATASET: &str = include_str!("../data/aram_sample.json");

/// 1つのクラル（二行詩）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Kural {
    /// データセット内で一意な番号
    pub number: u32,
    /// 原文（タミル語）。元データでは `tamil` というキー名
    #[serde(alias = "tamil")]
    pub text: String,
    /// 言語コード -> 翻訳
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

impl Kural {
    /// 指定言語の翻訳を返す。無ければ英語訳、それも無ければ原文
    pub fn translation(&self, language: Language) -> &str {
        self.translations
            .get(language.code())
            .or_else(|| self.translations.get(Language::En.code()))
            .map(String::as_str)
            .unwrap_or(&self.text)
    }
}

/// 表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Ta,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ta];

    /// 翻訳テーブルのキー
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }

    /// 言語選択プロンプト用の表示名
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ta => "தமிழ்",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Ta,
            Language::Ta => Language::En,
        }
    }
}

/// ティルックラルの三部 (番号の範囲で決まる)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Section {
    /// 徳の部 (1〜380)
    #[default]
    Aram,
    /// 財の部 (381〜1080)
    Porul,
    /// 愛の部 (1081〜1330)
    Inbam,
    All,
}

impl Section {
    pub fn contains(self, number: u32) -> bool {
        match self {
            Section::Aram => (1..=380).contains(&number),
            Section::Porul => (381..=1080).contains(&number),
            Section::Inbam => (1081..=1330).contains(&number),
            Section::All => true,
        }
    }

    /// 指定した部のクラルだけを残す（順序は保つ）
    pub fn filter(self, kurals: Vec<Kural>) -> Vec<Kural> {
        kurals.into_iter().filter(|k| self.contains(k.number)).collect()
    }
}

/// MARK:JSON文字列からクラルの一覧を読み込む
pub fn parse_kurals(json: &str) -> Result<Vec<Kural>, DatasetError> {
    let kurals: Vec<Kural> = serde_json::from_str(json)?;
    validate(&kurals)?;
    Ok(kurals)
}

/// MARK:ファイルからクラルの一覧を読み込む
pub fn load_kurals(path: &Path) -> Result<Vec<Kural>, DatasetError> {
    let json = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let kurals = parse_kurals(&json)?;
    tracing::info!(path = %path.display(), count = kurals.len(), "dataset loaded");
    Ok(kurals)
}

/// 組み込みのサンプルデータ
pub fn builtin_kurals() -> Result<Vec<Kural>, DatasetError> {
    parse_kurals(BUILTIN_DATASET)
}

/// 番号が正の値で、かつ重複していないことを確認する
fn validate(kurals: &[Kural]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(kurals.len());
    for (index, kural) in kurals.iter().enumerate() {
        if kural.number == 0 {
            return Err(DatasetError::InvalidNumber { index });
        }
        if !seen.insert(kural.number) {
            return Err(DatasetError::DuplicateNumber(kural.number));
        }
    }
    Ok(())
}
