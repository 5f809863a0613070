// ============================================
// src/session.rs
// クイズ1ラウンド分の進行状態 (状態遷移)
// ============================================

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::kural::Kural;
use crate::quiz::{self, Question};

/// 回答後、次の問題に進むまでの表示時間
pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// ラウンドの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub round_size: usize,
    pub reveal_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_size: quiz::ROUND_SIZE,
            reveal_delay: REVEAL_DELAY,
        }
    }
}

/// 画面側が描画に使う状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// 問題がまだ無い (データ不足の場合はずっとこのまま)
    Loading,
    /// 回答待ち
    InProgress,
    /// 回答済みで、正誤を表示中
    AnswerRevealed,
    /// 全問終了
    Ended,
}

/// 終了時の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub score: usize,
    pub total: usize,
}

/// 1ラウンドの進行状態
///
/// 状態を変えるのは `start` / `restart` / `answer` / `tick` / `advance` だけ。
/// 時刻は呼び出し側から渡すので、テストでは任意の `Instant` で遅延を再現できる。
#[derive(Debug)]
pub struct Session<'a> {
    records: &'a [Kural],
    config: SessionConfig,
    rng: StdRng,

    questions: Vec<Question<'a>>,
    current_index: usize,
    score: usize,
    /// 今の問題で選ばれたクラル番号
    pending_selection: Option<u32>,
    /// 直前の回答が正解だったか (フィードバック表示用)
    last_correct: Option<bool>,
    ended: bool,
    /// 次の問題へ進む予定時刻
    advance_at: Option<Instant>,
}

impl<'a> Session<'a> {
    /// OSの乱数で初期化し、最初のラウンドを開始する
    pub fn new(records: &'a [Kural], config: SessionConfig) -> Self {
        Self::with_rng(records, config, StdRng::from_os_rng())
    }

    /// 乱数生成器を指定して初期化する (テスト用に固定シードを渡せる)
    pub fn with_rng(records: &'a [Kural], config: SessionConfig, rng: StdRng) -> Self {
        let mut session = Self {
            records,
            config,
            rng,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            pending_selection: None,
            last_correct: None,
            ended: false,
            advance_at: None,
        };
        session.start();
        session
    }

    /// MARK:問題を作り直し、カウンタをすべてリセットする
    pub fn start(&mut self) {
        self.questions = quiz::generate_questions(self.records, self.config.round_size, &mut self.rng);
        self.current_index = 0;
        self.score = 0;
        self.pending_selection = None;
        self.last_correct = None;
        self.ended = false;
        self.advance_at = None;

        if self.questions.is_empty() {
            tracing::warn!(records = self.records.len(), "quiz cannot start");
        } else {
            tracing::info!(questions = self.questions.len(), "round started");
        }
    }

    /// もう一度遊ぶ (どの状態からでも可)
    pub fn restart(&mut self) {
        tracing::debug!(state = ?self.state(), index = self.current_index, "restart requested");
        self.start();
    }

    /// MARK:回答する
    ///
    /// 回答待ちのときだけ受け付ける。正誤表示中の連打や終了後の入力は無視する。
    /// 受け付けた場合は `true` を返し、`now + reveal_delay` に次へ進む予約をする。
    pub fn answer(&mut self, selected: u32, now: Instant) -> bool {
        if self.state() != QuizState::InProgress {
            tracing::trace!(selected, "answer ignored");
            return false;
        }

        let correct = self.questions[self.current_index].is_correct(selected);
        self.pending_selection = Some(selected);
        self.last_correct = Some(correct);
        if correct {
            self.score += 1;
        }
        self.advance_at = Some(now + self.config.reveal_delay);

        tracing::debug!(
            index = self.current_index,
            selected,
            correct,
            score = self.score,
            "answered"
        );
        true
    }

    /// 予約時刻を過ぎていれば次へ進む。進んだら `true`
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.advance_at {
            Some(at) if now >= at => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// MARK:次の問題へ進む (最後の問題なら終了)
    pub fn advance(&mut self) {
        self.advance_at = None;
        if self.state() != QuizState::AnswerRevealed {
            return;
        }

        self.pending_selection = None;
        self.last_correct = None;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        } else {
            self.current_index = self.questions.len();
            self.ended = true;
            tracing::info!(score = self.score, total = self.questions.len(), "round ended");
        }
    }

    pub fn state(&self) -> QuizState {
        if self.questions.is_empty() {
            QuizState::Loading
        } else if self.ended {
            QuizState::Ended
        } else if self.pending_selection.is_some() {
            QuizState::AnswerRevealed
        } else {
            QuizState::InProgress
        }
    }

    /// 現在の問題 (読み込み中・終了後は `None`)
    pub fn current_question(&self) -> Option<&Question<'a>> {
        if self.ended {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn pending_selection(&self) -> Option<u32> {
        self.pending_selection
    }

    pub fn last_correct(&self) -> Option<bool> {
        self.last_correct
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// このラウンドの問題数
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 終了していれば結果を返す
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.ended.then_some(RoundOutcome {
            score: self.score,
            total: self.questions.len(),
        })
    }
}
