// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::{IsTerminal, Result, stdin, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

mod config;
use config::Args;

mod error;

mod kural;
use kural::{Kural, Language};

mod logging;

mod quiz;
use quiz::OPTION_COUNT;

mod session;
use session::{QuizState, Session};

mod strings;
use strings::ui_strings;

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use dialoguer::{Select, theme::ColorfulTheme};

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// アプリ全体の状態を管理する
struct AppState<'a> {
    /// クイズの進行状態
    session: Session<'a>,
    /// 表示言語 (プレイ中でも切り替え可)
    language: Language,
    /// 矢印キーで選んでいる選択肢
    cursor: usize,
}

impl<'a> AppState<'a> {
    fn new(session: Session<'a>, language: Language) -> Self {
        Self {
            session,
            language,
            cursor: 0,
        }
    }

    /// キー入力の処理。終了するなら `false`
    fn handle_key(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return false,
            KeyCode::Tab => self.language = self.language.toggle(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter if self.session.state() == QuizState::Ended => self.restart(),
            KeyCode::Enter => self.answer_option(self.cursor, now),
            KeyCode::Up => self.move_cursor(OPTION_COUNT - 1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Char(c) => {
                if let Some(idx) = option_for_key(c) {
                    self.answer_option(idx, now);
                }
            }
            _ => {}
        }
        true
    }

    /// 予約された「次の問題へ」を実行する
    fn tick(&mut self, now: Instant) {
        if self.session.tick(now) {
            self.cursor = 0;
        }
    }

    /// 表示順で `idx` 番目の選択肢を回答する
    fn answer_option(&mut self, idx: usize, now: Instant) {
        let selected = self
            .session
            .current_question()
            .and_then(|q| q.options.get(idx))
            .map(|k| k.number);
        if let Some(number) = selected {
            if self.session.answer(number, now) {
                self.cursor = idx;
            }
        }
    }

    fn move_cursor(&mut self, step: usize) {
        if self.session.state() == QuizState::InProgress {
            self.cursor = (self.cursor + step) % OPTION_COUNT;
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.cursor = 0;
    }
}

/// '1'〜'4' を選択肢の位置に変換する
fn option_for_key(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d) if (1..=OPTION_COUNT as u32).contains(&d) => Some(d as usize - 1),
        _ => None,
    }
}

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // ログが書けなくてもクイズは続ける
    if let Err(err) = logging::init(&args.log_path()) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let kurals = args.section.filter(load_dataset(&args.data_path(), args.data.is_some())?);
    tracing::info!(section = ?args.section, count = kurals.len(), "kurals available");

    let language = choose_language(args.lang)?;
    let session = Session::new(&kurals, args.session_config());
    let app_state = AppState::new(session, language);

    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = run_app(&mut terminal, app_state);
    restore_terminal(&mut terminal).context("failed to restore terminal")?;
    result.context("quiz loop failed")
}

/// データセットを読み込む (指定ファイル > 既定ファイル > 組み込みデータ)
///
/// `explicit` が真なら `path` はユーザー指定なので、無ければエラーにする。
fn load_dataset(path: &Path, explicit: bool) -> anyhow::Result<Vec<Kural>> {
    if explicit || path.exists() {
        return kural::load_kurals(path)
            .with_context(|| format!("could not load kurals from {}", path.display()));
    }

    tracing::info!(path = %path.display(), "no dataset file, using built-in kurals");
    Ok(kural::builtin_kurals()?)
}

/// 言語が指定されていなければ起動時に選んでもらう
fn choose_language(lang: Option<Language>) -> anyhow::Result<Language> {
    if let Some(lang) = lang {
        return Ok(lang);
    }
    if !stdin().is_terminal() {
        return Ok(Language::default());
    }

    let labels = Language::ALL.map(Language::label);
    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Language / மொழி")
        .items(&labels)
        .default(0)
        .interact()
        .context("language selection cancelled")?;
    Ok(Language::ALL[idx])
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal(_terminal: &mut Terminal<impl Backend>) -> Result<()> {
    stdout().execute(Show)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, mut app_state: AppState) -> Result<()> {
    loop {
        app_state.tick(Instant::now());
        terminal.draw(|f| ui(f, &app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press
                    && !app_state.handle_key(key.code, Instant::now())
                {
                    break;
                }
            }
        }
    }

    tracing::info!(
        score = app_state.session.score(),
        ended = app_state.session.is_ended(),
        "quit"
    );
    Ok(())
}

// --------------------------------------------------
// UI描画
// --------------------------------------------------

fn ui(f: &mut Frame, app_state: &AppState) {
    let s = ui_strings(app_state.language);
    let size = f.area();
    let block = Block::default().borders(Borders::ALL).title(s.quiz_title);
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    match app_state.session.state() {
        QuizState::Loading => draw_loading(f, app_state, inner_area),
        QuizState::Ended => draw_results(f, app_state, inner_area),
        QuizState::InProgress | QuizState::AnswerRevealed => draw_question(f, app_state, inner_area),
    }
}

/// 問題が無いとき (データ不足)
fn draw_loading(f: &mut Frame, app_state: &AppState, area: Rect) {
    let s = ui_strings(app_state.language);
    let text = vec![
        Line::from(s.loading).bold(),
        Line::from(""),
        Line::from(s.not_enough_kurals).style(Style::default().fg(Color::Yellow)),
        Line::from(""),
        Line::from(s.key_help).style(Style::default().fg(Color::DarkGray)),
    ];
    f.render_widget(Paragraph::new(text).centered().wrap(Wrap { trim: true }), area);
}

fn draw_question(f: &mut Frame, app_state: &AppState, area: Rect) {
    let s = ui_strings(app_state.language);
    let session = &app_state.session;
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] 進捗 (N問目 / 全M問)
            Constraint::Length(1), // [1] スコアゲージ
            Constraint::Length(1), // [2] 空白
            Constraint::Length(1), // [3] 問いかけ
            Constraint::Length(3), // [4] クラル本文
            Constraint::Min(4),    // [5] 選択肢
            Constraint::Length(1), // [6] 正誤
            Constraint::Length(1), // [7] キー操作
        ])
        .split(area);

    // 0. 進捗
    let progress = format!(
        "{} {} {} {}",
        s.question,
        session.current_index() + 1,
        s.of,
        session.len()
    );
    f.render_widget(
        Paragraph::new(progress)
            .style(Style::default().fg(Color::Gray).bold())
            .centered(),
        chunks[0],
    );

    // 1. スコアゲージ
    let ratio = if session.is_empty() {
        0.0
    } else {
        session.score() as f64 / session.len() as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(ratio.min(1.0))
        .label(format!("{}: {} / {}", s.your_score, session.score(), session.len()));
    f.render_widget(gauge, chunks[1]);

    // 2. 問いかけとクラル本文
    f.render_widget(Paragraph::new(s.which_kural).centered(), chunks[3]);
    f.render_widget(
        Paragraph::new(question.subject.text.as_str())
            .style(Style::default().fg(Color::White).bold())
            .centered(),
        chunks[4],
    );

    // 3. 選択肢
    let pending = session.pending_selection();
    let mut lines = Vec::new();
    for (i, option) in question.options.iter().enumerate() {
        let style = match pending {
            None if i == app_state.cursor => Style::default().fg(Color::Black).bg(Color::White),
            None => Style::default(),
            Some(_) if option.number == question.correct_answer => {
                Style::default().fg(Color::White).bg(Color::Green)
            }
            Some(selected) if option.number == selected => {
                Style::default().fg(Color::White).bg(Color::Red)
            }
            Some(_) => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), style.bold()),
            Span::styled(option.translation(app_state.language), style.italic()),
        ]));
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[5]);

    // 4. 正誤
    if let Some(correct) = session.last_correct() {
        let (text, color) = if correct {
            (s.correct, Color::Green)
        } else {
            (s.wrong, Color::Red)
        };
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(color).bold())
                .centered(),
            chunks[6],
        );
    }

    f.render_widget(
        Paragraph::new(s.key_help)
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[7],
    );
}

/// 全問終了後のリザルト
fn draw_results(f: &mut Frame, app_state: &AppState, area: Rect) {
    let s = ui_strings(app_state.language);
    let Some(outcome) = app_state.session.outcome() else {
        return;
    };

    let text = vec![
        Line::from(s.quiz_results).style(Style::default().fg(Color::Yellow).bold()),
        Line::from(""),
        Line::from(s.victory_message).style(Style::default().fg(Color::Gray)),
        Line::from(""),
        Line::from(format!("{}: {} / {}", s.your_score, outcome.score, outcome.total)).bold(),
        Line::from(""),
        Line::from(format!("Enter / r: {}", s.play_again)).style(Style::default().fg(Color::Green)),
    ];
    f.render_widget(Paragraph::new(text).centered().wrap(Wrap { trim: true }), area);
}
