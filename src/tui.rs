// ============================================
// src/tui.rs
// Full-screen tutor: four pages (info, cards, table, quiz) behind a
// tab bar. All page state lives in App; the dataset is borrowed
// read-only for the whole run.
// ============================================

use std::io::stdout;
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::{
    prelude::*,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
};

use rand::rngs::ThreadRng;

use crate::dataset::{Category, Dataset, SymbolRecord};
use crate::quiz::{self, QuizQuestion};
use crate::views::ABOUT_TEXT;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Info,
    Cards,
    Overview,
    Quiz,
}

const PAGES: [Page; 4] = [Page::Info, Page::Cards, Page::Overview, Page::Quiz];

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Info => "📖 認識 / について",
            Page::Cards => "🔤 卡片 / カード",
            Page::Overview => "📋 總覽 / 一覧",
            Page::Quiz => "📝 測驗 / クイズ",
        }
    }

    fn index(self) -> usize {
        PAGES.iter().position(|page| *page == self).unwrap_or(0)
    }
}

struct App<'a> {
    dataset: &'a Dataset,
    rng: ThreadRng,
    page: Page,

    // Cards page
    filter: Option<Category>,
    card_index: usize,

    // Overview page
    table_offset: usize,

    // Quiz page
    question: QuizQuestion,
    option_cursor: usize,
}

impl<'a> App<'a> {
    fn new(dataset: &'a Dataset) -> Self {
        let mut rng = rand::rng();
        let question = quiz::generate_question(dataset, &mut rng);
        Self {
            dataset,
            rng,
            page: Page::Info,
            filter: None,
            card_index: 0,
            table_offset: 0,
            question,
            option_cursor: 0,
        }
    }

    fn visible_symbols(&self) -> Vec<&'a str> {
        self.dataset.symbols(self.filter)
    }

    fn selected_record(&self) -> Option<&'a SymbolRecord> {
        let symbols = self.visible_symbols();
        symbols
            .get(self.card_index)
            .and_then(|symbol| self.dataset.lookup(symbol))
    }

    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(Category::Initial),
            Some(Category::Initial) => Some(Category::Medial),
            Some(Category::Medial) => Some(Category::Final),
            Some(Category::Final) => None,
        };
        self.card_index = 0;
    }

    fn deal_next_question(&mut self) {
        // The previous round is discarded wholesale.
        self.question = quiz::generate_question(self.dataset, &mut self.rng);
        self.option_cursor = 0;
    }

    fn submit_current(&mut self) {
        let choice = self.question.options()[self.option_cursor].clone();
        self.question.submit(&choice);
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => return false,
            KeyCode::Tab => {
                self.page = PAGES[(self.page.index() + 1) % PAGES.len()];
            }
            KeyCode::BackTab => {
                self.page = PAGES[(self.page.index() + PAGES.len() - 1) % PAGES.len()];
            }
            KeyCode::Char('1') => self.page = Page::Info,
            KeyCode::Char('2') => self.page = Page::Cards,
            KeyCode::Char('3') => self.page = Page::Overview,
            KeyCode::Char('4') => self.page = Page::Quiz,
            key => match self.page {
                Page::Info => {}
                Page::Cards => match key {
                    KeyCode::Up => self.card_index = self.card_index.saturating_sub(1),
                    KeyCode::Down => {
                        let count = self.visible_symbols().len();
                        if self.card_index + 1 < count {
                            self.card_index += 1;
                        }
                    }
                    KeyCode::Char('f') => self.cycle_filter(),
                    _ => {}
                },
                Page::Overview => match key {
                    KeyCode::Up => self.table_offset = self.table_offset.saturating_sub(1),
                    KeyCode::Down => {
                        if self.table_offset + 1 < self.dataset.len() {
                            self.table_offset += 1;
                        }
                    }
                    _ => {}
                },
                Page::Quiz => match key {
                    KeyCode::Up => self.option_cursor = self.option_cursor.saturating_sub(1),
                    KeyCode::Down => {
                        if self.option_cursor + 1 < self.question.options().len() {
                            self.option_cursor += 1;
                        }
                    }
                    KeyCode::Enter => self.submit_current(),
                    KeyCode::Char('n') => self.deal_next_question(),
                    _ => {}
                },
            },
        }
        true
    }
}

pub fn run(dataset: &Dataset) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, dataset);
    restore_terminal()?;
    result
}

fn setup_terminal() -> anyhow::Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(Hide)?;
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> anyhow::Result<()> {
    stdout().execute(Show)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, dataset: &Dataset) -> anyhow::Result<()> {
    let mut app = App::new(dataset);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press && !app.handle_key(key.code) {
                    break;
                }
            }
        }
    }

    Ok(())
}

// --------------------------------------------------
// Rendering
// --------------------------------------------------

fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Bopomofo Tutor 🔡");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] tab bar
            Constraint::Min(1),    // [1] page body
            Constraint::Length(1), // [2] key help
        ])
        .split(inner_area);

    let tabs = Tabs::new(PAGES.iter().map(|page| page.title()).collect::<Vec<_>>())
        .select(app.page.index())
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .divider("│");
    f.render_widget(tabs, chunks[0]);

    match app.page {
        Page::Info => draw_info(f, chunks[1]),
        Page::Cards => draw_cards(f, app, chunks[1]),
        Page::Overview => draw_overview(f, app, chunks[1]),
        Page::Quiz => draw_quiz(f, app, chunks[1]),
    }

    let help = match app.page {
        Page::Info => "Tab/1-4: 頁面 / ページ   Esc: 離開 / 終了",
        Page::Cards => "↑↓: 選符號   f: 類別篩選 / カテゴリ切替   Esc: 離開",
        Page::Overview => "↑↓: 捲動 / スクロール   Esc: 離開",
        Page::Quiz => "↑↓: 選答案   Enter: 送出 / 送信   n: 下一題 / 次へ   Esc: 離開",
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn draw_info(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(ABOUT_TEXT).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_cards(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1)])
        .split(area);

    let filter_label = match app.filter {
        None => "全部 / すべて",
        Some(Category::Initial) => "聲母 / 声母",
        Some(Category::Medial) => "介音 / 介音",
        Some(Category::Final) => "韻母 / 韻母",
    };
    let list_block = Block::default()
        .borders(Borders::RIGHT)
        .title(filter_label);
    let list_area = list_block.inner(chunks[0]);
    f.render_widget(list_block, chunks[0]);

    // Keep the selection visible when the list outgrows the pane.
    let symbols = app.visible_symbols();
    let height = list_area.height as usize;
    let skip = if height == 0 {
        0
    } else {
        app.card_index.saturating_sub(height.saturating_sub(1))
    };
    let lines: Vec<Line> = symbols
        .iter()
        .enumerate()
        .skip(skip)
        .take(height.max(1))
        .map(|(i, symbol)| {
            let style = if i == app.card_index {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {symbol} "), style))
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list_area);

    let Some(record) = app.selected_record() else {
        return;
    };
    let mut lines = vec![
        Line::from(vec![
            Span::raw("注音符號: "),
            Span::styled(
                record.symbol.clone(),
                Style::default().fg(Color::Cyan).bold(),
            ),
        ]),
        Line::from(format!("類別 / カテゴリ: {}", record.category.label())),
        Line::from(format!("IPA: {}", record.ipa)),
        Line::from(format!("日文羅馬字近似: {}", record.roman_hint)),
        Line::from(""),
        Line::from(Span::styled("中文說明（繁體）", Style::default().bold())),
        Line::from(record.description_zh.clone()),
        Line::from(""),
        Line::from(Span::styled("日本語での説明", Style::default().bold())),
        Line::from(record.description_ja.clone()),
        Line::from(""),
        Line::from(Span::styled("例詞 / 例語", Style::default().bold())),
    ];
    for example in &record.examples {
        lines.push(Line::from(format!(
            "  {}  {}  pinyin: {}",
            example.hanzi, example.bopomofo, example.pinyin
        )));
    }
    if record.examples.is_empty() {
        lines.push(Line::from(Span::styled(
            "  （尚未設定例詞 / 例語は未登録です）",
            Style::default().fg(Color::DarkGray),
        )));
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        chunks[1],
    );
}

fn draw_overview(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["#", "注音", "類別 / カテゴリ", "IPA", "日文羅馬字提示"])
        .style(Style::default().bold().fg(Color::Cyan));
    let rows: Vec<Row> = app
        .dataset
        .records()
        .iter()
        .enumerate()
        .skip(app.table_offset)
        .map(|(i, record)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(record.symbol.clone()),
                Cell::from(record.category.label()),
                Cell::from(record.ipa.clone()),
                Cell::from(record.roman_hint.clone()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(24),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header);
    f.render_widget(table, area);
}

fn draw_quiz(f: &mut Frame, app: &App, area: Rect) {
    let question = &app.question;
    let mut lines = vec![
        Line::from(vec![
            Span::raw("這個注音符號是 "),
            Span::styled(
                question.symbol().to_string(),
                Style::default().fg(Color::Cyan).bold(),
            ),
            Span::raw(format!(" / この注音記号は「{}」です", question.symbol())),
        ]),
        Line::from("它的日文羅馬字近似是？ / 近いローマ字はどれですか？"),
        Line::from(""),
    ];

    for (i, option) in question.options().iter().enumerate() {
        let marker = if i == app.option_cursor { "▶ " } else { "  " };
        let mut style = Style::default();
        if question.is_submitted() {
            if option == question.correct() {
                style = style.fg(Color::Green).bold();
            } else if question.submitted() == Some(option.as_str()) {
                style = style.fg(Color::Red);
            }
        }
        if i == app.option_cursor {
            style = style.bg(Color::DarkGray);
        }
        lines.push(Line::from(Span::styled(
            format!("{marker}[{}] {option}", i + 1),
            style,
        )));
    }
    lines.push(Line::from(""));

    if question.is_submitted() {
        if question.is_correct() {
            lines.push(Line::from(Span::styled(
                "🎉 正確！/ 正解です！",
                Style::default().fg(Color::Green).bold(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "❌ 再想想看 / もう一度考えてみてください",
                Style::default().fg(Color::Red),
            )));
        }
        if let Some(record) = app.dataset.lookup(question.symbol()) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "📘 詳細解說 / 詳しい説明",
                Style::default().bold(),
            )));
            lines.push(Line::from(format!(
                "類別: {}   IPA: {}   正確答案: {}",
                record.category.label(),
                record.ipa,
                record.roman_hint
            )));
            lines.push(Line::from(record.description_zh.clone()));
            lines.push(Line::from(record.description_ja.clone()));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
