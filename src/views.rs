// ============================================
// src/views.rs
// Plain-terminal renditions of the four pages, used by the CLI
// subcommands. The full-screen versions live in tui.rs.
// ============================================

use anyhow::bail;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

use crate::dataset::{Category, Dataset, SymbolRecord};
use crate::quiz;

pub const ABOUT_TEXT: &str = "\
Bopomofo Tutor 注音學習工具 🔡

這是一個讓台灣與日本學生都能輕鬆學習注音的互動式工具。
提供 注音卡片、符號總表、小測驗 等功能，幫助學習者快速掌握
注音的發音方式與符號差異。

台湾人と日本人の学習者が、注音（ボポモフォ）を楽しく学べる
インタラクティブなツールです。注音カード・記号一覧・クイズ を
通して、発音の特徴や日本語との違いをわかりやすく理解できます。";

pub fn print_info() {
    println!("{ABOUT_TEXT}");
    println!();
    println!("  {} 注音學習卡片 / 学習カード", style("card ").cyan());
    println!("  {} 注音符號總覽 / 記号一覧", style("table").cyan());
    println!("  {} 小測驗 / ミニクイズ", style("quiz ").cyan());
    println!("  {} 全画面モード / 全螢幕模式", style("tui  ").cyan());
}

/// The overview page: one row per symbol, 1-based index.
pub fn print_table(dataset: &Dataset, filter: Option<Category>) {
    println!(
        "{}  {}  {}  {}  {}",
        style("#").bold(),
        style("注音").bold(),
        style("類別").bold(),
        style("IPA").bold(),
        style("日文羅馬字提示").bold(),
    );
    let mut index = 0;
    for record in dataset.records() {
        if filter.is_some_and(|category| record.category != category) {
            continue;
        }
        index += 1;
        println!(
            "{index:>2}  {}    {}  {:<4}  {}",
            record.symbol,
            record.category.label(),
            record.ipa,
            record.roman_hint,
        );
    }
}

/// One flashcard. With no symbol given, offers a picker over the
/// (filtered) catalog.
pub fn card(
    dataset: &Dataset,
    symbol: Option<&str>,
    filter: Option<Category>,
) -> anyhow::Result<()> {
    let symbol = match symbol {
        Some(symbol) => symbol.to_string(),
        None => {
            let symbols = dataset.symbols(filter);
            let picked = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("選擇注音符號 / 学びたい注音を選んでください")
                .items(&symbols)
                .default(0)
                .interact()?;
            symbols[picked].to_string()
        }
    };
    match dataset.lookup(&symbol) {
        Some(record) => {
            print_card(record);
            Ok(())
        }
        // Not-found is a legitimate outcome of lookup; for the CLI it
        // still means the requested card cannot be shown.
        None => bail!("找不到注音符號 '{symbol}' / 記号 '{symbol}' は見つかりません"),
    }
}

fn print_card(record: &SymbolRecord) {
    println!("注音符號 / 注音記号: {}", style(&record.symbol).bold().cyan());
    println!("  類別 / カテゴリ: {}", record.category.label());
    println!("  IPA: {}", record.ipa);
    println!("  日文羅馬字近似: {}", record.roman_hint);
    println!();
    println!("{}", style("中文說明（繁體）").bold());
    println!("  {}", record.description_zh);
    println!("{}", style("日本語での説明").bold());
    println!("  {}", record.description_ja);
    println!();
    println!("{}", style("例詞 / 例語").bold());
    for example in &record.examples {
        println!(
            "  {}  {}  pinyin: {}",
            example.hanzi, example.bopomofo, example.pinyin
        );
    }
    if record.examples.is_empty() {
        println!("  （這個符號目前尚未設定例詞 / 例語は未登録です）");
    }
}

/// Line-mode quiz: `rounds` questions, immediate grading, score at the
/// end. A round can be skipped early by declining the confirm prompt.
pub fn run_quiz(dataset: &Dataset, rounds: u32) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let mut correct_count = 0u32;
    let mut current = quiz::generate_question(dataset, &mut rng);
    for round in 1..=rounds {
        println!(
            "{} 這個注音符號是 {} / この注音記号は「{}」です",
            style(format!("[{round}/{rounds}]")).bold(),
            style(current.symbol()).bold().cyan(),
            current.symbol(),
        );
        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("它的日文羅馬字近似是？ / 近いローマ字はどれ？")
            .items(current.options())
            .default(0)
            .interact()?;
        let choice = current.options()[picked].clone();
        current.submit(&choice);
        if current.is_correct() {
            correct_count += 1;
            println!("{}", style("🎉 正確！/ 正解です！").green().bold());
        } else {
            println!(
                "{} {}",
                style("❌ 再想想看 / もう一度考えてみてください").red(),
                style(format!("正解: {}", current.correct())).dim(),
            );
        }
        if let Some(record) = dataset.lookup(current.symbol()) {
            let show = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("詳細解說 / 詳しい説明を見る？")
                .default(false)
                .interact()?;
            if show {
                print_card(record);
            }
        }
        println!();
        if round < rounds {
            current = quiz::next_round(dataset, current, &mut rng);
        }
    }
    println!(
        "成績 / スコア: {}",
        style(format!("{correct_count} / {rounds}")).bold()
    );
    Ok(())
}
