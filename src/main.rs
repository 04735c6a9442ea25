// ============================================
// src/main.rs
// CLI entry point. With no subcommand the full-screen tutor starts;
// each page is also reachable as a plain-terminal subcommand.
// ============================================

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

mod dataset;
mod quiz;
mod tui;
mod views;

use dataset::{Category, Dataset};

#[derive(Parser)]
#[command(name = "bopomofo-tutor", version, about = "注音學習工具 / ボポモフォ学習ツール")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Full-screen tutor with all four pages (default)
    Tui,
    /// What this tool is, in Chinese and Japanese
    Info,
    /// Flashcard for one symbol; picks interactively when none is given
    Card {
        /// Bopomofo glyph, e.g. ㄅ
        symbol: Option<String>,
        #[arg(short, long, value_enum, default_value = "all")]
        category: FilterArg,
    },
    /// Overview table of every symbol
    Table {
        #[arg(short, long, value_enum, default_value = "all")]
        category: FilterArg,
    },
    /// Multiple-choice quiz in the terminal
    Quiz {
        /// How many questions to ask
        #[arg(short, long, default_value_t = 5)]
        rounds: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Initial,
    Medial,
    Final,
}

impl FilterArg {
    fn category(self) -> Option<Category> {
        match self {
            FilterArg::All => None,
            FilterArg::Initial => Some(Category::Initial),
            FilterArg::Medial => Some(Category::Medial),
            FilterArg::Final => Some(Category::Final),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dataset = Dataset::load().context("failed to load the bundled bopomofo dataset")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => tui::run(&dataset),
        Command::Info => {
            views::print_info();
            Ok(())
        }
        Command::Card { symbol, category } => {
            views::card(&dataset, symbol.as_deref(), category.category())
        }
        Command::Table { category } => {
            views::print_table(&dataset, category.category());
            Ok(())
        }
        Command::Quiz { rounds } => views::run_quiz(&dataset, rounds),
    }
}
