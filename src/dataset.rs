// ============================================
// src/dataset.rs
// The static bopomofo symbol catalog, loaded from the bundled
// JSON table and validated once at startup.
// ============================================

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// Full symbol table shipped inside the binary.
const DATASET_JSON: &str = include_str!("../data/bopomofo.json");

/// Which slot of a syllable a symbol occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Initial,
    Medial,
    Final,
}

impl Category {
    /// Bilingual label used by every view (zh-TW first, as in the UI).
    pub fn label(self) -> &'static str {
        match self {
            Category::Initial => "聲母 / 声母 (Initial)",
            Category::Medial => "介音 / 介音 (Medial)",
            Category::Final => "韻母 / 韻母 (Final)",
        }
    }
}

/// One example word: 漢字 + its bopomofo spelling + pinyin.
#[derive(Debug, Clone, Deserialize)]
pub struct Example {
    pub hanzi: String,
    pub bopomofo: String,
    pub pinyin: String,
}

/// One phonetic symbol with everything the views need to teach it.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolRecord {
    /// The bopomofo glyph, unique across the dataset.
    pub symbol: String,
    pub category: Category,
    /// IPA transcription, display only.
    pub ipa: String,
    /// Approximate Japanese-romanization gloss; doubles as the quiz
    /// answer text. Not unique across records.
    pub roman_hint: String,
    pub description_zh: String,
    pub description_ja: String,
    #[serde(default)]
    pub examples: Vec<Example>,
}

#[derive(Debug)]
pub enum LoadError {
    Parse(serde_json::Error),
    Empty,
    DuplicateSymbol(String),
    IncompleteExample(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse(err) => write!(f, "malformed dataset: {err}"),
            LoadError::Empty => write!(f, "dataset contains no records"),
            LoadError::DuplicateSymbol(symbol) => {
                write!(f, "symbol '{symbol}' appears more than once")
            }
            LoadError::IncompleteExample(symbol) => {
                write!(f, "symbol '{symbol}' has an example with empty fields")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Immutable catalog of all symbols, in declaration order. Declaration
/// order groups phonetically related symbols, so it is never sorted.
pub struct Dataset {
    records: Vec<SymbolRecord>,
}

impl Dataset {
    /// Loads the bundled table. Called once at startup; the result is
    /// shared by reference everywhere else.
    pub fn load() -> Result<Self, LoadError> {
        Self::from_json(DATASET_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let records: Vec<SymbolRecord> = serde_json::from_str(json).map_err(LoadError::Parse)?;
        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.symbol.as_str()) {
                return Err(LoadError::DuplicateSymbol(record.symbol.clone()));
            }
            for example in &record.examples {
                if example.hanzi.is_empty()
                    || example.bopomofo.is_empty()
                    || example.pinyin.is_empty()
                {
                    return Err(LoadError::IncompleteExample(record.symbol.clone()));
                }
            }
        }
        Ok(Self { records })
    }

    /// Exact-match lookup by glyph. `None` is a legitimate outcome (the
    /// caller may pass through user input), not an error.
    pub fn lookup(&self, symbol: &str) -> Option<&SymbolRecord> {
        self.records.iter().find(|record| record.symbol == symbol)
    }

    /// Symbol keys in declaration order, optionally restricted to one
    /// category. `None` means all categories.
    pub fn symbols(&self, filter: Option<Category>) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| filter.is_none_or(|category| record.category == category))
            .map(|record| record.symbol.as_str())
            .collect()
    }

    /// All records in declaration order.
    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_loads() {
        let dataset = Dataset::load().unwrap();
        assert!(dataset.len() >= 4);
    }

    #[test]
    fn symbols_are_unique() {
        let dataset = Dataset::load().unwrap();
        let mut seen = HashSet::new();
        for record in dataset.records() {
            assert!(seen.insert(record.symbol.as_str()), "duplicate {}", record.symbol);
        }
    }

    #[test]
    fn category_filters_partition_the_catalog() {
        let dataset = Dataset::load().unwrap();
        let all: HashSet<&str> = dataset.symbols(None).into_iter().collect();
        let mut union = HashSet::new();
        for category in [Category::Initial, Category::Medial, Category::Final] {
            for symbol in dataset.symbols(Some(category)) {
                assert_eq!(dataset.lookup(symbol).unwrap().category, category);
                union.insert(symbol);
            }
        }
        assert_eq!(all, union);
    }

    #[test]
    fn filtered_symbols_keep_declaration_order() {
        let dataset = Dataset::load().unwrap();
        let finals = dataset.symbols(Some(Category::Final));
        let in_order: Vec<&str> = dataset
            .records()
            .iter()
            .filter(|record| record.category == Category::Final)
            .map(|record| record.symbol.as_str())
            .collect();
        assert_eq!(finals, in_order);
    }

    #[test]
    fn lookup_finds_known_symbol() {
        let dataset = Dataset::load().unwrap();
        let record = dataset.lookup("ㄅ").unwrap();
        assert_eq!(record.ipa, "p");
        assert_eq!(record.category, Category::Initial);
    }

    #[test]
    fn lookup_misses_unknown_symbol() {
        let dataset = Dataset::load().unwrap();
        assert!(dataset.lookup("ん").is_none());
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let json = r#"[
            {"symbol": "ㄅ", "category": "initial", "ipa": "p", "roman_hint": "pa",
             "description_zh": "x", "description_ja": "y"},
            {"symbol": "ㄅ", "category": "initial", "ipa": "p", "roman_hint": "pa",
             "description_zh": "x", "description_ja": "y"}
        ]"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(LoadError::DuplicateSymbol(symbol)) if symbol == "ㄅ"
        ));
    }

    #[test]
    fn rejects_empty_dataset() {
        assert!(matches!(Dataset::from_json("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn rejects_partial_example() {
        let json = r#"[
            {"symbol": "ㄇ", "category": "initial", "ipa": "m", "roman_hint": "ma",
             "description_zh": "x", "description_ja": "y",
             "examples": [{"hanzi": "媽", "bopomofo": "", "pinyin": "mā"}]}
        ]"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(LoadError::IncompleteExample(symbol)) if symbol == "ㄇ"
        ));
    }
}
