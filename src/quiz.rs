// ============================================
// src/quiz.rs
// Multiple-choice quiz: pick a symbol, ask for its Japanese
// romanization among distractors drawn from the rest of the catalog.
// ============================================

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::dataset::Dataset;

/// Options shown per question, correct answer included.
pub const OPTION_COUNT: usize = 4;

/// One quiz round. Replaced wholesale by `next_round`; the only field
/// that ever mutates in place is the submitted answer.
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    symbol: String,
    correct: String,
    options: Vec<String>,
    submitted: Option<String>,
}

impl QuizQuestion {
    /// The glyph being tested. Views resolve it through
    /// `Dataset::lookup` when they need the full record.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The romanization hint of the target record.
    pub fn correct(&self) -> &str {
        &self.correct
    }

    /// Presentation order, already shuffled.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn submitted(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    /// Records an answer. A choice outside `options` is accepted and
    /// will simply grade as incorrect. Submitting again overwrites the
    /// previous choice; there is no lock-in until the round is
    /// discarded.
    pub fn submit(&mut self, choice: &str) {
        self.submitted = Some(choice.to_string());
    }

    /// Exact string comparison against the correct hint. Only defined
    /// once an answer is submitted; the views gate on `is_submitted`.
    pub fn is_correct(&self) -> bool {
        let submitted = self
            .submitted
            .as_deref()
            .expect("question graded before an answer was submitted");
        submitted == self.correct
    }
}

/// Deals a fresh question: one uniformly sampled target plus three
/// distractor hints from other records. Options are de-duplicated by
/// text, so the correct answer never appears twice even though
/// different symbols may share a hint.
pub fn generate_question<R: Rng + ?Sized>(dataset: &Dataset, rng: &mut R) -> QuizQuestion {
    let target = dataset
        .records()
        .choose(rng)
        .expect("dataset is validated non-empty at load");
    let correct = target.roman_hint.clone();

    // Pool is keyed off symbol identity, not hint text.
    let mut pool: Vec<&str> = dataset
        .records()
        .iter()
        .filter(|record| record.symbol != target.symbol)
        .map(|record| record.roman_hint.as_str())
        .collect();
    pool.shuffle(rng);

    let mut options = vec![correct.clone()];
    for hint in pool {
        if options.len() == OPTION_COUNT {
            break;
        }
        if options.iter().all(|option| option != hint) {
            options.push(hint.to_string());
        }
    }
    options.shuffle(rng);

    QuizQuestion {
        symbol: target.symbol.clone(),
        correct,
        options,
        submitted: None,
    }
}

/// Discards the previous round and deals a new one. No history, no
/// repeat-avoidance: the same symbol may come up twice in a row.
pub fn next_round<R: Rng + ?Sized>(
    dataset: &Dataset,
    _previous: QuizQuestion,
    rng: &mut R,
) -> QuizQuestion {
    generate_question(dataset, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(correct: &str, options: &[&str]) -> QuizQuestion {
        QuizQuestion {
            symbol: "ㄇ".to_string(),
            correct: correct.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            submitted: None,
        }
    }

    #[test]
    fn generated_question_is_well_formed() {
        let dataset = Dataset::load().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let q = generate_question(&dataset, &mut rng);
            assert_eq!(q.options().len(), OPTION_COUNT);
            let correct_occurrences = q
                .options()
                .iter()
                .filter(|option| *option == q.correct())
                .count();
            assert_eq!(correct_occurrences, 1);
            let record = dataset.lookup(q.symbol()).unwrap();
            assert_eq!(record.roman_hint, q.correct());
        }
    }

    #[test]
    fn options_never_repeat() {
        let dataset = Dataset::load().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let q = generate_question(&dataset, &mut rng);
            for (i, option) in q.options().iter().enumerate() {
                assert!(!q.options()[i + 1..].contains(option));
            }
        }
    }

    #[test]
    fn grading_matches_exact_text() {
        let mut q = question("ka", &["ka", "sa", "ma", "ha"]);
        assert!(!q.is_submitted());
        q.submit("ka");
        assert!(q.is_submitted());
        assert!(q.is_correct());
        q.submit("sa");
        assert!(!q.is_correct());
    }

    #[test]
    fn out_of_set_choice_grades_incorrect() {
        let mut q = question("ka", &["ka", "sa", "ma", "ha"]);
        q.submit("not an option");
        assert!(q.is_submitted());
        assert!(!q.is_correct());
    }

    #[test]
    #[should_panic(expected = "before an answer was submitted")]
    fn grading_before_submission_panics() {
        let q = question("ka", &["ka", "sa", "ma", "ha"]);
        let _ = q.is_correct();
    }

    #[test]
    fn sampling_the_ma_record_end_to_end() {
        let dataset = Dataset::load().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        // Uniform sampling over 37 records; a few thousand draws will
        // hit ㄇ.
        let mut q = (0..10_000)
            .map(|_| generate_question(&dataset, &mut rng))
            .find(|q| q.symbol() == "ㄇ")
            .expect("ㄇ never sampled");
        assert_eq!(q.correct(), "ma");
        q.submit("ma");
        assert!(q.is_correct());
        let wrong = q
            .options()
            .iter()
            .find(|option| *option != "ma")
            .unwrap()
            .clone();
        q.submit(&wrong);
        assert!(!q.is_correct());
    }

    #[test]
    fn next_round_replaces_the_question() {
        let dataset = Dataset::load().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut q = generate_question(&dataset, &mut rng);
        let first = q.options()[0].clone();
        q.submit(&first);
        let q = next_round(&dataset, q, &mut rng);
        // Fresh state; the sampled symbol is allowed to repeat.
        assert!(!q.is_submitted());
        assert!(dataset.lookup(q.symbol()).is_some());
    }
}
