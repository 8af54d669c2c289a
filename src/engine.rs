//! Multiple-choice test generation and scoring.
//!
//! The option list shown for a flashcard is never persisted. Instead, the
//! option ordering is a deterministic function of the flashcard id: both
//! generation and scoring seed an [`StdRng`] with the id and replay the same
//! distractor-selection and shuffle sequence. As long as the category's
//! flashcard pool is unchanged between generate and submit, scoring
//! reconstructs exactly the options the client saw. If cards are added or
//! removed in between, the reconstruction diverges silently; callers keep
//! the pool immutable after seed load.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::db::models::FlashcardRow;
use crate::models::{TestAnswer, TestAnswerDetail, TestQuestion};

pub const DISTRACTORS_PER_QUESTION: usize = 3;

/// Text reported for a selected index that resolves to no option.
const NO_ANSWER: &str = "No answer";

fn option_rng(flashcard_id: i32) -> StdRng {
    StdRng::seed_from_u64(flashcard_id as u64)
}

/// Derive the shuffled option list for `card` and the index of its true
/// answer. `pool` is the full flashcard set of the card's category; pools
/// smaller than four cards yield fewer than four options.
pub fn build_options(card: &FlashcardRow, pool: &[FlashcardRow]) -> (Vec<String>, usize) {
    let mut rng = option_rng(card.id);

    let candidates: Vec<&FlashcardRow> = pool.iter().filter(|c| c.id != card.id).collect();

    let mut options = vec![card.answer.clone()];
    options.extend(
        candidates
            .choose_multiple(&mut rng, DISTRACTORS_PER_QUESTION)
            .map(|c| c.answer.clone()),
    );
    options.shuffle(&mut rng);

    // First occurrence wins if a distractor happens to share the answer text.
    let correct_index = options.iter().position(|o| *o == card.answer).unwrap_or(0);

    (options, correct_index)
}

/// Generate one question per flashcard in `pool`.
pub fn generate_test(pool: &[FlashcardRow]) -> Vec<TestQuestion> {
    pool.iter()
        .map(|card| {
            let (options, correct_option_index) = build_options(card, pool);
            TestQuestion {
                flashcard_id: card.id,
                question: card.question.clone(),
                options,
                correct_option_index,
            }
        })
        .collect()
}

/// Score submitted answers against options re-derived from `pool`.
/// Answers referencing unknown flashcard ids are skipped silently.
/// Returns the correct count and the per-question details.
pub fn score_test(answers: &[TestAnswer], pool: &[FlashcardRow]) -> (i32, Vec<TestAnswerDetail>) {
    let mut correct_count = 0;
    let mut details = Vec::with_capacity(answers.len());

    for answer in answers {
        let Some(card) = pool.iter().find(|c| c.id == answer.flashcard_id) else {
            continue;
        };

        let (options, correct_index) = build_options(card, pool);

        let selected = usize::try_from(answer.selected_option_index).ok();
        let is_correct = selected == Some(correct_index);
        if is_correct {
            correct_count += 1;
        }

        let user_answer = selected
            .and_then(|i| options.get(i))
            .cloned()
            .unwrap_or_else(|| NO_ANSWER.to_string());

        details.push(TestAnswerDetail {
            flashcard_id: card.id,
            question: card.question.clone(),
            correct_answer: card.answer.clone(),
            user_answer,
            is_correct,
        });
    }

    (correct_count, details)
}

/// Score as a percentage rounded to two decimal places. An empty
/// submission scores 0.00 rather than dividing by zero.
pub fn percentage(correct: i32, total: i32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}
