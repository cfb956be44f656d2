use std::collections::BTreeSet;

use crate::model::Question;

/// Outcome of grading one submission. At most one of `partial` and
/// `all_selected` is set, and only when `correct` is false on a
/// multi-correct question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeResult {
    pub correct: bool,
    pub partial: bool,
    pub all_selected: bool,
}

/// Grade the selected answer indices against the question definition.
///
/// Single-correct questions reach grading with exactly one selection (the
/// selection UI enforces radio semantics); multi-correct questions are
/// correct only on an exact set match. The "selected everything" miss is
/// classified before partial credit.
pub fn grade(question: &Question, selected: &BTreeSet<usize>) -> GradeResult {
    let correct_indices = question.correct_indices();
    let is_multiple = correct_indices.len() > 1;

    let correct = if is_multiple {
        selected.len() == correct_indices.len() && selected.is_subset(&correct_indices)
    } else {
        selected.len() == 1 && selected.is_subset(&correct_indices)
    };

    let mut result = GradeResult {
        correct,
        ..GradeResult::default()
    };

    if is_multiple && !correct {
        let matched = selected.intersection(&correct_indices).count();
        if selected.len() == question.answers.len()
            && correct_indices.len() < question.answers.len()
        {
            result.all_selected = true;
        } else if matched >= 1 && matched < correct_indices.len() {
            result.partial = true;
        }
    }

    result
}
