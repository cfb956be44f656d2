use std::collections::BTreeSet;

use serde::Deserialize;

/// A quiz document as supplied by the external source. Immutable for the
/// whole session; field names follow the wire format.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizDefinition {
    pub series_title: String,
    pub quiz_number: u32,
    #[serde(default)]
    pub quiz_title: Option<String>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    /// Prompt text, markup-processed for display.
    #[serde(rename = "question")]
    pub text: String,
    /// Opaque image locator, resolved relative to the quiz file.
    #[serde(default)]
    pub image: Option<String>,
    /// Optional markup text shown after grading.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Order defines on-screen position and the stable selection index.
    pub answers: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
}

impl Question {
    pub fn correct_indices(&self) -> BTreeSet<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.correct)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    pub fn is_multiple(&self) -> bool {
        self.correct_count() > 1
    }

    pub fn has_image(&self) -> bool {
        self.image.as_deref().map_or(false, |s| !s.is_empty())
    }

    pub fn correct_answer_texts(&self) -> Vec<&str> {
        self.answers
            .iter()
            .filter(|a| a.correct)
            .map(|a| a.text.as_str())
            .collect()
    }
}
