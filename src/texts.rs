use serde::Deserialize;

/// A named list of interchangeable strings. A singular string is accepted
/// as a degenerate one-element pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextPool {
    One(String),
    Many(Vec<String>),
}

impl TextPool {
    pub fn items(&self) -> &[String] {
        match self {
            TextPool::One(s) => std::slice::from_ref(s),
            TextPool::Many(v) => v.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TextPool::One(_) => false,
            TextPool::Many(v) => v.is_empty(),
        }
    }
}

/// The interface-text bundle as supplied by the external source.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceTextBundle {
    pub interface: InterfaceTexts,
    pub final_feedback: FinalFeedback,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceTexts {
    pub start_button: String,
    pub confirm_button: String,
    pub next_button: String,
    /// Template with `{current}` and `{total}`.
    pub question_progress: String,
    /// Template with `{correct}` and `{total}`.
    pub final_score: String,
    #[serde(default)]
    pub final_title: Option<String>,
    pub positive_feedback: TextPool,
    pub partial_feedback: TextPool,

    #[serde(default = "default_quiz_line")]
    pub quiz_line: String,
    #[serde(default = "default_multi_notice")]
    pub multi_notice: String,
    #[serde(default = "default_clear_button")]
    pub clear_button: String,
    #[serde(default = "default_wrong_feedback")]
    pub wrong_feedback: String,
    /// Template with `{count}`.
    #[serde(default = "default_all_selected_feedback")]
    pub all_selected_feedback: String,
    #[serde(default = "default_see_result_button")]
    pub see_result_button: String,
    #[serde(default = "default_correct_label_one")]
    pub correct_label_one: String,
    #[serde(default = "default_correct_label_many")]
    pub correct_label_many: String,
    #[serde(default = "default_confirm_single_message")]
    pub confirm_single_message: String,
    #[serde(default = "default_confirm_single_yes")]
    pub confirm_single_yes: String,
    #[serde(default = "default_confirm_single_back")]
    pub confirm_single_back: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalFeedback {
    pub excellent: TextPool,
    pub good: TextPool,
    pub fair: TextPool,
    pub encouragement: TextPool,
}

fn default_quiz_line() -> String {
    "Quiz {number}".to_string()
}

fn default_multi_notice() -> String {
    "There is more than one correct answer.".to_string()
}

fn default_clear_button() -> String {
    "Clear selections".to_string()
}

fn default_wrong_feedback() -> String {
    "That is not the correct answer.".to_string()
}

fn default_all_selected_feedback() -> String {
    "You went all in... but only {count} answers are correct.".to_string()
}

fn default_see_result_button() -> String {
    "How did I do?".to_string()
}

fn default_correct_label_one() -> String {
    "The correct answer:".to_string()
}

fn default_correct_label_many() -> String {
    "The correct answers:".to_string()
}

fn default_confirm_single_message() -> String {
    "This question has more than one correct answer. Submit anyway?".to_string()
}

fn default_confirm_single_yes() -> String {
    "Submit".to_string()
}

fn default_confirm_single_back() -> String {
    "Back to selection".to_string()
}

/// Replace `{key}` placeholders with the matching value. Unknown keys are
/// left verbatim.
pub fn template(text: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        match after.find('}') {
            Some(close) if close > 1 => {
                let key = &after[1..close];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&after[..=close]),
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
