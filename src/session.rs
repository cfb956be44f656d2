//! The session state machine: Opening -> Question/Feedback pairs -> Final.
//! Owns every piece of mutable session state; the TUI translates it to
//! presentation and drives the staged transitions through the scheduler.

use std::collections::BTreeSet;

use crate::grade::{self, GradeResult};
use crate::model::{Question, QuizDefinition};
use crate::picker::ContentPicker;
use crate::texts::{template, InterfaceTextBundle};

const ENCOURAGEMENT_EMOJIS: [&str; 4] = ["🌤️", "✨", "😊", "🌈"];

/// How far the progress fill moves toward its target per animation tick.
const PROGRESS_EASING: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Opening,
    Question,
    Final,
}

/// Phase of the current question. The feedback transition is staged:
/// fading out, then the content swap, then a settle period during which
/// input stays blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Selecting,
    FadingOut,
    Feedback { settled: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// Single selection on a multi-correct question: very likely an
    /// oversight, confirm before grading.
    ConfirmSingle,
    ConfirmQuit,
}

/// Result of a submission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Guard active, empty selection, or wrong phase.
    Ignored,
    /// A confirmation dialog was interposed; nothing was graded.
    NeedsConfirmation,
    /// Grading ran; the fade-out phase has begun.
    Graded,
}

/// Feedback content, prepared at grading time before the fade begins.
#[derive(Debug, Clone)]
pub struct FeedbackView {
    pub banner: String,
    pub positive: bool,
    pub correct_answers: Vec<String>,
    pub explanation: Option<String>,
    pub next_label: String,
    pub is_last: bool,
}

#[derive(Debug, Clone)]
pub struct FinalView {
    pub title: Option<String>,
    pub score_line: String,
    pub percentage: u32,
    pub evaluation: String,
}

#[derive(Debug)]
pub struct SessionState {
    pub quiz: QuizDefinition,
    pub texts: InterfaceTextBundle,
    pub screen: Screen,
    pub current: usize,
    pub score: u32,
    pub selected: BTreeSet<usize>,
    /// Re-entrancy guard: true from grading start until the staged
    /// transition settles. A second submit meanwhile is a no-op.
    pub confirm_in_progress: bool,
    pub phase: Phase,
    pub dialog: Option<Dialog>,
    pub last_grade: Option<GradeResult>,
    pub feedback: Option<FeedbackView>,
    pub final_view: Option<FinalView>,
    /// Displayed progress-fill percentage, eased toward the target so a new
    /// question animates from the previous question's width.
    pub progress_pct: f32,
    pub progress_target: f32,
    pub view_scroll: usize,
    pub cursor: usize,
    pub should_quit: bool,
    picker: ContentPicker,
}

impl SessionState {
    pub fn new(quiz: QuizDefinition, texts: InterfaceTextBundle, picker: ContentPicker) -> Self {
        Self {
            quiz,
            texts,
            screen: Screen::Opening,
            current: 0,
            score: 0,
            selected: BTreeSet::new(),
            confirm_in_progress: false,
            phase: Phase::Selecting,
            dialog: None,
            last_grade: None,
            feedback: None,
            final_view: None,
            progress_pct: 0.0,
            progress_target: 0.0,
            view_scroll: 0,
            cursor: 0,
            should_quit: false,
            picker,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.quiz.questions[self.current]
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.total_questions()
    }

    /// "Series – Quiz N", built from the quiz-line template.
    pub fn full_title(&self) -> String {
        format!("{} – {}", self.quiz.series_title, self.quiz_line())
    }

    pub fn quiz_line(&self) -> String {
        template(
            &self.texts.interface.quiz_line,
            &[("number", self.quiz.quiz_number.to_string())],
        )
    }

    pub fn start(&mut self) {
        self.screen = Screen::Question;
        self.enter_question(0);
    }

    pub fn enter_question(&mut self, index: usize) {
        self.current = index;
        self.selected.clear();
        self.confirm_in_progress = false;
        self.phase = Phase::Selecting;
        self.dialog = None;
        self.last_grade = None;
        self.feedback = None;
        self.cursor = 0;
        self.view_scroll = 0;
        self.progress_target =
            (index + 1) as f32 / self.total_questions() as f32 * 100.0;
    }

    /// Radio semantics for single-correct questions, checkbox semantics for
    /// multi-correct ones. Ignored outside the selection phase.
    pub fn toggle_answer(&mut self, index: usize) {
        if self.phase != Phase::Selecting || self.dialog.is_some() {
            return;
        }
        if index >= self.current_question().answers.len() {
            return;
        }
        if self.current_question().is_multiple() {
            if !self.selected.remove(&index) {
                self.selected.insert(index);
            }
        } else {
            self.selected.clear();
            self.selected.insert(index);
        }
    }

    pub fn clear_selections(&mut self) {
        if self.phase == Phase::Selecting {
            self.selected.clear();
        }
    }

    /// The clear affordance is offered only when more than one option is
    /// currently selected on a multi-correct question.
    pub fn offers_clear(&self) -> bool {
        self.current_question().is_multiple() && self.selected.len() > 1
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Selecting && !self.selected.is_empty() && !self.confirm_in_progress
    }

    /// Submit the current selection. A single selection on a multi-correct
    /// question interposes a confirmation dialog instead of grading.
    pub fn request_submit(&mut self) -> SubmitOutcome {
        if self.confirm_in_progress
            || self.phase != Phase::Selecting
            || self.selected.is_empty()
            || self.dialog.is_some()
        {
            return SubmitOutcome::Ignored;
        }

        if self.current_question().correct_count() > 1 && self.selected.len() == 1 {
            self.dialog = Some(Dialog::ConfirmSingle);
            return SubmitOutcome::NeedsConfirmation;
        }

        self.begin_grading();
        SubmitOutcome::Graded
    }

    /// The user confirmed submitting a single answer to a multi-answer
    /// question.
    pub fn confirm_single_submit(&mut self) -> SubmitOutcome {
        if self.dialog != Some(Dialog::ConfirmSingle) {
            return SubmitOutcome::Ignored;
        }
        self.dialog = None;
        self.begin_grading();
        SubmitOutcome::Graded
    }

    /// "Go back": return to the selection UI with selection and score
    /// untouched.
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    fn begin_grading(&mut self) {
        self.confirm_in_progress = true;

        let result = grade::grade(self.current_question(), &self.selected);
        if result.correct {
            self.score += 1;
        }
        self.last_grade = Some(result);

        // Feedback content is prepared before the fade starts, exactly like
        // the card back being filled while still hidden.
        self.feedback = Some(self.build_feedback(result));
        self.phase = Phase::FadingOut;
    }

    fn build_feedback(&mut self, result: GradeResult) -> FeedbackView {
        let ui = &self.texts.interface;
        let banner;
        if result.correct {
            banner = self
                .picker
                .pick(ui.positive_feedback.items(), Some("positive"));
        } else if result.partial {
            banner = self
                .picker
                .pick(ui.partial_feedback.items(), Some("partial"));
        } else if result.all_selected {
            banner = template(
                &ui.all_selected_feedback,
                &[("count", self.current_question().correct_count().to_string())],
            );
        } else {
            banner = ui.wrong_feedback.clone();
        }

        let correct_answers = self
            .current_question()
            .correct_answer_texts()
            .iter()
            .map(|t| crate::markup::ensure_period(t))
            .collect();

        let is_last = self.is_last_question();
        let ui = &self.texts.interface;
        FeedbackView {
            banner,
            positive: result.correct,
            correct_answers,
            explanation: self.current_question().explanation.clone(),
            next_label: if is_last {
                ui.see_result_button.clone()
            } else {
                ui.next_button.clone()
            },
            is_last,
        }
    }

    /// Phase 2 of the staged transition: swap the selection UI for the
    /// feedback UI while faded out.
    pub fn swap_feedback(&mut self) {
        if self.phase == Phase::FadingOut {
            self.phase = Phase::Feedback { settled: false };
            self.view_scroll = 0;
        }
    }

    /// Phase 3: the fade-in has settled; release the re-entrancy guard.
    pub fn feedback_settled(&mut self) {
        if self.phase == (Phase::Feedback { settled: false }) {
            self.phase = Phase::Feedback { settled: true };
            self.confirm_in_progress = false;
        }
    }

    /// Explicit "next" action from settled feedback.
    pub fn next(&mut self) {
        if self.phase != (Phase::Feedback { settled: true }) {
            return;
        }
        if self.is_last_question() {
            self.enter_final();
        } else {
            let next = self.current + 1;
            self.enter_question(next);
        }
    }

    fn enter_final(&mut self) {
        let total = self.total_questions() as f32;
        let percentage = (self.score as f32 / total * 100.0).round() as u32;

        let (pool, category, encouragement) = if percentage >= 90 {
            (&self.texts.final_feedback.excellent, "final_excellent", false)
        } else if percentage >= 75 {
            (&self.texts.final_feedback.good, "final_good", false)
        } else if percentage >= 60 {
            (&self.texts.final_feedback.fair, "final_fair", false)
        } else {
            (
                &self.texts.final_feedback.encouragement,
                "final_encouragement",
                true,
            )
        };

        let pool = pool.items().to_vec();
        let mut evaluation = self.picker.pick(&pool, Some(category));
        if encouragement && !evaluation.is_empty() {
            let emojis: Vec<String> = ENCOURAGEMENT_EMOJIS
                .iter()
                .map(|e| e.to_string())
                .collect();
            let emoji = self.picker.pick(&emojis, None);
            evaluation = format!("{} {}", evaluation, emoji);
        }

        let score_line = template(
            &self.texts.interface.final_score,
            &[
                ("correct", self.score.to_string()),
                ("total", self.total_questions().to_string()),
            ],
        );

        self.final_view = Some(FinalView {
            title: self.texts.interface.final_title.clone(),
            score_line,
            percentage,
            evaluation,
        });
        self.screen = Screen::Final;
        self.view_scroll = 0;
    }

    pub fn progress_text(&self) -> String {
        template(
            &self.texts.interface.question_progress,
            &[
                ("current", (self.current + 1).to_string()),
                ("total", self.total_questions().to_string()),
            ],
        )
    }

    /// Ease the displayed progress fill toward its target. Called once per
    /// loop tick.
    pub fn tick_progress(&mut self) {
        let diff = self.progress_target - self.progress_pct;
        if diff.abs() < 0.5 {
            self.progress_pct = self.progress_target;
        } else {
            self.progress_pct += diff * PROGRESS_EASING;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.current_question().answers.len() {
            self.cursor += 1;
        }
    }
}
