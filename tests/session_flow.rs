use std::time::{Duration, Instant};

use quizdance::model::QuizDefinition;
use quizdance::picker::ContentPicker;
use quizdance::sched::{self, Scheduler, Task};
use quizdance::session::{Dialog, Phase, Screen, SessionState, SubmitOutcome};
use quizdance::texts::InterfaceTextBundle;

const EXCELLENT_POOL: [&str; 2] = ["Outstanding!", "A perfect run!"];
const ENCOURAGEMENT: &str = "Keep trying.";

fn quiz() -> QuizDefinition {
    serde_json::from_str(
        r#"{
            "series_title": "Series",
            "quiz_number": 1,
            "questions": [
                {
                    "question": "Pick the right one",
                    "answers": [
                        { "text": "right", "correct": true },
                        { "text": "wrong one", "correct": false },
                        { "text": "also wrong", "correct": false }
                    ]
                },
                {
                    "question": "Pick both right ones",
                    "explanation": "Because reasons.",
                    "answers": [
                        { "text": "{{first right}}", "correct": true },
                        { "text": "a decoy", "correct": false },
                        { "text": "{{second right}}", "correct": true }
                    ]
                }
            ]
        }"#,
    )
    .unwrap()
}

fn texts() -> InterfaceTextBundle {
    serde_json::from_str(
        r#"{
            "interface": {
                "start_button": "Start",
                "confirm_button": "Confirm",
                "next_button": "Next",
                "question_progress": "Question {current} of {total}",
                "final_score": "{correct} of {total}",
                "positive_feedback": ["Great!", "Sweet!"],
                "partial_feedback": ["Almost..."]
            },
            "final_feedback": {
                "excellent": ["Outstanding!", "A perfect run!"],
                "good": ["Good."],
                "fair": ["Fair."],
                "encouragement": ["Keep trying."]
            }
        }"#,
    )
    .unwrap()
}

fn session() -> SessionState {
    SessionState::new(quiz(), texts(), ContentPicker::from_seed(7))
}

/// Drive the staged transition to its settled end, the way the scheduler
/// does at +260ms and +600ms.
fn complete_transition(s: &mut SessionState) {
    s.swap_feedback();
    s.feedback_settled();
}

#[test]
fn test_perfect_run_reaches_excellent_tier() {
    let mut s = session();
    assert_eq!(s.screen, Screen::Opening);

    s.start();
    assert_eq!(s.screen, Screen::Question);
    assert_eq!(s.current, 0);
    assert_eq!(s.phase, Phase::Selecting);

    // Q1: single-correct, answered correctly.
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    assert_eq!(s.phase, Phase::FadingOut);
    assert!(s.confirm_in_progress);
    assert_eq!(s.score, 1);
    complete_transition(&mut s);
    assert_eq!(s.phase, Phase::Feedback { settled: true });
    assert!(!s.confirm_in_progress);

    s.next();
    assert_eq!(s.current, 1);
    assert!(s.selected.is_empty());

    // Q2: multi-correct, exact correct set.
    s.toggle_answer(0);
    s.toggle_answer(2);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    assert_eq!(s.score, 2);
    complete_transition(&mut s);
    s.next();

    assert_eq!(s.screen, Screen::Final);
    let view = s.final_view.as_ref().unwrap();
    assert_eq!(view.percentage, 100);
    assert!(EXCELLENT_POOL.contains(&view.evaluation.as_str()));
    assert_eq!(view.score_line, "2 of 2");
}

#[test]
fn test_wrong_then_partial_run_scores_zero() {
    let mut s = session();
    s.start();

    // Q1 wrong.
    s.toggle_answer(1);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    assert_eq!(s.score, 0);
    let g = s.last_grade.unwrap();
    assert!(!g.correct && !g.partial && !g.all_selected);
    complete_transition(&mut s);
    s.next();

    // Q2: only one of two correct answers selected; the single-selection
    // confirmation interposes first.
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::NeedsConfirmation);
    assert_eq!(s.dialog, Some(Dialog::ConfirmSingle));
    assert_eq!(s.score, 0);

    assert_eq!(s.confirm_single_submit(), SubmitOutcome::Graded);
    let g = s.last_grade.unwrap();
    assert!(g.partial);
    assert_eq!(s.score, 0);
    complete_transition(&mut s);
    s.next();

    let view = s.final_view.as_ref().unwrap();
    assert_eq!(view.percentage, 0);
    assert!(
        view.evaluation.starts_with(ENCOURAGEMENT),
        "encouragement tier expected, got {:?}",
        view.evaluation
    );
    // The encouragement tier gets a softening emoji appended.
    assert!(view.evaluation.len() > ENCOURAGEMENT.len());
}

#[test]
fn test_going_back_leaves_state_untouched() {
    let mut s = session();
    s.start();
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    complete_transition(&mut s);
    s.next();

    s.toggle_answer(2);
    assert_eq!(s.request_submit(), SubmitOutcome::NeedsConfirmation);

    let score_before = s.score;
    s.cancel_dialog();
    assert_eq!(s.dialog, None);
    assert_eq!(s.phase, Phase::Selecting);
    assert_eq!(s.score, score_before);
    assert!(s.selected.contains(&2));
    assert_eq!(s.selected.len(), 1);

    // Selection continues where it left off.
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    assert_eq!(s.score, score_before + 1);
}

#[test]
fn test_double_submission_is_ignored() {
    let mut s = session();
    s.start();
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    assert_eq!(s.score, 1);

    // Mid-transition: guarded.
    assert_eq!(s.request_submit(), SubmitOutcome::Ignored);
    s.swap_feedback();
    assert_eq!(s.request_submit(), SubmitOutcome::Ignored);
    s.feedback_settled();
    assert_eq!(s.request_submit(), SubmitOutcome::Ignored);
    assert_eq!(s.score, 1);
}

#[test]
fn test_empty_selection_cannot_submit() {
    let mut s = session();
    s.start();
    assert!(!s.can_submit());
    assert_eq!(s.request_submit(), SubmitOutcome::Ignored);
    assert_eq!(s.phase, Phase::Selecting);
}

#[test]
fn test_radio_semantics_for_single_correct() {
    let mut s = session();
    s.start();
    s.toggle_answer(0);
    s.toggle_answer(1);
    assert_eq!(s.selected.iter().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_checkbox_semantics_and_clear_affordance() {
    let mut s = session();
    s.start();
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    complete_transition(&mut s);
    s.next();

    s.toggle_answer(0);
    assert!(!s.offers_clear());
    s.toggle_answer(1);
    assert!(s.offers_clear());

    // Toggling off again.
    s.toggle_answer(1);
    assert!(!s.offers_clear());
    assert_eq!(s.selected.len(), 1);

    s.toggle_answer(1);
    s.clear_selections();
    assert!(s.selected.is_empty());
    assert!(!s.can_submit());
}

#[test]
fn test_feedback_view_content() {
    let mut s = session();
    s.start();
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    complete_transition(&mut s);
    s.next();

    s.toggle_answer(0);
    s.toggle_answer(2);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);

    let fb = s.feedback.as_ref().unwrap();
    assert!(fb.positive);
    // Terminal punctuation is appended to the raw (markup-bearing) text.
    assert_eq!(
        fb.correct_answers,
        vec!["{{first right}}.", "{{second right}}."]
    );
    assert_eq!(fb.explanation.as_deref(), Some("Because reasons."));
    assert!(fb.is_last);
    assert_eq!(fb.next_label, s.texts.interface.see_result_button);
}

#[test]
fn test_transition_steps_only_advance_in_order() {
    let mut s = session();
    s.start();

    // Not fading: swap is a no-op.
    s.swap_feedback();
    assert_eq!(s.phase, Phase::Selecting);

    // Not in unsettled feedback: settle is a no-op.
    s.feedback_settled();
    assert_eq!(s.phase, Phase::Selecting);

    // Next before settled feedback is a no-op.
    s.toggle_answer(0);
    assert_eq!(s.request_submit(), SubmitOutcome::Graded);
    s.next();
    assert_eq!(s.current, 0);
    s.swap_feedback();
    s.next();
    assert_eq!(s.current, 0);
    s.feedback_settled();
    s.next();
    assert_eq!(s.current, 1);
}

#[test]
fn test_progress_animates_from_previous_width() {
    let mut s = session();
    s.start();
    assert_eq!(s.progress_target, 50.0);
    assert_eq!(s.progress_pct, 0.0);

    for _ in 0..100 {
        s.tick_progress();
    }
    assert_eq!(s.progress_pct, 50.0);

    s.toggle_answer(0);
    s.request_submit();
    complete_transition(&mut s);
    s.next();

    // The new question animates from the old width, not from zero.
    assert_eq!(s.progress_target, 100.0);
    assert_eq!(s.progress_pct, 50.0);
}

#[test]
fn test_scheduler_sequences_the_staged_transition() {
    let mut scheduler = Scheduler::new();
    let t0 = Instant::now();

    scheduler.schedule_in(t0, sched::FADE_OUT, Task::SwapFeedback);
    assert!(scheduler
        .pop_due(t0 + Duration::from_millis(100))
        .is_empty());

    let due = scheduler.pop_due(t0 + sched::FADE_OUT);
    assert_eq!(due, vec![Task::SwapFeedback]);
    assert!(scheduler.is_empty());

    let t1 = t0 + sched::FADE_OUT;
    scheduler.schedule_in(t1, sched::FEEDBACK_SETTLE, Task::FeedbackSettle);
    assert!(scheduler.pop_due(t1).is_empty());
    assert_eq!(
        scheduler.pop_due(t1 + sched::FEEDBACK_SETTLE),
        vec![Task::FeedbackSettle]
    );
}

#[test]
fn test_scheduler_orders_due_tasks_by_deadline() {
    let mut scheduler = Scheduler::new();
    let t0 = Instant::now();

    scheduler.schedule_in(t0, sched::SETTLE_CHECK_LATE, Task::AffordanceCheck);
    scheduler.schedule_in(t0, sched::SETTLE_CHECK_EARLY, Task::AffordanceCheck);
    scheduler.schedule_in(t0, sched::RESIZE_SETTLE, Task::ResizeSettle);

    let due = scheduler.pop_due(t0 + Duration::from_secs(1));
    assert_eq!(
        due,
        vec![
            Task::AffordanceCheck,
            Task::ResizeSettle,
            Task::AffordanceCheck
        ]
    );
}

#[test]
fn test_scheduler_cancellation() {
    let mut scheduler = Scheduler::new();
    let t0 = Instant::now();

    scheduler.schedule_in(t0, sched::RESIZE_SETTLE, Task::ResizeSettle);
    scheduler.schedule_in(t0, sched::SETTLE_CHECK_EARLY, Task::AffordanceCheck);

    // Re-scheduling a resize settle replaces the pending one.
    scheduler.cancel(Task::ResizeSettle);
    scheduler.schedule_in(t0 + Duration::from_millis(50), sched::RESIZE_SETTLE, Task::ResizeSettle);
    let due = scheduler.pop_due(t0 + Duration::from_secs(1));
    assert_eq!(due.iter().filter(|t| **t == Task::ResizeSettle).count(), 1);

    // Screen transitions drop everything.
    scheduler.schedule_in(t0, sched::FADE_OUT, Task::SwapFeedback);
    scheduler.cancel_all();
    assert!(scheduler.is_empty());
    assert!(scheduler.pop_due(t0 + Duration::from_secs(5)).is_empty());
}

#[test]
fn test_score_never_exceeds_total_and_is_monotone() {
    let mut s = session();
    s.start();

    let mut last_score = s.score;
    for _ in 0..s.total_questions() {
        s.toggle_answer(0);
        if s.request_submit() == SubmitOutcome::NeedsConfirmation {
            s.confirm_single_submit();
        }
        assert!(s.score >= last_score);
        last_score = s.score;
        complete_transition(&mut s);
        s.next();
    }

    assert_eq!(s.screen, Screen::Final);
    assert!(s.score as usize <= s.total_questions());
}
