use quizdance::loader::{self, LoadError};
use quizdance::model::QuizDefinition;
use quizdance::texts::{template, InterfaceTextBundle};

#[test]
fn test_load_sample_quiz() {
    let loaded = loader::load("tests/fixtures/sample_quiz.json", None).unwrap();

    assert_eq!(loaded.quiz.series_title, "The **Big Nature** Series");
    assert_eq!(loaded.quiz.quiz_number, 7);
    assert_eq!(
        loaded.quiz.quiz_title.as_deref(),
        Some("Rivers and mountains")
    );
    assert_eq!(loaded.quiz.questions.len(), 2);

    let q1 = &loaded.quiz.questions[0];
    assert!(!q1.is_multiple());
    assert_eq!(q1.correct_count(), 1);
    assert!(!q1.has_image());
    assert!(q1.explanation.is_some());

    let q2 = &loaded.quiz.questions[1];
    assert!(q2.is_multiple());
    assert_eq!(q2.correct_count(), 2);
    assert!(q2.has_image());
    assert_eq!(
        q2.correct_indices().into_iter().collect::<Vec<_>>(),
        vec![0, 2]
    );
    assert_eq!(
        q2.correct_answer_texts(),
        vec!["{{The Alps}}", "{{The Andes}}"]
    );
}

#[test]
fn test_texts_bundle_defaults_and_pools() {
    let loaded = loader::load("tests/fixtures/sample_quiz.json", None).unwrap();
    let ui = &loaded.texts.interface;

    assert_eq!(ui.start_button, "Start the quiz");
    assert_eq!(ui.positive_feedback.items().len(), 3);
    assert_eq!(ui.partial_feedback.items().len(), 2);

    // A singular string is a degenerate one-element pool.
    assert_eq!(
        loaded.texts.final_feedback.fair.items(),
        ["Not bad at all.".to_string()]
    );

    // Keys absent from the bundle fall back to built-in defaults.
    assert!(!ui.multi_notice.is_empty());
    assert!(!ui.wrong_feedback.is_empty());
    assert!(ui.all_selected_feedback.contains("{count}"));
}

#[test]
fn test_missing_quiz_is_unavailable() {
    let err = loader::load("tests/fixtures/no_such_quiz.json", None).unwrap_err();
    assert!(matches!(err, LoadError::Unavailable(_)));
}

#[test]
fn test_missing_texts_is_unavailable() {
    let err = loader::load(
        "tests/fixtures/sample_quiz.json",
        Some("tests/fixtures/no_such_texts.json"),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Unavailable(_)));
}

#[test]
fn test_question_without_correct_answer_is_malformed() {
    let quiz: QuizDefinition = serde_json::from_str(
        r#"{
            "series_title": "S",
            "quiz_number": 1,
            "questions": [
                {
                    "question": "Q?",
                    "answers": [
                        { "text": "a", "correct": false },
                        { "text": "b", "correct": false }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let err = loader::validate(&quiz).unwrap_err();
    assert!(matches!(err, LoadError::Malformed(_)));
}

#[test]
fn test_empty_answer_list_is_malformed() {
    let quiz: QuizDefinition = serde_json::from_str(
        r#"{
            "series_title": "S",
            "quiz_number": 1,
            "questions": [{ "question": "Q?", "answers": [] }]
        }"#,
    )
    .unwrap();

    assert!(matches!(
        loader::validate(&quiz),
        Err(LoadError::Malformed(_))
    ));
}

#[test]
fn test_empty_question_list_is_malformed() {
    let quiz: QuizDefinition = serde_json::from_str(
        r#"{ "series_title": "S", "quiz_number": 1, "questions": [] }"#,
    )
    .unwrap();

    assert!(matches!(
        loader::validate(&quiz),
        Err(LoadError::Malformed(_))
    ));
}

#[test]
fn test_invalid_json_is_malformed() {
    let err = loader::load("tests/fixtures/system_texts.json", None).unwrap_err();
    // The texts bundle is not a valid quiz document.
    assert!(matches!(err, LoadError::Malformed(_)));
}

#[test]
fn test_template_substitution() {
    assert_eq!(
        template(
            "Question {current} of {total}",
            &[("current", "2".to_string()), ("total", "5".to_string())]
        ),
        "Question 2 of 5"
    );

    // Unknown keys stay verbatim.
    assert_eq!(
        template("Hello {name}", &[("other", "x".to_string())]),
        "Hello {name}"
    );

    // Unclosed braces are literal.
    assert_eq!(template("a { b", &[]), "a { b");
}

#[test]
fn test_pool_parsing_one_or_many() {
    let bundle: InterfaceTextBundle = serde_json::from_str(
        r#"{
            "interface": {
                "start_button": "s",
                "confirm_button": "c",
                "next_button": "n",
                "question_progress": "{current}/{total}",
                "final_score": "{correct}/{total}",
                "positive_feedback": "Just one",
                "partial_feedback": ["a", "b"]
            },
            "final_feedback": {
                "excellent": ["e"],
                "good": "g",
                "fair": ["f1", "f2"],
                "encouragement": ["x"]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(
        bundle.interface.positive_feedback.items(),
        ["Just one".to_string()]
    );
    assert_eq!(bundle.final_feedback.fair.items().len(), 2);
    assert!(!bundle.final_feedback.good.is_empty());
}
