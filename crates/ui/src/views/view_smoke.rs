use exam_core::model::Topic;
use exam_core::time::fixed_now;
use exam_core::verify::UserResponse;
use services::ExamSession;

use super::test_harness::{ViewKind, blank_question, mc_question, setup_view_harness};

fn sample_questions() -> Vec<exam_core::model::Question> {
    vec![
        mc_question(
            "Capital of France?",
            &["Madrid", "Paris", "Rome"],
            "b",
            Topic::Number(1),
        ),
        blank_question("The [cat|dog] sat on the [mat|rug]", &["cat", "mat"]),
    ]
}

#[test]
fn menu_smoke_renders_start_actions_and_topics() {
    let mut harness = setup_view_harness(
        ViewKind::Menu,
        sample_questions(),
        ExamSession::default(),
        None,
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Take all questions (2)"), "missing start in {html}");
    assert!(html.contains("Filter by topic"), "missing topic filter in {html}");
    // Topics: the sentinel for the fill-blank record plus topic 1.
    assert!(html.contains("<option value=\"0\""), "missing topic option in {html}");
    assert!(!html.contains("Retry missed"), "unexpected retry button in {html}");
}

#[test]
fn menu_smoke_shows_the_source_warning() {
    let mut harness = setup_view_harness(
        ViewKind::Menu,
        Vec::new(),
        ExamSession::default(),
        Some("Could not load questions from questions.json.".to_string()),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Could not load questions"), "missing warning in {html}");
    assert!(html.contains("Take all questions (0)"), "missing start in {html}");
}

#[test]
fn menu_smoke_offers_a_retry_after_mistakes() {
    let questions = sample_questions();
    let mut session = ExamSession::default();
    session.start(vec![questions[0].clone()], fixed_now());
    session.submit_answer(&UserResponse::Choice(0)).unwrap();
    session.advance(fixed_now()).unwrap();
    session.return_to_menu();
    assert_eq!(session.failed().len(), 1);

    let mut harness = setup_view_harness(ViewKind::Menu, questions, session, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("You missed 1 question(s)"), "missing count in {html}");
    assert!(html.contains("Retry missed questions"), "missing retry in {html}");
}

#[test]
fn exam_smoke_renders_a_multiple_choice_question() {
    let questions = vec![mc_question(
        "Capital of France?",
        &["Madrid", "Paris", "Rome"],
        "b",
        Topic::Number(1),
    )];
    let mut session = ExamSession::default();
    session.start(questions.clone(), fixed_now());

    let mut harness = setup_view_harness(ViewKind::Exam, questions, session, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 1"), "missing counter in {html}");
    assert!(html.contains("Capital of France?"), "missing prompt in {html}");
    assert!(html.contains("a) Madrid"), "missing option in {html}");
    assert!(html.contains("b) Paris"), "missing option in {html}");
    assert!(html.contains("Check answer"), "missing submit in {html}");
}

#[test]
fn exam_smoke_renders_gap_selects_for_fill_blank() {
    let questions = vec![blank_question("The [cat|dog] sat on the [mat|rug]", &["cat", "mat"])];
    let mut session = ExamSession::default();
    session.start(questions.clone(), fixed_now());

    let mut harness = setup_view_harness(ViewKind::Exam, questions, session, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Gap 1:"), "missing gap label in {html}");
    assert!(html.contains("Gap 2:"), "missing gap label in {html}");
    assert!(html.contains("cat"), "missing candidate in {html}");
    assert!(html.contains("..."), "missing placeholder in {html}");
}

#[test]
fn exam_smoke_renders_the_result_panel() {
    let questions = vec![mc_question(
        "Capital of France?",
        &["Madrid", "Paris", "Rome"],
        "b",
        Topic::Number(1),
    )];
    let mut session = ExamSession::default();
    session.start(questions.clone(), fixed_now());
    session.submit_answer(&UserResponse::Choice(0)).unwrap();

    let mut harness = setup_view_harness(ViewKind::Exam, questions, session, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("b) Paris"), "missing correction in {html}");
    assert!(html.contains("Next question"), "missing next in {html}");
    assert!(!html.contains("Check answer"), "unexpected submit in {html}");
}

#[test]
fn exam_smoke_renders_the_final_score() {
    let mut session = ExamSession::default();
    session.start(Vec::new(), fixed_now());

    let mut harness = setup_view_harness(ViewKind::Exam, Vec::new(), session, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Exam finished!"), "missing title in {html}");
    assert!(html.contains("Score: 0 / 0"), "missing score in {html}");
    assert!(html.contains("Back to menu"), "missing menu button in {html}");
}
