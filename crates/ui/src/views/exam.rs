use dioxus::prelude::*;
use dioxus_router::use_navigator;

use exam_core::verify::UserResponse;
use services::{ExamPhase, ExamSession};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::QuestionVm;

/// Sentinel shown in a gap select before the user picks a candidate.
const GAP_PLACEHOLDER: &str = "...";

#[component]
pub fn ExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<Signal<ExamSession>>();
    let navigator = use_navigator();

    // Pending input for the question on screen; reset on advance.
    let mut choice = use_signal(|| None::<usize>);
    let mut fills = use_signal(Vec::<Option<String>>::new);
    let mut show_incomplete_hint = use_signal(|| false);

    let snapshot = session();
    let phase = snapshot.phase();
    let progress = snapshot.progress();
    let question_number = snapshot.position() + 1;
    let total = snapshot.total();
    let current = snapshot.current_question().cloned();
    let vm = current
        .as_ref()
        .map(|question| QuestionVm::for_question(question, snapshot.position()));
    let question_text = current
        .as_ref()
        .map(|question| question.text().to_string())
        .unwrap_or_default();
    let verdict = snapshot.last_result().cloned();
    let awaiting = snapshot.awaiting_result();

    let is_multiple_choice = matches!(&vm, Some(QuestionVm::MultipleChoice { .. }));
    let group_count = match &vm {
        Some(QuestionVm::FillBlank { groups, .. }) => groups.len(),
        _ => 0,
    };
    let fill_values = {
        let mut values = fills();
        values.resize(group_count, None);
        values
    };

    let submit = {
        let flow = ctx.exam_flow();
        move |_| {
            let response = if is_multiple_choice {
                choice().map(UserResponse::Choice)
            } else {
                let mut values = fills();
                values.resize(group_count, None);
                values
                    .into_iter()
                    .collect::<Option<Vec<String>>>()
                    .map(UserResponse::Blanks)
            };
            match response {
                Some(response) => {
                    show_incomplete_hint.set(false);
                    // A stale double-click is rejected by the engine's
                    // awaiting guard.
                    let _ = flow.submit_answer(&mut session.write(), &response);
                }
                None => show_incomplete_hint.set(true),
            }
        }
    };

    let next = {
        let flow = ctx.exam_flow();
        move |_| {
            let _ = flow.advance(&mut session.write());
            choice.set(None);
            fills.set(Vec::new());
            show_incomplete_hint.set(false);
        }
    };

    let incomplete_hint = if is_multiple_choice {
        "Pick an option first."
    } else {
        "Fill every gap first."
    };

    rsx! {
        div { class: "page exam-page",
            match phase {
                ExamPhase::Idle => rsx! {
                    p { "No exam is running." }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: {
                            let flow = ctx.exam_flow();
                            move |_| {
                                flow.return_to_menu(&mut session.write());
                                navigator.push(Route::Menu {});
                            }
                        },
                        "Back to menu"
                    }
                },
                ExamPhase::Finished => rsx! {
                    h3 { class: "exam-done-title", "Exam finished!" }
                    p { class: "exam-score",
                        "Score: {snapshot.correct_count()} / {snapshot.total()}"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: {
                            let flow = ctx.exam_flow();
                            move |_| {
                                flow.return_to_menu(&mut session.write());
                                navigator.push(Route::Menu {});
                            }
                        },
                        "Back to menu"
                    }
                },
                ExamPhase::InProgress => rsx! {
                    progress {
                        class: "exam-progress",
                        value: "{progress.answered}",
                        max: "{progress.total}",
                    }
                    h3 { class: "exam-counter",
                        "Question {question_number} of {total}"
                    }

                    match vm {
                        Some(QuestionVm::MultipleChoice { choices }) => rsx! {
                            p { class: "question-text", "{question_text}" }
                            if !awaiting {
                                ul { class: "choice-list",
                                    for (index, option_vm) in choices.into_iter().enumerate() {
                                        li {
                                            label { class: "choice",
                                                input {
                                                    r#type: "radio",
                                                    name: "choice",
                                                    checked: choice() == Some(index),
                                                    onchange: move |_| choice.set(Some(index)),
                                                }
                                                span { "{option_vm.letter}) {option_vm.text}" }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        Some(QuestionVm::FillBlank { groups, trailing }) => rsx! {
                            p { class: "question-text",
                                for group in groups.iter() {
                                    span { "{group.leading}" }
                                    strong { class: "gap-marker", "[{group.number}]" }
                                }
                                span { "{trailing}" }
                            }
                            if !awaiting {
                                p { class: "gap-help", "Pick the right word for each gap:" }
                                div { class: "gap-inputs",
                                    for (index, group) in groups.into_iter().enumerate() {
                                        label { class: "gap-label", "Gap {group.number}:" }
                                        select {
                                            onchange: move |evt| {
                                                let value = evt.value();
                                                let mut fills = fills.write();
                                                if fills.len() < group_count {
                                                    fills.resize(group_count, None);
                                                }
                                                fills[index] =
                                                    (value != GAP_PLACEHOLDER).then_some(value);
                                            },
                                            option {
                                                value: GAP_PLACEHOLDER,
                                                selected: fill_values[index].is_none(),
                                                "{GAP_PLACEHOLDER}"
                                            }
                                            for candidate in group.candidates {
                                                option {
                                                    value: "{candidate}",
                                                    selected: fill_values[index].as_deref()
                                                        == Some(candidate.as_str()),
                                                    "{candidate}"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        None => rsx! {},
                    }

                    if awaiting {
                        match verdict {
                            Some(verdict) => rsx! {
                                p {
                                    class: if verdict.is_correct {
                                        "banner banner-success"
                                    } else {
                                        "banner banner-error"
                                    },
                                    "{verdict.message}"
                                }
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    onclick: next,
                                    "Next question"
                                }
                            },
                            None => rsx! {},
                        }
                    } else {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: submit,
                            "Check answer"
                        }
                        if show_incomplete_hint() {
                            p { class: "banner banner-warning", "{incomplete_hint}" }
                        }
                    }
                },
            }
        }
    }
}
