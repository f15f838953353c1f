use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::ExamSession;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn MenuView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<Signal<ExamSession>>();
    let navigator = use_navigator();
    let flow = ctx.exam_flow();

    let topics = flow.topics();
    let mut selected_topic = use_signal(|| 0usize);

    let question_count = flow.question_count();
    let failed_count = session.read().failed().len();

    let start_full = {
        let flow = ctx.exam_flow();
        move |_| {
            flow.start_full(&mut session.write());
            navigator.push(Route::Exam {});
        }
    };
    let start_topic = {
        let flow = ctx.exam_flow();
        let topics = topics.clone();
        move |_| {
            if let Some(topic) = topics.get(selected_topic()) {
                flow.start_topic(&mut session.write(), topic);
                navigator.push(Route::Exam {});
            }
        }
    };
    let start_retry = {
        let flow = ctx.exam_flow();
        move |_| {
            flow.start_retry(&mut session.write());
            navigator.push(Route::Exam {});
        }
    };

    rsx! {
        div { class: "page menu-page",
            header { class: "view-header",
                h2 { class: "view-title", "Online Exam" }
                p { class: "view-subtitle", "Work through the whole catalog or a single topic." }
            }
            if let Some(warning) = ctx.source_warning() {
                p { class: "banner banner-warning", "{warning}" }
            }
            div { class: "view-divider" }
            section { class: "menu-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: question_count == 0,
                    onclick: start_full,
                    "Take all questions ({question_count})"
                }
                div { class: "menu-topic",
                    label { r#for: "topic-select", "Filter by topic:" }
                    select {
                        id: "topic-select",
                        onchange: move |evt| {
                            selected_topic.set(evt.value().parse().unwrap_or(0));
                        },
                        for (index, topic) in topics.iter().enumerate() {
                            option {
                                value: "{index}",
                                selected: index == selected_topic(),
                                "{topic}"
                            }
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: topics.is_empty(),
                        onclick: start_topic,
                        "Start by topic"
                    }
                }
            }
            if failed_count > 0 {
                section { class: "menu-retry",
                    p { class: "banner banner-warning",
                        "You missed {failed_count} question(s) this session."
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: start_retry,
                        "Retry missed questions"
                    }
                }
            }
        }
    }
}
