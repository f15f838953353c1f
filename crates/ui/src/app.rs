use dioxus::prelude::*;
use dioxus_router::Router;

use services::ExamSession;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    // The single session instance for this user; views mutate it only
    // through the engine's transitions.
    use_context_provider(|| Signal::new(ExamSession::default()));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-screen headings live in the views.
        document::Title { "Exam" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
