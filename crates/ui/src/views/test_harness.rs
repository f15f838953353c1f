use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use exam_core::model::{Question, QuestionRecord, RecordAnswer, RecordKind, Topic};
use exam_core::time::fixed_clock;
use services::{ExamFlowService, ExamSession};
use storage::InMemoryCatalog;

use crate::context::{UiApp, build_app_context};
use crate::views::{ExamView, MenuView};

struct TestApp {
    flow: Arc<ExamFlowService>,
    source_warning: Option<String>,
}

impl UiApp for TestApp {
    fn exam_flow(&self) -> Arc<ExamFlowService> {
        Arc::clone(&self.flow)
    }

    fn source_warning(&self) -> Option<String> {
        self.source_warning.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Menu,
    Exam,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: ExamSession,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let session = props.session.clone();
    use_context_provider(move || Signal::new(session));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Menu => rsx! { MenuView {} },
        ViewKind::Exam => rsx! { ExamView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(
    view: ViewKind,
    questions: Vec<Question>,
    session: ExamSession,
    source_warning: Option<String>,
) -> ViewHarness {
    let catalog = InMemoryCatalog::new(questions);
    let flow = Arc::new(ExamFlowService::new(fixed_clock(), Arc::new(catalog)));
    let app = Arc::new(TestApp {
        flow,
        source_warning,
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps { app, view, session },
    );
    ViewHarness { dom }
}

// ─── Question builders shared by the smoke tests ───────────────────────────────

pub fn mc_question(text: &str, options: &[&str], answer: &str, topic: Topic) -> Question {
    QuestionRecord {
        text: text.to_string(),
        kind: RecordKind::MultipleChoice,
        options: options.iter().map(ToString::to_string).collect(),
        answer: RecordAnswer::Letter(answer.to_string()),
        topic,
    }
    .validate()
    .unwrap()
}

pub fn blank_question(text: &str, answers: &[&str]) -> Question {
    QuestionRecord {
        text: text.to_string(),
        kind: RecordKind::FillBlank,
        options: Vec::new(),
        answer: RecordAnswer::Fills(answers.iter().map(ToString::to_string).collect()),
        topic: Topic::default(),
    }
    .validate()
    .unwrap()
}
