use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::Clock;
use services::ExamFlowService;
use storage::{InMemoryCatalog, JsonCatalog, QuestionRepository};
use tracing::warn;
use ui::{App, UiApp, build_app_context};

const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions {DEFAULT_QUESTIONS_PATH}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_QUESTIONS");
}

struct Args {
    questions_path: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut questions_path = std::env::var("EXAM_QUESTIONS")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUESTIONS_PATH.to_string());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    questions_path = args
                        .next()
                        .ok_or(ArgsError::MissingValue { flag: "--questions" })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { questions_path })
    }
}

struct DesktopApp {
    exam_flow: Arc<ExamFlowService>,
    source_warning: Option<String>,
}

impl UiApp for DesktopApp {
    fn exam_flow(&self) -> Arc<ExamFlowService> {
        Arc::clone(&self.exam_flow)
    }

    fn source_warning(&self) -> Option<String> {
        self.source_warning.clone()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    // A missing or corrupt source is a warning, not an exit: the menu
    // stays usable with zero questions.
    let (catalog, source_warning): (Arc<dyn QuestionRepository>, Option<String>) =
        match JsonCatalog::open(&parsed.questions_path) {
            Ok(catalog) => {
                if catalog.skipped() > 0 {
                    warn!(
                        skipped = catalog.skipped(),
                        path = %parsed.questions_path,
                        "some question records were rejected at load"
                    );
                }
                (Arc::new(catalog), None)
            }
            Err(err) => {
                warn!(%err, "question source unavailable, starting with an empty catalog");
                (
                    Arc::new(InMemoryCatalog::default()),
                    Some(format!(
                        "Could not load questions from {}.",
                        parsed.questions_path
                    )),
                )
            }
        };

    let exam_flow = Arc::new(ExamFlowService::new(Clock::default_clock(), catalog));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        exam_flow,
        source_warning,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
