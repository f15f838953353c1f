use std::sync::Arc;

use services::ExamFlowService;

/// Composition-root contract for the UI.
pub trait UiApp: Send + Sync {
    fn exam_flow(&self) -> Arc<ExamFlowService>;

    /// Set when the question source could not be read at startup; the
    /// menu shows it as a warning banner.
    fn source_warning(&self) -> Option<String>;
}

#[derive(Clone)]
pub struct AppContext {
    exam_flow: Arc<ExamFlowService>,
    source_warning: Option<String>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exam_flow: app.exam_flow(),
            source_warning: app.source_warning(),
        }
    }

    #[must_use]
    pub fn exam_flow(&self) -> Arc<ExamFlowService> {
        Arc::clone(&self.exam_flow)
    }

    #[must_use]
    pub fn source_warning(&self) -> Option<&str> {
        self.source_warning.as_deref()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
///
/// The context is provided by the application composition root
/// (e.g. `crates/app`).
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
