//! Best-effort usage reporting. Reporters never fail the caller: they take
//! no `Result` and any problem stays inside the reporter.

/// Receives page-view signals from the interactive view.
///
/// Called on the UI thread after the first frame is drawn. Implementations
/// must return promptly; anything slow (network, disk) belongs on a thread
/// the reporter owns.
pub trait UsageReporter {
    fn page_view(&self, view: &str);
}

/// Reports nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl UsageReporter for NoopReporter {
    fn page_view(&self, _view: &str) {}
}

/// Reports page views as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl UsageReporter for LogReporter {
    fn page_view(&self, view: &str) {
        tracing::info!(target: "shiplist::telemetry", view, "page view");
    }
}
