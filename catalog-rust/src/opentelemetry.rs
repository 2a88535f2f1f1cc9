use opentelemetry::trace::Status;
use std::error::Error;
use tracing::{info_span, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct ReloadSpan {
    span: Span,
    failed: bool,
}

impl ReloadSpan {
    pub fn new(store: &str, sequence: u64) -> Self {
        let span = info_span!("newsroom.catalog.reload");
        span.set_attribute("newsroom.store", store.to_string());
        span.set_attribute(
            "newsroom.reload.sequence",
            i64::try_from(sequence).unwrap_or(i64::MAX),
        );

        Self {
            span,
            failed: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Marks the span failed. The empty result is still installed.
    pub fn on_load_error(&mut self, error: &(dyn Error + 'static)) {
        self.failed = true;
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_installed(&self, count: usize) {
        self.span.set_attribute("newsroom.reload.stale", false);
        self.span.set_attribute(
            "newsroom.article.count",
            i64::try_from(count).unwrap_or(i64::MAX),
        );
        if !self.failed {
            self.span.set_status(Status::Ok);
        }
    }

    pub fn on_discarded(&self) {
        self.span.set_attribute("newsroom.reload.stale", true);
    }
}
