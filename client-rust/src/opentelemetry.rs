use crate::{Article, ArticleId, CollectionResult};
use opentelemetry::trace::Status;
use std::future::Future;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl StoreOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn http_method(self) -> &'static str {
        match self {
            Self::List | Self::Get => "GET",
            Self::Create => "POST",
            Self::Update => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Attributes recorded on the span once an operation succeeds.
pub trait TracedOutput {
    fn record(&self, span: &Span);
}

impl TracedOutput for Vec<Article> {
    fn record(&self, span: &Span) {
        span.set_attribute(
            "newsroom.article.count",
            i64::try_from(self.len()).unwrap_or(i64::MAX),
        );
    }
}

impl TracedOutput for Article {
    fn record(&self, span: &Span) {
        span.set_attribute("newsroom.article.id", self.id.to_string());
    }
}

impl TracedOutput for () {
    fn record(&self, _span: &Span) {}
}

pub struct StoreSpan {
    span: Span,
}

impl StoreSpan {
    pub fn new(store: &str, operation: StoreOperation, id: Option<&ArticleId>) -> Self {
        let span = match operation {
            StoreOperation::List => info_span!("newsroom.list"),
            StoreOperation::Get => info_span!("newsroom.get"),
            StoreOperation::Create => info_span!("newsroom.create"),
            StoreOperation::Update => info_span!("newsroom.update"),
            StoreOperation::Delete => info_span!("newsroom.delete"),
        };
        span.set_attribute("newsroom.store", store.to_string());
        span.set_attribute("newsroom.operation", operation.as_str());
        span.set_attribute("http.request.method", operation.http_method());
        if let Some(id) = id {
            span.set_attribute("newsroom.article.id", id.to_string());
        }

        Self { span }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn with_url(self, url: &str) -> Self {
        self.span.set_attribute("url.full", url.to_string());
        self
    }

    pub fn on_output<T: TracedOutput>(&self, output: &T) {
        output.record(&self.span);
    }

    pub fn on_error(&self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }
}

pub async fn trace_operation<T, Fut>(span: StoreSpan, future: Fut) -> CollectionResult<T>
where
    T: TracedOutput,
    Fut: Future<Output = CollectionResult<T>>,
{
    let result = future.instrument(span.span()).await;

    match &result {
        Ok(output) => span.on_output(output),
        Err(error) => span.on_error(error),
    }

    result
}
