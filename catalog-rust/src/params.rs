use crate::summary::{KNOWN_CATEGORIES, UNCATEGORIZED};
use newsroom_client::{ArticleStore, NoticeSink, TracingNotices};
use std::sync::Arc;

/// Parameters required to create a new catalog.
/// # Default Values
/// - `notices`: [`TracingNotices`]
/// - `known_categories`: [`KNOWN_CATEGORIES`]
/// - `uncategorized_label`: `"Outros"`
/// - `highlight_label`: `"em alta"`
/// - `gallery_fallback_size`: 6
pub struct CatalogParams {
    /// The store holding the collection.
    pub store: Arc<dyn ArticleStore>,
    /// Where user-visible failures are reported.
    pub notices: Arc<dyn NoticeSink>,
    /// Categories listed first, zero-filled, in the chart series.
    pub known_categories: Vec<String>,
    /// Label counting articles that have no category.
    pub uncategorized_label: String,
    /// Case-insensitive category fragment selecting carousel articles.
    pub highlight_label: String,
    /// Number of snapshot articles whose images fill an empty gallery.
    pub gallery_fallback_size: usize,
}

impl CatalogParams {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self {
            store,
            notices: Arc::new(TracingNotices),
            known_categories: KNOWN_CATEGORIES.iter().map(ToString::to_string).collect(),
            uncategorized_label: UNCATEGORIZED.to_string(),
            highlight_label: "em alta".to_string(),
            gallery_fallback_size: 6,
        }
    }

    /// Set the notice sink
    #[must_use]
    pub fn notices(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    /// Set the known categories
    #[must_use]
    pub fn known_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn uncategorized_label(mut self, label: &str) -> Self {
        self.uncategorized_label = label.to_string();
        self
    }

    #[must_use]
    pub fn highlight_label(mut self, label: &str) -> Self {
        self.highlight_label = label.to_string();
        self
    }

    #[must_use]
    pub fn gallery_fallback_size(mut self, size: usize) -> Self {
        self.gallery_fallback_size = size;
        self
    }
}
