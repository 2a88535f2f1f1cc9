use crate::{
    cache::SnapshotCache, opentelemetry::ReloadSpan, summary::category_counts, ArticleFilter,
    CatalogParams, CatalogView, FilterControls,
};
use newsroom_client::{
    Article, ArticleDraft, ArticleId, CollectionClient, FailureNotice, WriteKind,
};
use std::sync::Arc;
use tracing_futures::Instrument;

/// The listing page's state: a snapshot of the collection and the client
/// that keeps it fresh.
///
/// Views are always computed from the whole snapshot. Writes go straight to
/// the store and are followed by a full reload; the snapshot is never patched
/// locally.
pub struct Catalog {
    client: CollectionClient,
    cache: SnapshotCache,
    known_categories: Vec<String>,
    uncategorized_label: String,
    highlight_label: String,
    gallery_fallback_size: usize,
}

impl Catalog {
    /// The snapshot starts empty until the first [`Catalog::reload`].
    #[must_use]
    pub fn new(params: CatalogParams) -> Self {
        Self {
            client: CollectionClient::new(params.store).with_notices(params.notices),
            cache: SnapshotCache::new(),
            known_categories: params.known_categories,
            uncategorized_label: params.uncategorized_label,
            highlight_label: params.highlight_label.to_lowercase(),
            gallery_fallback_size: params.gallery_fallback_size,
        }
    }

    pub fn client(&self) -> &CollectionClient {
        &self.client
    }

    /// The currently installed articles, in store order.
    pub fn snapshot(&self) -> Arc<Vec<Article>> {
        self.cache.snapshot()
    }

    /// Replace the snapshot with a fresh copy of the collection.
    ///
    /// A failed load installs an empty snapshot; the failure has already been
    /// reported as a [`FailureNotice::LoadFailure`]. Returns `false` when a
    /// reload that started later finished first, in which case this result is
    /// discarded.
    pub async fn reload(&self) -> bool {
        let ticket = self.cache.ticket();
        let mut span = ReloadSpan::new(self.client.store().name(), ticket);

        let articles = match self.client.load().instrument(span.span()).await {
            Ok(articles) => articles,
            Err(error) => {
                span.on_load_error(&error);
                Vec::new()
            }
        };
        let count = articles.len();

        let _guard = span.span().entered();
        if self.cache.install(ticket, articles) {
            span.on_installed(count);
            tracing::debug!(ticket, count, "installed article snapshot");
            true
        } else {
            span.on_discarded();
            tracing::debug!(ticket, "discarded stale article snapshot");
            false
        }
    }

    pub fn view(&self, filter: &ArticleFilter) -> CatalogView {
        let snapshot = self.snapshot();
        let matched = snapshot
            .iter()
            .enumerate()
            .filter(|(_, article)| filter.matches(article))
            .map(|(index, _)| index)
            .collect();
        let counts = category_counts(&snapshot, &self.uncategorized_label);
        let chart = counts.chart(self.known_categories.as_slice());

        CatalogView::new(snapshot, matched, counts, chart)
    }

    pub fn view_controls(&self, controls: &FilterControls) -> CatalogView {
        self.view(&ArticleFilter::from_controls(controls))
    }

    /// Detail lookup. Reports [`FailureNotice::NotFound`] when the article is
    /// missing or the store is unreachable.
    pub async fn get(&self, id: &ArticleId) -> Option<Article> {
        let article = self.client.get_by_id(id).await;
        if article.is_none() {
            self.client.notices().notify(FailureNotice::NotFound(id.clone()));
        }
        article
    }

    pub async fn create(&self, draft: &ArticleDraft) -> Option<Article> {
        let Some(article) = self.client.create(draft).await else {
            self.client
                .notices()
                .notify(FailureNotice::WriteFailure(WriteKind::Create));
            return None;
        };
        self.reload().await;
        Some(article)
    }

    /// Full replacement, see [`CollectionClient::update`].
    pub async fn update(&self, id: &ArticleId, article: &Article) -> Option<Article> {
        let Some(article) = self.client.update(id, article).await else {
            self.client
                .notices()
                .notify(FailureNotice::WriteFailure(WriteKind::Update));
            return None;
        };
        self.reload().await;
        Some(article)
    }

    pub async fn delete(&self, id: &ArticleId) -> bool {
        if !self.client.delete_by_id(id).await {
            self.client
                .notices()
                .notify(FailureNotice::DeleteFailure(id.clone()));
            return false;
        }
        self.reload().await;
        true
    }

    /// Articles whose category is exactly `category`, for the home sections.
    pub fn in_category(&self, category: &str) -> Vec<Article> {
        self.snapshot()
            .iter()
            .filter(|article| article.content.category.as_deref() == Some(category))
            .cloned()
            .collect()
    }

    /// Carousel articles: the category contains the highlight label,
    /// ignoring case.
    pub fn highlights(&self) -> Vec<Article> {
        self.snapshot()
            .iter()
            .filter(|article| {
                article
                    .content
                    .category
                    .as_deref()
                    .is_some_and(|category| {
                        category.to_lowercase().contains(&self.highlight_label)
                    })
            })
            .cloned()
            .collect()
    }

    /// The article's own gallery, or else the stored images of the first
    /// snapshot articles.
    pub fn gallery_for(&self, article: &Article) -> Vec<String> {
        let own = article.content.gallery();
        if !own.is_empty() {
            return own.to_vec();
        }

        self.snapshot()
            .iter()
            .take(self.gallery_fallback_size)
            .filter_map(|article| article.content.stored_image())
            .map(ToString::to_string)
            .collect()
    }
}
