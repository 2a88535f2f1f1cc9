use crate::{
    Article, ArticleDraft, ArticleId, ArticleStore, CollectionResult, FailureNotice, NoticeSink,
    TracingNotices,
};
use std::sync::Arc;

/// Optional-result access to the article collection.
///
/// Every failure collapses into an empty list, `None` or `false`, so callers
/// branch the same way regardless of what went wrong. The underlying error
/// is logged. Nothing is retried.
#[derive(Clone)]
pub struct CollectionClient {
    store: Arc<dyn ArticleStore>,
    notices: Arc<dyn NoticeSink>,
}

impl CollectionClient {
    /// Create a client reporting load failures through [`TracingNotices`].
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self {
            store,
            notices: Arc::new(TracingNotices),
        }
    }

    #[must_use]
    pub fn with_notices(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    pub fn notices(&self) -> &Arc<dyn NoticeSink> {
        &self.notices
    }

    /// Fetch the whole collection. A failure is logged and reported as one
    /// [`FailureNotice::LoadFailure`] before it is returned.
    pub async fn load(&self) -> CollectionResult<Vec<Article>> {
        self.store.list().await.inspect_err(|error| {
            tracing::warn!(store = self.store.name(), %error, "failed to load articles");
            self.notices.notify(FailureNotice::LoadFailure);
        })
    }

    /// Like [`CollectionClient::load`], with an empty list on failure.
    pub async fn list_all(&self) -> Vec<Article> {
        self.load().await.unwrap_or_default()
    }

    /// Missing articles and unreachable stores both give `None`.
    pub async fn get_by_id(&self, id: &ArticleId) -> Option<Article> {
        self.store
            .get(id)
            .await
            .inspect_err(|error| {
                tracing::warn!(store = self.store.name(), %id, %error, "failed to load article");
            })
            .ok()
    }

    /// Returns the stored article with its store-assigned id.
    pub async fn create(&self, draft: &ArticleDraft) -> Option<Article> {
        self.store
            .create(draft)
            .await
            .inspect_err(|error| {
                tracing::warn!(store = self.store.name(), %error, "failed to create article");
            })
            .ok()
    }

    /// Replace the stored record with `article`. The store does not merge,
    /// so `article` must carry everything to keep, embedded images included.
    pub async fn update(&self, id: &ArticleId, article: &Article) -> Option<Article> {
        self.store
            .update(id, article)
            .await
            .inspect_err(|error| {
                tracing::warn!(store = self.store.name(), %id, %error, "failed to update article");
            })
            .ok()
    }

    pub async fn delete_by_id(&self, id: &ArticleId) -> bool {
        match self.store.delete(id).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(store = self.store.name(), %id, %error, "failed to delete article");
                false
            }
        }
    }
}
