use crate::{Article, ArticleDraft, ArticleId, CollectionResult};

/// Transport-level access to the article collection.
///
/// Every method reports the full failure. Callers that only care about
/// success or failure should go through
/// [`CollectionClient`](crate::CollectionClient) instead.
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Short name used in spans and logs.
    fn name(&self) -> &'static str;
    async fn list(&self) -> CollectionResult<Vec<Article>>;
    async fn get(&self, id: &ArticleId) -> CollectionResult<Article>;
    /// Create an article; the store assigns its id.
    async fn create(&self, draft: &ArticleDraft) -> CollectionResult<Article>;
    /// Replace the whole stored record. Fields missing from `article` are
    /// not kept.
    async fn update(&self, id: &ArticleId, article: &Article) -> CollectionResult<Article>;
    async fn delete(&self, id: &ArticleId) -> CollectionResult<()>;
}
