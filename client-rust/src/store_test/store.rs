use std::{collections::VecDeque, sync::Mutex};

use futures::channel::oneshot;

use crate::{
    opentelemetry::StoreOperation, Article, ArticleDraft, ArticleId, ArticleStore,
    CollectionError, CollectionResult,
};

/// Releases a `list` call held by [`MockArticleStore::hold_next_list`].
pub struct ListGate(oneshot::Sender<()>);

impl ListGate {
    /// Let the held call return the snapshot it took when it started.
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

#[derive(Default)]
struct MockArticleStoreState {
    articles: Vec<Article>,
    next_id: u64,
    offline: bool,
    mocked_failures: VecDeque<StoreOperation>,
    held_lists: VecDeque<oneshot::Receiver<()>>,
    tracked_calls: Vec<StoreOperation>,
}

impl MockArticleStoreState {
    fn take_failure(&mut self, operation: StoreOperation) -> CollectionResult<()> {
        self.tracked_calls.push(operation);

        if self.offline {
            return Err(mock_failure(operation));
        }
        if let Some(index) = self
            .mocked_failures
            .iter()
            .position(|failure| *failure == operation)
        {
            self.mocked_failures.remove(index);
            return Err(mock_failure(operation));
        }
        Ok(())
    }

    fn position(&self, id: &ArticleId) -> CollectionResult<usize> {
        let key = id.to_string();
        self.articles
            .iter()
            .position(|article| article.id.to_string() == key)
            .ok_or_else(|| CollectionError::NotFound(key))
    }
}

fn mock_failure(operation: StoreOperation) -> CollectionError {
    CollectionError::StatusCode(
        reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        format!("mocked {} failure", operation.as_str()),
    )
}

/// An in-memory article store with json-server semantics: numeric ids
/// assigned on create, full replacement on update.
/// It tracks calls and can be told to fail.
pub struct MockArticleStore {
    state: Mutex<MockArticleStoreState>,
}

impl Default for MockArticleStore {
    fn default() -> Self {
        Self {
            state: Mutex::new(MockArticleStoreState {
                next_id: 1,
                ..Default::default()
            }),
        }
    }
}

impl MockArticleStore {
    /// Construct an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a mock store holding the given articles, in order.
    pub fn with_articles(articles: Vec<Article>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().expect("mock state poisoned");
            state.next_id = next_numeric_id(&articles);
            state.articles = articles;
        }
        store
    }

    /// Insert a draft directly, bypassing failure injection and tracking.
    pub fn seed(&self, draft: ArticleDraft) -> Article {
        let mut state = self.state.lock().expect("mock state poisoned");
        let article = Article::new(state.next_id, draft);
        state.next_id += 1;
        state.articles.push(article.clone());
        article
    }

    /// Make the next call of `operation` fail with a 500 status.
    pub fn fail_next(&self, operation: StoreOperation) -> &Self {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_failures.push_back(operation);
        drop(state);
        self
    }

    /// While offline every call fails.
    pub fn set_offline(&self, offline: bool) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.offline = offline;
    }

    /// Hold the next `list` call after it has taken its snapshot, until the
    /// returned gate is released.
    pub fn hold_next_list(&self) -> ListGate {
        let (sender, receiver) = oneshot::channel();
        let mut state = self.state.lock().expect("mock state poisoned");
        state.held_lists.push_back(receiver);
        ListGate(sender)
    }

    /// The current contents of the store.
    pub fn articles(&self) -> Vec<Article> {
        let state = self.state.lock().expect("mock state poisoned");
        state.articles.clone()
    }

    /// Every call made so far, in order.
    pub fn tracked_calls(&self) -> Vec<StoreOperation> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.clone()
    }

    /// Number of calls made so far for one operation.
    pub fn call_count(&self, operation: StoreOperation) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state
            .tracked_calls
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    /// Forget tracked calls without touching contents or mocked failures.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.clear();
    }
}

fn next_numeric_id(articles: &[Article]) -> u64 {
    articles
        .iter()
        .filter_map(|article| match &article.id {
            ArticleId::Number(id) => Some(*id),
            ArticleId::Text(id) => id.parse().ok(),
        })
        .max()
        .map_or(1, |max| max + 1)
}

#[async_trait::async_trait]
impl ArticleStore for MockArticleStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list(&self) -> CollectionResult<Vec<Article>> {
        let (snapshot, hold) = {
            let mut state = self.state.lock().expect("mock state poisoned");
            let result = state
                .take_failure(StoreOperation::List)
                .map(|()| state.articles.clone());
            (result, state.held_lists.pop_front())
        };

        if let Some(hold) = hold {
            let _ = hold.await;
        }
        snapshot
    }

    async fn get(&self, id: &ArticleId) -> CollectionResult<Article> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.take_failure(StoreOperation::Get)?;
        let index = state.position(id)?;
        Ok(state.articles[index].clone())
    }

    async fn create(&self, draft: &ArticleDraft) -> CollectionResult<Article> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.take_failure(StoreOperation::Create)?;
        draft.validate()?;
        let article = Article::new(state.next_id, draft.clone());
        state.next_id += 1;
        state.articles.push(article.clone());
        Ok(article)
    }

    async fn update(&self, id: &ArticleId, article: &Article) -> CollectionResult<Article> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.take_failure(StoreOperation::Update)?;
        article.content.validate()?;
        if article.id.to_string() != id.to_string() {
            return Err(CollectionError::InvalidInput(format!(
                "Article id {} does not match update target {id}",
                article.id
            )));
        }
        let index = state.position(id)?;
        let stored = Article {
            id: state.articles[index].id.clone(),
            content: article.content.clone(),
        };
        state.articles[index] = stored.clone();
        Ok(stored)
    }

    async fn delete(&self, id: &ArticleId) -> CollectionResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.take_failure(StoreOperation::Delete)?;
        let index = state.position(id)?;
        state.articles.remove(index);
        Ok(())
    }
}
