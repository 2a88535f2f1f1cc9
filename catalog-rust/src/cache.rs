use newsroom_client::Article;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock,
};

struct Installed {
    sequence: u64,
    articles: Arc<Vec<Article>>,
}

/// The last installed copy of the collection.
///
/// Reloads take a ticket before fetching. A result is installed only when its
/// ticket is newer than the one already installed, so a slow reload can never
/// overwrite the result of a reload that started after it.
pub(crate) struct SnapshotCache {
    issued: AtomicU64,
    installed: RwLock<Installed>,
}

impl SnapshotCache {
    pub(crate) fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            installed: RwLock::new(Installed {
                sequence: 0,
                articles: Arc::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<Article>> {
        self.installed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .articles
            .clone()
    }

    /// Returns `false` when a newer result is already installed.
    pub(crate) fn install(&self, ticket: u64, articles: Vec<Article>) -> bool {
        let mut installed = self
            .installed
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if ticket <= installed.sequence {
            return false;
        }
        installed.sequence = ticket;
        installed.articles = Arc::new(articles);
        true
    }
}
