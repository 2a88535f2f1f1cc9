use crate::ArticleId;
use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

/// A user-visible failure. Transport errors and non-success statuses are
/// not distinguished at this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureNotice {
    /// Loading the collection failed.
    LoadFailure,
    /// Looking up an article failed, whether it is missing or the store is
    /// unreachable.
    NotFound(ArticleId),
    /// Creating or updating an article failed.
    WriteFailure(WriteKind),
    DeleteFailure(ArticleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

impl fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailure => f.write_str("Could not load articles. Check that the store is running."),
            Self::NotFound(id) => write!(f, "Article {id} not found."),
            Self::WriteFailure(WriteKind::Create) => f.write_str("Could not publish the article."),
            Self::WriteFailure(WriteKind::Update) => f.write_str("Could not update the article."),
            Self::DeleteFailure(id) => write!(f, "Could not delete article {id}."),
        }
    }
}

/// Error-reporting path for failures swallowed by the optional-result API.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: FailureNotice);
}

/// Logs every notice as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn notify(&self, notice: FailureNotice) {
        tracing::warn!(notice = ?notice, "{notice}");
    }
}

/// Collects notices so a UI (or a test) can drain them later.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<FailureNotice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Vec<FailureNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return every notice received so far.
    pub fn drain(&self) -> Vec<FailureNotice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NoticeSink for NoticeLog {
    fn notify(&self, notice: FailureNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
