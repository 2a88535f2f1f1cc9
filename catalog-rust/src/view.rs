use crate::summary::CategoryCounts;
use newsroom_client::Article;
use std::sync::Arc;

/// One rendering of the listing page: the filtered articles plus category
/// counts over the whole snapshot.
#[derive(Debug, Clone)]
pub struct CatalogView {
    snapshot: Arc<Vec<Article>>,
    matched: Vec<usize>,
    counts: CategoryCounts,
    chart: Vec<(String, usize)>,
}

impl CatalogView {
    pub(crate) fn new(
        snapshot: Arc<Vec<Article>>,
        matched: Vec<usize>,
        counts: CategoryCounts,
        chart: Vec<(String, usize)>,
    ) -> Self {
        Self {
            snapshot,
            matched,
            counts,
            chart,
        }
    }

    /// Matching articles in snapshot order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.matched.iter().map(|index| &self.snapshot[*index])
    }

    /// The result count shown above the list.
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Size of the snapshot the view was computed from.
    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    /// Counts over the unfiltered snapshot.
    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    /// Chart series with the known categories first.
    pub fn chart(&self) -> &[(String, usize)] {
        &self.chart
    }
}
