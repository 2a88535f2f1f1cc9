use newsroom_client::Article;

/// Bucket for articles without a category.
pub const UNCATEGORIZED: &str = "Outros";

/// Categories shown first, in this order, by [`CategoryCounts::chart`].
pub const KNOWN_CATEGORIES: [&str; 5] = [
    "Em Alta",
    "Notícias Recentes",
    "Transferências",
    "Lesões",
    "Campeonatos",
];

/// Count the whole snapshot by category, see [`CategoryCounts::from_articles`].
pub fn category_counts(articles: &[Article], uncategorized: &str) -> CategoryCounts {
    CategoryCounts::from_articles(articles, uncategorized)
}

/// Article counts per literal category label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    /// Count `articles` by category. Articles without a category count under
    /// `uncategorized`.
    pub fn from_articles<'a, I>(articles: I, uncategorized: &str) -> Self
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut counts = Self::default();
        for article in articles {
            let label = article
                .content
                .category
                .as_deref()
                .filter(|category| !category.is_empty())
                .unwrap_or(uncategorized);
            counts.increment(label);
        }
        counts
    }

    fn increment(&mut self, label: &str) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(known, _)| known == label) {
            *count += 1;
        } else {
            self.entries.push((label.to_string(), 1));
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(known, _)| known == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Chart series: every `known` label first, in order and zero-filled,
    /// then the remaining labels in first-seen order. `known` only orders the
    /// output; it never hides a label.
    pub fn chart<S: AsRef<str>>(&self, known: &[S]) -> Vec<(String, usize)> {
        let mut series: Vec<(String, usize)> = known
            .iter()
            .map(|label| (label.as_ref().to_string(), self.get(label.as_ref())))
            .collect();

        for (label, count) in &self.entries {
            if !series.iter().any(|(known, _)| known == label) {
                series.push((label.clone(), *count));
            }
        }
        series
    }
}
