use crate::{dates, types::parse_tags, Article, ArticleDraft, ArticleId, CollectionError};
use chrono::NaiveDateTime;

/// Image shown when an article has neither an embedded nor a URL image.
pub const PLACEHOLDER_IMAGE: &str = "assets/img/img1.jpg";

impl ArticleDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set tags from a comma-joined form value such as `"a, b, c"`.
    #[must_use]
    pub fn with_joined_tags(mut self, joined: &str) -> Self {
        self.tags = parse_tags(joined);
        self
    }

    #[must_use]
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_embedded_image(mut self, data_url: impl Into<String>) -> Self {
        self.image_embedded = Some(data_url.into());
        self
    }

    #[must_use]
    pub fn with_gallery_urls(mut self, urls: Vec<String>) -> Self {
        self.gallery_urls = urls;
        self
    }

    #[must_use]
    pub fn with_embedded_gallery(mut self, data_urls: Vec<String>) -> Self {
        self.gallery_embedded = data_urls;
        self
    }

    /// Check the fields a store write requires.
    pub fn validate(&self) -> Result<(), CollectionError> {
        if self.title.trim().is_empty() {
            return Err(CollectionError::InvalidInput(
                "Article title is required".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(CollectionError::InvalidInput(
                "Article description is required".to_string(),
            ));
        }
        Ok(())
    }

    /// The publish date parsed into an instant, if it can be resolved.
    pub fn publish_date(&self) -> Option<NaiveDateTime> {
        self.published
            .as_deref()
            .and_then(dates::parse_publish_date)
    }

    /// The single displayable primary image: embedded, then URL, then the
    /// placeholder. Never empty.
    pub fn primary_image(&self) -> &str {
        self.stored_image().unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// The primary image the article actually carries, without the
    /// placeholder.
    pub fn stored_image(&self) -> Option<&str> {
        non_empty(self.image_embedded.as_deref()).or_else(|| non_empty(self.image_url.as_deref()))
    }

    /// The gallery to display: the embedded gallery when it has images,
    /// otherwise the URL gallery.
    pub fn gallery(&self) -> &[String] {
        if self.gallery_embedded.is_empty() {
            &self.gallery_urls
        } else {
            &self.gallery_embedded
        }
    }

    /// Lower-cased `title description body`, the haystack for free-text
    /// search.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title.to_lowercase(),
            self.description.to_lowercase(),
            self.body.as_deref().unwrap_or_default().to_lowercase()
        )
    }
}

impl Article {
    pub fn new(id: impl Into<ArticleId>, content: ArticleDraft) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    /// Drop the id, keeping the content.
    pub fn into_draft(self) -> ArticleDraft {
        self.content
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
