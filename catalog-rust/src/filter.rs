//! Filtering of the article snapshot.
//!
//! An [`ArticleFilter`] combines five independent dimensions (category,
//! featured flag, free text, tag and publish-date range). An article passes
//! only when it passes every active dimension; an empty dimension imposes no
//! condition. Filtering never mutates its input and always re-scans the whole
//! snapshot.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use newsroom_client::{dates, Article};
use serde::{Deserialize, Serialize};

/// Raw values of the listing page's filter controls.
/// A missing control behaves exactly like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterControls {
    pub category: Option<String>,
    /// `"true"`, `"false"` or empty.
    pub featured: Option<String>,
    pub query: Option<String>,
    pub tag: Option<String>,
    /// `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Tri-state featured control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeaturedFilter {
    #[default]
    Any,
    Featured,
    NotFeatured,
}

impl FeaturedFilter {
    /// `"true"` and `"false"` select a state; anything else matches all.
    pub fn from_control(value: &str) -> Self {
        match value {
            "true" => Self::Featured,
            "false" => Self::NotFeatured,
            _ => Self::Any,
        }
    }

    pub fn matches(self, featured: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Featured => featured,
            Self::NotFeatured => !featured,
        }
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// First instant of the start day.
    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        self.start.map(|start| start.and_time(NaiveTime::MIN))
    }

    /// Last millisecond of the end day, so a same-day bound covers the
    /// whole day.
    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        self.end
            .and_then(|end| end.and_hms_milli_opt(23, 59, 59, 999))
    }

    /// An undated article fails any active bound.
    pub fn contains(&self, date: Option<NaiveDateTime>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        if self.lower_bound().is_some_and(|lower| date < lower) {
            return false;
        }
        if self.upper_bound().is_some_and(|upper| date > upper) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    category: Option<String>,
    featured: FeaturedFilter,
    query: Option<String>,
    tag: Option<String>,
    dates: DateRange,
}

impl ArticleFilter {
    /// A filter with every dimension inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw control values. Date bounds that are not
    /// valid calendar dates are left inactive.
    pub fn from_controls(controls: &FilterControls) -> Self {
        let mut filter = Self::new();
        if let Some(category) = &controls.category {
            filter = filter.category(category);
        }
        if let Some(featured) = &controls.featured {
            filter = filter.featured(FeaturedFilter::from_control(featured));
        }
        if let Some(query) = &controls.query {
            filter = filter.query(query);
        }
        if let Some(tag) = &controls.tag {
            filter = filter.tag(tag);
        }
        filter.dates = DateRange {
            start: controls
                .start_date
                .as_deref()
                .and_then(dates::parse_calendar_date),
            end: controls
                .end_date
                .as_deref()
                .and_then(dates::parse_calendar_date),
        };
        filter
    }

    /// Exact category match. Empty matches all.
    #[must_use]
    pub fn category(mut self, category: &str) -> Self {
        self.category = non_empty(category).map(ToString::to_string);
        self
    }

    #[must_use]
    pub fn featured(mut self, featured: FeaturedFilter) -> Self {
        self.featured = featured;
        self
    }

    /// Case-insensitive substring of title, description and body.
    /// Empty matches all.
    #[must_use]
    pub fn query(mut self, query: &str) -> Self {
        self.query = non_empty(query).map(str::to_lowercase);
        self
    }

    /// Case-insensitive substring of any tag. Empty matches all.
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = non_empty(tag).map(str::to_lowercase);
        self
    }

    #[must_use]
    pub fn published_from(mut self, start: NaiveDate) -> Self {
        self.dates.start = Some(start);
        self
    }

    #[must_use]
    pub fn published_until(mut self, end: NaiveDate) -> Self {
        self.dates.end = Some(end);
        self
    }

    pub fn date_range(&self) -> DateRange {
        self.dates
    }

    /// True when no dimension is active.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.featured == FeaturedFilter::Any
            && self.query.is_none()
            && self.tag.is_none()
            && !self.dates.is_active()
    }

    pub fn matches(&self, article: &Article) -> bool {
        let content = &article.content;

        if let Some(category) = &self.category {
            if content.category.as_deref().unwrap_or_default() != category {
                return false;
            }
        }

        if !self.featured.matches(content.featured) {
            return false;
        }

        if let Some(query) = &self.query {
            if !content.search_text().contains(query.as_str()) {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            let tag_matches = content
                .tags
                .iter()
                .any(|candidate| candidate.to_lowercase().contains(tag.as_str()));
            if !tag_matches {
                return false;
            }
        }

        self.dates.contains(content.publish_date())
    }

    /// The articles passing the filter, in snapshot order.
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles
            .iter()
            .filter(|article| self.matches(article))
            .collect()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
