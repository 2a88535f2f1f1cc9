mod cache;
mod catalog;
pub mod filter;
pub mod opentelemetry;
mod params;
pub mod summary;
mod view;

pub use catalog::Catalog;
pub use filter::{ArticleFilter, DateRange, FeaturedFilter, FilterControls};
pub use params::CatalogParams;
pub use summary::{category_counts, CategoryCounts};
pub use view::CatalogView;
