//! In-memory test double for [`ArticleStore`](crate::ArticleStore).

mod store;

pub use store::*;
