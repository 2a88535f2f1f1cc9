mod client;
mod client_utils;
pub mod dates;
mod errors;
pub mod media;
mod notice;
pub mod opentelemetry;
pub mod rest;
mod store;
pub mod store_test;
mod types;
mod types_ext;

pub use client::CollectionClient;
pub use errors::*;
pub use media::EmbeddedImage;
pub use notice::{FailureNotice, NoticeLog, NoticeSink, TracingNotices, WriteKind};
pub use rest::{RestStore, RestStoreOptions};
pub use store::ArticleStore;
pub use types::*;
pub use types_ext::PLACEHOLDER_IMAGE;
