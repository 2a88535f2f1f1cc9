use crate::{
    client_utils,
    opentelemetry::{trace_operation, StoreOperation, StoreSpan},
    Article, ArticleDraft, ArticleId, ArticleStore, CollectionError, CollectionResult,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Method,
};
use serde_json::Value;
use std::{collections::HashMap, env};

const STORE_NAME: &str = "rest";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_RESOURCE: &str = "articles";
pub const BASE_URL_ENV: &str = "NEWSROOM_API_URL";
pub const RESOURCE_ENV: &str = "NEWSROOM_RESOURCE";

/// Article store backed by a json-server style REST resource:
/// `GET|POST /{resource}` and `GET|PUT|DELETE /{resource}/{id}`.
pub struct RestStore {
    base_url: String,
    resource: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct RestStoreOptions {
    pub base_url: Option<String>,
    pub resource: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl RestStoreOptions {
    /// Read `NEWSROOM_API_URL` and `NEWSROOM_RESOURCE`, leaving unset
    /// variables to the defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(BASE_URL_ENV).ok().filter(|value| !value.is_empty()),
            resource: env::var(RESOURCE_ENV).ok().filter(|value| !value.is_empty()),
            ..Default::default()
        }
    }
}

impl RestStore {
    #[must_use]
    pub fn new(mut options: RestStoreOptions) -> Self {
        let base_url = options
            .base_url
            .take()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let resource = options
            .resource
            .take()
            .unwrap_or_else(|| DEFAULT_RESOURCE.to_string())
            .trim_matches('/')
            .to_string();

        let client = options.client.take().unwrap_or_default();

        let headers = options.headers.unwrap_or_default();

        Self {
            base_url,
            resource,
            client,
            headers,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    /// The id is percent-encoded as a single path segment.
    pub fn article_url(&self, id: &ArticleId) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.resource,
            urlencoding::encode(&id.to_string())
        )
    }

    fn request_headers(&self) -> CollectionResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                CollectionError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                CollectionError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ArticleStore for RestStore {
    fn name(&self) -> &'static str {
        STORE_NAME
    }

    async fn list(&self) -> CollectionResult<Vec<Article>> {
        let url = self.collection_url();
        let span = StoreSpan::new(STORE_NAME, StoreOperation::List, None).with_url(&url);
        trace_operation(span, async {
            let headers = self.request_headers()?;
            let documents: Vec<Value> =
                client_utils::send_json::<(), _>(&self.client, Method::GET, &url, None, headers)
                    .await?;
            Ok(read_documents(documents))
        })
        .await
    }

    async fn get(&self, id: &ArticleId) -> CollectionResult<Article> {
        let url = self.article_url(id);
        let span = StoreSpan::new(STORE_NAME, StoreOperation::Get, Some(id)).with_url(&url);
        trace_operation(span, async {
            let headers = self.request_headers()?;
            client_utils::send_json::<(), _>(&self.client, Method::GET, &url, None, headers).await
        })
        .await
    }

    async fn create(&self, draft: &ArticleDraft) -> CollectionResult<Article> {
        let url = self.collection_url();
        let span = StoreSpan::new(STORE_NAME, StoreOperation::Create, None).with_url(&url);
        trace_operation(span, async {
            draft.validate()?;
            let headers = self.request_headers()?;
            client_utils::send_json(&self.client, Method::POST, &url, Some(draft), headers).await
        })
        .await
    }

    async fn update(&self, id: &ArticleId, article: &Article) -> CollectionResult<Article> {
        let url = self.article_url(id);
        let span = StoreSpan::new(STORE_NAME, StoreOperation::Update, Some(id)).with_url(&url);
        trace_operation(span, async {
            article.content.validate()?;
            if article.id.to_string() != id.to_string() {
                return Err(CollectionError::InvalidInput(format!(
                    "Article id {} does not match update target {id}",
                    article.id
                )));
            }
            let headers = self.request_headers()?;
            client_utils::send_json(&self.client, Method::PUT, &url, Some(article), headers).await
        })
        .await
    }

    async fn delete(&self, id: &ArticleId) -> CollectionResult<()> {
        let url = self.article_url(id);
        let span = StoreSpan::new(STORE_NAME, StoreOperation::Delete, Some(id)).with_url(&url);
        trace_operation(span, async {
            let headers = self.request_headers()?;
            client_utils::send_empty(&self.client, Method::DELETE, &url, headers).await
        })
        .await
    }
}

// One unreadable document is skipped instead of failing the whole listing.
fn read_documents(documents: Vec<Value>) -> Vec<Article> {
    documents
        .into_iter()
        .filter_map(|document| {
            serde_json::from_value::<Article>(document)
                .inspect_err(|error| {
                    tracing::warn!(store = STORE_NAME, %error, "skipping unreadable article document");
                })
                .ok()
        })
        .collect()
}
