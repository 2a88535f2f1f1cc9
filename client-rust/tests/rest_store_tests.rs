mod common;

use common::stub_server::{start_stub_server, BoxedError};
use newsroom_client::{
    ArticleDraft, ArticleId, ArticleStore, CollectionClient, CollectionError, FailureNotice,
    NoticeLog, RestStore, RestStoreOptions,
};
use serde_json::json;
use std::{collections::HashMap, sync::Arc};

fn rest_store(url: &str) -> RestStore {
    RestStore::new(RestStoreOptions {
        base_url: Some(format!("{url}/")),
        ..Default::default()
    })
}

fn client_with_log(store: RestStore) -> (CollectionClient, Arc<NoticeLog>) {
    let log = Arc::new(NoticeLog::new());
    let client = CollectionClient::new(Arc::new(store)).with_notices(log.clone());
    (client, log)
}

#[tokio::test]
async fn list_all_reads_legacy_documents() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![
        json!({
            "id": 1,
            "titulo": "Clássico no domingo",
            "descricao": "Prévia do jogo",
            "categoria": "Em Alta",
            "dataPublicacao": "2024-03-10",
            "tags": "Campeonato, Derby ,",
            "destaque": true,
            "imagem": "assets/img/derby.jpg"
        }),
        json!({
            "id": "b7f2",
            "titulo": "Reforço chega",
            "descricao": "Atacante assina contrato",
            "data": "",
            "data_publicacao": "2024-03-11",
            "tags": ["Transferências"],
            "destaque": null
        }),
    ])
    .await?;
    let (client, log) = client_with_log(rest_store(stub.url()));

    let articles = client.list_all().await;

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, ArticleId::Number(1));
    assert_eq!(articles[0].content.published.as_deref(), Some("2024-03-10"));
    assert_eq!(articles[0].content.tags, vec!["Campeonato", "Derby"]);
    assert!(articles[0].content.featured);
    assert_eq!(articles[0].content.primary_image(), "assets/img/derby.jpg");

    assert_eq!(articles[1].id, ArticleId::Text("b7f2".to_string()));
    assert_eq!(articles[1].content.published.as_deref(), Some("2024-03-11"));
    assert!(!articles[1].content.featured);
    assert!(log.notices().is_empty());

    let requests = stub.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/articles");

    stub.stop().await
}

#[tokio::test]
async fn created_article_appears_with_store_assigned_id() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![json!({
        "id": 7,
        "titulo": "Existing",
        "descricao": "Already there"
    })])
    .await?;
    let (client, _log) = client_with_log(rest_store(stub.url()));

    let draft = ArticleDraft::new("Nova contratação", "Clube anuncia meia")
        .with_category("Transferências")
        .with_published("2024-05-02")
        .with_joined_tags("mercado, meia")
        .with_featured(true);

    let created = client.create(&draft).await.ok_or("create failed")?;
    assert_eq!(created.id, ArticleId::Number(8));
    assert_eq!(created.content, draft);

    let requests = stub.requests().await;
    let body = requests[0].body.clone().ok_or("missing body")?;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(body["titulo"], "Nova contratação");
    assert_eq!(body["data"], "2024-05-02");
    assert_eq!(body["tags"], json!(["mercado", "meia"]));
    assert_eq!(body["destaque"], true);
    assert!(body.get("id").is_none());

    let listed = client.list_all().await;
    let ids: Vec<ArticleId> = listed.into_iter().map(|article| article.id).collect();
    assert_eq!(ids, vec![ArticleId::Number(7), ArticleId::Number(8)]);

    stub.stop().await
}

#[tokio::test]
async fn get_by_id_hides_missing_articles() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![json!({
        "id": 1,
        "titulo": "Only one",
        "descricao": "Single article"
    })])
    .await?;
    let store = rest_store(stub.url());

    let error = store
        .get(&ArticleId::Number(99))
        .await
        .expect_err("missing article is an error");
    assert!(matches!(
        error,
        CollectionError::StatusCode(status, _) if status == reqwest::StatusCode::NOT_FOUND
    ));

    let (client, log) = client_with_log(store);
    assert!(client.get_by_id(&ArticleId::Number(99)).await.is_none());
    let found = client
        .get_by_id(&ArticleId::from("1"))
        .await
        .ok_or("article 1 should exist")?;
    assert_eq!(found.content.title, "Only one");
    assert!(log.notices().is_empty());

    stub.stop().await
}

#[tokio::test]
async fn update_replaces_the_whole_record() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![json!({
        "id": 3,
        "titulo": "Old title",
        "descricao": "Old description",
        "imagemBase64": "data:image/png;base64,AAEC",
        "galeriaBase64": ["data:image/png;base64,AwQ="]
    })])
    .await?;
    let (client, _log) = client_with_log(rest_store(stub.url()));

    let mut article = client
        .get_by_id(&ArticleId::Number(3))
        .await
        .ok_or("article 3 should exist")?;
    article.content.title = "New title".to_string();
    article.content.image_embedded = None;
    article.content.gallery_embedded.clear();

    let updated = client
        .update(&ArticleId::Number(3), &article)
        .await
        .ok_or("update failed")?;
    assert_eq!(updated.content.title, "New title");
    assert_eq!(updated.content.image_embedded, None);

    let requests = stub.requests().await;
    let put = requests
        .iter()
        .find(|request| request.method == "PUT")
        .ok_or("no PUT request")?;
    assert_eq!(put.path, "/articles/3");
    assert_eq!(put.body.as_ref().map(|body| body["id"].clone()), Some(json!(3)));

    let documents = stub.documents().await;
    assert_eq!(documents.len(), 1);
    assert!(documents[0].get("imagemBase64").is_none());
    assert!(documents[0].get("galeriaBase64").is_none());

    stub.stop().await
}

#[tokio::test]
async fn update_rejects_mismatched_ids_without_a_request() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![]).await?;
    let store = rest_store(stub.url());

    let article = newsroom_client::Article::new(4, ArticleDraft::new("Title", "Description"));
    let error = store
        .update(&ArticleId::Number(5), &article)
        .await
        .expect_err("mismatched id is rejected");
    assert!(matches!(error, CollectionError::InvalidInput(_)));
    assert!(stub.requests().await.is_empty());

    stub.stop().await
}

#[tokio::test]
async fn delete_by_id_reports_success_and_failure() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![json!({
        "id": 2,
        "titulo": "To remove",
        "descricao": "Soon gone"
    })])
    .await?;
    let (client, _log) = client_with_log(rest_store(stub.url()));

    assert!(client.delete_by_id(&ArticleId::Number(2)).await);
    assert!(!client.delete_by_id(&ArticleId::Number(2)).await);
    assert!(stub.documents().await.is_empty());

    stub.stop().await
}

#[tokio::test]
async fn failed_list_returns_empty_and_reports_once() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![json!({
        "id": 1,
        "titulo": "Hidden",
        "descricao": "Server is failing"
    })])
    .await?;
    stub.set_broken(true).await;
    let (client, log) = client_with_log(rest_store(stub.url()));

    let articles = client.list_all().await;

    assert!(articles.is_empty());
    assert_eq!(log.notices(), vec![FailureNotice::LoadFailure]);

    stub.stop().await
}

#[tokio::test]
async fn unreachable_store_collapses_every_operation() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![]).await?;
    let url = stub.url().to_string();
    stub.stop().await?;

    let (client, log) = client_with_log(rest_store(&url));
    let draft = ArticleDraft::new("Title", "Description");
    let article = newsroom_client::Article::new(1, draft.clone());

    assert!(client.list_all().await.is_empty());
    assert!(client.get_by_id(&ArticleId::Number(1)).await.is_none());
    assert!(client.create(&draft).await.is_none());
    assert!(client.update(&ArticleId::Number(1), &article).await.is_none());
    assert!(!client.delete_by_id(&ArticleId::Number(1)).await);
    assert_eq!(log.notices(), vec![FailureNotice::LoadFailure]);
    Ok(())
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_sending() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![]).await?;
    let store = rest_store(stub.url());

    let error = store
        .create(&ArticleDraft::new("  ", "Description"))
        .await
        .expect_err("empty title is rejected");
    assert!(matches!(error, CollectionError::InvalidInput(_)));
    assert!(stub.requests().await.is_empty());

    stub.stop().await
}

#[tokio::test]
async fn custom_resource_and_headers_are_used() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![]).await?;
    let store = RestStore::new(RestStoreOptions {
        base_url: Some(stub.url().to_string()),
        resource: Some("/noticias/".to_string()),
        headers: Some(HashMap::from([(
            "x-newsroom-client".to_string(),
            "tests".to_string(),
        )])),
        ..Default::default()
    });
    assert_eq!(store.collection_url(), format!("{}/noticias", stub.url()));

    let articles = store.list().await?;
    assert!(articles.is_empty());

    let requests = stub.requests().await;
    assert_eq!(requests[0].path, "/noticias");
    assert_eq!(
        requests[0]
            .headers
            .get("x-newsroom-client")
            .and_then(|value| value.to_str().ok()),
        Some("tests")
    );

    stub.stop().await
}

#[tokio::test]
async fn invalid_header_names_are_input_errors() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![]).await?;
    let store = RestStore::new(RestStoreOptions {
        base_url: Some(stub.url().to_string()),
        headers: Some(HashMap::from([(
            "bad header".to_string(),
            "value".to_string(),
        )])),
        ..Default::default()
    });

    let error = store.list().await.expect_err("invalid header name");
    assert!(matches!(error, CollectionError::InvalidInput(_)));
    assert!(stub.requests().await.is_empty());

    stub.stop().await
}

#[tokio::test]
async fn unreadable_documents_do_not_hide_the_rest() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![
        json!({ "id": 1, "titulo": "Good", "descricao": "Plain record" }),
        json!({ "id": 2, "titulo": "Loose flag", "descricao": "d", "destaque": "true" }),
        json!({ "id": 3, "titulo": "Numeric date", "descricao": "d", "data": 20240101 }),
        json!({ "id": 4, "titulo": "Both keys", "title": "Ignored", "descricao": "d" }),
        json!({ "titulo": "No id", "descricao": "d" }),
        json!("not a document"),
    ])
    .await?;
    let (client, log) = client_with_log(rest_store(stub.url()));

    let articles = client.list_all().await;

    let titles: Vec<&str> = articles
        .iter()
        .map(|article| article.content.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Good", "Loose flag", "Numeric date", "Both keys"]);
    assert!(articles[1].content.featured);
    assert_eq!(articles[2].content.published, None);
    assert!(log.notices().is_empty());

    stub.stop().await
}

#[tokio::test]
async fn text_ids_are_sent_as_one_path_segment() -> Result<(), BoxedError> {
    let stub = start_stub_server(vec![json!({
        "id": "2024/derby final?",
        "titulo": "Derby",
        "descricao": "Text id"
    })])
    .await?;
    let store = rest_store(stub.url());
    let id = ArticleId::from("2024/derby final?");

    assert_eq!(
        store.article_url(&id),
        format!("{}/articles/2024%2Fderby%20final%3F", stub.url())
    );

    let (client, _log) = client_with_log(store);
    let found = client.get_by_id(&id).await.ok_or("text id should resolve")?;
    assert_eq!(found.id, id);
    assert!(client.delete_by_id(&id).await);
    assert!(stub.documents().await.is_empty());

    stub.stop().await
}
