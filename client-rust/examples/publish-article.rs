use dotenvy::dotenv;
use newsroom_client::{ArticleDraft, CollectionClient, RestStore, RestStoreOptions};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = CollectionClient::new(Arc::new(RestStore::new(RestStoreOptions::from_env())));

    let draft = ArticleDraft::new(
        "Clube confirma novo reforço",
        "Meia-atacante assina por três temporadas",
    )
    .with_category("Transferências")
    .with_author("Redação")
    .with_published("2024-05-02")
    .with_joined_tags("mercado, reforço")
    .with_featured(true);

    let Some(mut article) = client.create(&draft).await else {
        eprintln!("could not publish the article");
        return;
    };
    println!("published {}", article.id);

    article.content.title = "Clube confirma reforço para a temporada".to_string();
    if let Some(updated) = client.update(&article.id, &article).await {
        println!("updated: {}", updated.content.title);
    }

    let all = client.list_all().await;
    println!("{} articles in the collection", all.len());

    if client.delete_by_id(&article.id).await {
        println!("deleted {}", article.id);
    }
}
