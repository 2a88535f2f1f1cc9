use dotenvy::dotenv;
use newsroom_catalog::{Catalog, CatalogParams, FilterControls};
use newsroom_client::{RestStore, RestStoreOptions};
use std::{env, sync::Arc};
use tracing_subscriber::EnvFilter;

// Prints the listing page for a running collection store. Filter controls are
// read from the environment, e.g. `CATEGORY=Lesões TAG=derby`.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = RestStore::new(RestStoreOptions::from_env());
    let catalog = Catalog::new(CatalogParams::new(Arc::new(store)));
    catalog.reload().await;

    let controls = FilterControls {
        category: env::var("CATEGORY").ok(),
        featured: env::var("FEATURED").ok(),
        query: env::var("QUERY").ok(),
        tag: env::var("TAG").ok(),
        start_date: env::var("START_DATE").ok(),
        end_date: env::var("END_DATE").ok(),
    };
    let view = catalog.view_controls(&controls);

    println!("{} of {} articles", view.len(), view.total());
    for article in view.articles() {
        println!(
            "[{}] {} ({})",
            article.id,
            article.content.title,
            article.content.category.as_deref().unwrap_or("-")
        );
    }

    println!();
    for (category, count) in view.chart() {
        println!("{category:>20} {count}");
    }

    println!();
    for article in catalog.highlights() {
        println!("highlight: {}", article.content.title);
    }
}
