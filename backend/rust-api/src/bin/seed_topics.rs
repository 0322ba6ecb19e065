use tracing_subscriber::fmt::init;

use ai_quiz_api::{
    config::Config,
    services::{seed::seed_topics, store::MongoTopicStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::load()?;

    let mongo_client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
    let db = mongo_client.database(&config.mongo_database);

    let store = MongoTopicStore::new(&db);
    store.ensure_indexes().await?;

    let inserted = seed_topics(&store).await?;
    tracing::info!("Upserted {} topics into '{}'", inserted, config.mongo_database);

    Ok(())
}
