use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use genregraph_common::Config;
use genregraph_graph::run_genre_query;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("genres=info".parse()?))
        .init();

    let config = Config::from_env();
    let state = std::env::var("GENRE_STATE").unwrap_or_else(|_| "Texas".to_string());

    info!(state = %state, "running genre ranking");
    let genres = run_genre_query(
        &config.neo4j_uri,
        &config.neo4j_database,
        &config.neo4j_user,
        &config.neo4j_password,
        &state,
    )
    .await?;

    for genre in &genres {
        println!("{genre}");
    }

    Ok(())
}
