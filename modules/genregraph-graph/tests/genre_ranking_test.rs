//! Integration tests against a real Neo4j instance.
//! Run with: cargo test -p genregraph-graph --features test-utils --test genre_ranking_test

#![cfg(feature = "test-utils")]

use genregraph_graph::testutil::neo4j_container;
use genregraph_graph::{
    query, run_genre_query, typed_column, ColumnProblem, ColumnValue, GenreReader, GraphClient,
    GraphError,
};

/// One Texas user: 5 watched movies tagged Action, 3 tagged Comedy.
async fn seed_texas_watcher(client: &GraphClient) {
    let cypher = "CREATE (u:User {name: 'Ana', state: 'Texas'})
         WITH u
         UNWIND range(1, 5) AS i
         CREATE (u)-[:WATCHED]->(:Movie {title: 'Action ' + toString(i)})-[:HAS]->(:Genre {name: 'Action'})
         WITH DISTINCT u
         UNWIND range(1, 3) AS j
         CREATE (u)-[:WATCHED]->(:Movie {title: 'Comedy ' + toString(j)})-[:HAS]->(:Genre {name: 'Comedy'})";
    client
        .inner()
        .run(query(cypher))
        .await
        .expect("seeding failed");
}

#[tokio::test]
async fn ranks_genres_by_descending_watch_frequency() {
    let (_container, client) = neo4j_container().await;
    seed_texas_watcher(&client).await;

    let reader = GenreReader::new(client);
    let genres = reader.genres_for_state("Texas").await.unwrap();

    assert_eq!(genres, vec!["Action".to_string(), "Comedy".to_string()]);
}

#[tokio::test]
async fn state_without_users_yields_empty_sequence() {
    let (_container, client) = neo4j_container().await;
    seed_texas_watcher(&client).await;

    let reader = GenreReader::new(client);
    let genres = reader.genres_for_state("Vermont").await.unwrap();

    assert!(genres.is_empty());
}

#[tokio::test]
async fn non_string_genre_name_is_a_hard_failure() {
    let (_container, client) = neo4j_container().await;
    client
        .inner()
        .run(query(
            "CREATE (:User {state: 'Utah'})-[:WATCHED]->(:Movie {title: 'M'})-[:HAS]->(:Genre {name: 42})",
        ))
        .await
        .expect("seeding failed");

    let reader = GenreReader::new(client);
    let err = reader
        .genres_for_state("Utah")
        .await
        .expect_err("a non-string genre column must fail, not be skipped");

    match err {
        GraphError::ColumnExtraction { column, problem } => {
            assert_eq!(column, "genre");
            assert_eq!(problem, ColumnProblem::WrongType);
        }
        other => panic!("expected ColumnExtraction, got {other:?}"),
    }
}

#[tokio::test]
async fn row_without_the_column_classifies_as_absent() {
    let (_container, client) = neo4j_container().await;

    let mut stream = client
        .inner()
        .execute(query("RETURN 1 AS freq"))
        .await
        .unwrap();
    let row = stream.next().await.unwrap().expect("one row");

    assert_eq!(typed_column::<String>(&row, "genre"), ColumnValue::Absent);
}

#[tokio::test]
async fn genre_node_without_a_name_is_reported_absent() {
    let (_container, client) = neo4j_container().await;
    // The HAS edge exists but the Genre node carries no name property, so
    // the genre column comes back null.
    client
        .inner()
        .run(query(
            "CREATE (:User {state: 'Ohio'})-[:WATCHED]->(:Movie {title: 'M'})-[:HAS]->(:Genre)",
        ))
        .await
        .expect("seeding failed");

    let reader = GenreReader::new(client);
    let err = reader
        .genres_for_state("Ohio")
        .await
        .expect_err("a nameless genre must fail, not be skipped");

    match err {
        GraphError::ColumnExtraction { column, problem } => {
            assert_eq!(column, "genre");
            assert_eq!(problem, ColumnProblem::Absent);
        }
        other => panic!("expected ColumnExtraction, got {other:?}"),
    }
}

#[tokio::test]
async fn run_genre_query_end_to_end() {
    let (container, client) = neo4j_container().await;
    seed_texas_watcher(&client).await;

    let host_port = container
        .get_host_port_ipv4(7687)
        .await
        .expect("Failed to get Neo4j host port");
    let uri = format!("bolt://127.0.0.1:{host_port}");

    let genres = run_genre_query(&uri, "neo4j", "neo4j", "test", "Texas")
        .await
        .unwrap();

    assert_eq!(genres, vec!["Action".to_string(), "Comedy".to_string()]);
}
