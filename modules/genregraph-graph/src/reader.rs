use neo4rs::{query, Row};
use serde::de::DeserializeOwned;

use crate::client::GraphClient;
use crate::closer::compose_close;
use crate::error::{ColumnProblem, GraphError};

/// Genres watched by users in a state, most-watched first. Read-only; the
/// one caller-supplied value travels as the `$state` parameter, never by
/// string interpolation.
const GENRES_BY_STATE: &str = "MATCH (u:User {state: $state})-[:WATCHED]->(m)-[:HAS]->(g:Genre)
     RETURN g.name AS genre, count(g) AS freq
     ORDER BY freq DESC";

/// Read-only wrapper for the genre graph.
pub struct GenreReader {
    client: GraphClient,
}

impl GenreReader {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Genre names watched by users in `state`, in server-returned order
    /// (descending watch frequency). A record whose `genre` column is
    /// absent, null, or not a string is a hard failure, never a silent
    /// skip.
    pub async fn genres_for_state(&self, state: &str) -> Result<Vec<String>, GraphError> {
        let q = query(GENRES_BY_STATE).param("state", state);
        let mut stream = self
            .client
            .graph
            .execute(q)
            .await
            .map_err(GraphError::QueryExecution)?;

        let mut genres = Vec::new();
        while let Some(row) = stream.next().await.map_err(GraphError::QueryExecution)? {
            match typed_column::<String>(&row, "genre") {
                ColumnValue::Found(genre) => genres.push(genre),
                ColumnValue::Absent => {
                    return Err(GraphError::ColumnExtraction {
                        column: "genre".to_string(),
                        problem: ColumnProblem::Absent,
                    })
                }
                ColumnValue::WrongType => {
                    return Err(GraphError::ColumnExtraction {
                        column: "genre".to_string(),
                        problem: ColumnProblem::WrongType,
                    })
                }
            }
        }
        Ok(genres)
    }
}

/// Outcome of extracting one named column from a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue<T> {
    Found(T),
    Absent,
    WrongType,
}

/// Typed column accessor. Distinguishes a missing column from one whose
/// value has the wrong type by re-checking with a type that accepts any
/// plain value. A column holding a null (e.g. a node without the property)
/// counts as `Absent`: there is no value, wrong-typed or otherwise.
pub fn typed_column<T: DeserializeOwned>(row: &Row, column: &str) -> ColumnValue<T> {
    match row.get::<T>(column) {
        Ok(value) => ColumnValue::Found(value),
        Err(_) => match row.get::<serde_json::Value>(column) {
            Ok(serde_json::Value::Null) => ColumnValue::Absent,
            Ok(_) => ColumnValue::WrongType,
            Err(_) => ColumnValue::Absent,
        },
    }
}

/// Connect, run the genre ranking for `state`, and release the connection
/// on every exit path. A close failure is merged with any error already in
/// flight instead of replacing it.
pub async fn run_genre_query(
    uri: &str,
    database: &str,
    user: &str,
    password: &str,
    state: &str,
) -> Result<Vec<String>, GraphError> {
    let mut client = GraphClient::connect(uri, database, user, password).await?;
    let reader = GenreReader::new(client.clone());

    let (genres, prior) = match reader.genres_for_state(state).await {
        Ok(genres) => (genres, None),
        Err(err) => (Vec::new(), Some(err)),
    };

    match compose_close(&mut client, prior).await {
        None => Ok(genres),
        Some(err) => Err(err),
    }
}
