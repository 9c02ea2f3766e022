use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph};

use crate::closer::{Closeable, ResourceKind};
use crate::error::GraphError;

/// Thin wrapper around neo4rs::Graph providing connection setup.
#[derive(Clone)]
pub struct GraphClient {
    pub(crate) graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given credentials, targeting `database`.
    pub async fn connect(
        uri: &str,
        database: &str,
        user: &str,
        password: &str,
    ) -> Result<Self, GraphError> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(database)
            .fetch_size(500)
            .max_connections(10)
            .build()
            .map_err(GraphError::Connection)?;
        let graph = Graph::connect(config).await.map_err(GraphError::Connection)?;
        // The pool connects lazily, which would defer an unreachable
        // endpoint to the first query. Run a trivial statement now so
        // connection-establishment failures keep their taxonomy.
        graph
            .run(query("RETURN 1"))
            .await
            .map_err(GraphError::Connection)?;
        Ok(Self { graph })
    }

    /// Get a reference to the underlying neo4rs Graph.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }
}

#[async_trait]
impl Closeable for GraphClient {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Driver
    }

    /// neo4rs has no explicit shutdown call; the connection pool is torn
    /// down when the last clone of the Graph drops. The hook exists so the
    /// run path threads the driver through the same close composition as
    /// every other resource.
    async fn close(&mut self) -> anyhow::Result<()> {
        tracing::debug!("releasing graph driver");
        Ok(())
    }
}
