pub mod client;
pub mod closer;
pub mod error;
pub mod reader;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use client::GraphClient;
pub use closer::{compose_close, compose_close_all, Closeable, ResourceKind};
pub use error::{ColumnProblem, GraphError};
pub use reader::{run_genre_query, typed_column, ColumnValue, GenreReader};

pub use neo4rs::query;
