use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::closer::ResourceKind;

/// Errors produced while running queries against the graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Establishing the driver connection failed.
    #[error("connection failed: {0}")]
    Connection(#[source] neo4rs::Error),

    /// The server rejected or failed the query.
    #[error("query execution failed: {0}")]
    QueryExecution(#[source] neo4rs::Error),

    /// A returned record did not carry the requested column as the expected
    /// type. Records with a bad column are a hard failure, never skipped.
    #[error("column `{column}` {problem}")]
    ColumnExtraction {
        column: String,
        problem: ColumnProblem,
    },

    /// Closing a resource failed with no earlier error in flight.
    #[error("failed to close {kind}: {message}")]
    ResourceClose { kind: ResourceKind, message: String },

    /// Closing a resource failed while an earlier error was already in
    /// flight. The close failure is carried in the message; the initial
    /// error stays recoverable through `source()`.
    ///
    /// The prior error lives behind an `Arc`, not a `Box`: `Box<GraphError>`
    /// is itself an `Error`, so the generated `source()` would surface the
    /// box as the concrete type and `downcast_ref::<GraphError>()` on the
    /// chain would fail. `Arc` has no `Error` impl, so `source()` resolves
    /// through deref to the `GraphError` itself.
    #[error("{kind} closure error occurred: {close_message}; initial error: {source}")]
    ComposedClose {
        kind: ResourceKind,
        close_message: String,
        #[source]
        source: Arc<GraphError>,
    },
}

/// Why a column extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnProblem {
    Absent,
    WrongType,
}

impl fmt::Display for ColumnProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnProblem::Absent => "is missing from the record",
            ColumnProblem::WrongType => "has an unexpected type",
        })
    }
}
