//! Deferred-close error composition.
//!
//! Every resource acquired during a run must be released on every exit path,
//! and a close-time failure must never silently replace a more meaningful
//! error that is already in flight. `compose_close` implements that merge;
//! `compose_close_all` unwinds a whole acquisition stack in reverse order.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::GraphError;

/// Kind tag for a closeable resource, supplied explicitly by the
/// implementor and used in close-failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Driver,
    Session,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Driver => "driver",
            ResourceKind::Session => "session",
        })
    }
}

/// A handle that must be released before a run returns its result.
#[async_trait]
pub trait Closeable: Send {
    /// Kind tag reported in close-failure messages.
    fn kind(&self) -> ResourceKind;

    /// Release the resource. Called at most once per resource.
    async fn close(&mut self) -> anyhow::Result<()>;
}

/// Close `resource` exactly once, merging any close failure with an error
/// already in flight.
///
/// - close ok, no prior error: returns `None`.
/// - close ok, prior error: returns the prior error unchanged.
/// - close failed, no prior error: returns the close failure, tagged with
///   the resource kind.
/// - close failed, prior error: returns a composed error embedding the
///   close-failure message and keeping the prior error as its `source()`,
///   so callers can still recover it by chain inspection.
pub async fn compose_close<C>(resource: &mut C, prior: Option<GraphError>) -> Option<GraphError>
where
    C: Closeable + ?Sized,
{
    match resource.close().await {
        Ok(()) => prior,
        Err(close_err) => Some(match prior {
            None => GraphError::ResourceClose {
                kind: resource.kind(),
                message: close_err.to_string(),
            },
            Some(initial) => GraphError::ComposedClose {
                kind: resource.kind(),
                close_message: close_err.to_string(),
                source: Arc::new(initial),
            },
        }),
    }
}

/// Close every resource in strict reverse acquisition order (last acquired,
/// first closed), threading the running error through each close.
pub async fn compose_close_all(
    resources: &mut [Box<dyn Closeable>],
    mut prior: Option<GraphError>,
) -> Option<GraphError> {
    for resource in resources.iter_mut().rev() {
        prior = compose_close(resource.as_mut(), prior).await;
    }
    prior
}
