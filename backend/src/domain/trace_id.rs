//! Correlation id for one Jobly HTTP request.
//!
//! The trace middleware generates a [`TraceId`] per request and runs the
//! handler inside [`TraceId::scope`]. Anything executed on that task, such as
//! company and job handlers or the `Error` constructors, reads it back with
//! [`TraceId::current`]; the same value goes out in the `trace-id` response
//! header and the `traceId` field of error bodies.
//!
//! The value lives in a Tokio task-local and is not visible from tasks spawned
//! off the request task. Wrap such work in [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    pub(crate) static TRACE_ID: TraceId;
}

/// UUID v4 tying a request's log lines to the response it produced.
///
/// # Examples
/// ```
/// use jobly::domain::TraceId;
///
/// async fn list_jobs() {
///     let trace = TraceId::current_string().unwrap_or_default();
///     tracing::debug!(trace_id = %trace, "listing jobs");
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being served on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// [`TraceId::current`] rendered for error payloads and headers.
    #[must_use]
    pub fn current_string() -> Option<String> {
        Self::current().map(|id| id.to_string())
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// ```
    /// use jobly::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "6f1c9a52-3b0e-4d8a-9a7e-0c2f1e4b5d6a".parse().expect("uuid");
    /// let seen = TraceId::scope(id, async { TraceId::current_string() }).await;
    /// assert_eq!(seen.as_deref(), Some("6f1c9a52-3b0e-4d8a-9a7e-0c2f1e4b5d6a"));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
