use crate::{ParameterList, Result, RowSet};
use std::{borrow::Cow, future::Future};

/// Server side of prepared statements, implemented by drivers.
///
/// The transport, the protocol framing and the decoding of results belong to the
/// implementation. This crate only relies on these operations to register statements
/// lazily and to run them with already encoded parameters.
pub trait Connection: Send + Sized {
    /// Open a connection to the given URL.
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>> + Send;

    /// Prepare `sql` on the server under `name` (empty for the anonymous statement).
    fn prepare(&mut self, name: &str, sql: &str) -> impl Future<Output = Result<()>> + Send;

    /// Execute a statement previously prepared under `name`.
    fn execute_prepared(
        &mut self,
        name: &str,
        params: &ParameterList,
    ) -> impl Future<Output = Result<RowSet>> + Send;

    /// Does the server currently hold a prepared statement called `name`?
    fn is_prepared(&self, name: &str) -> bool;

    /// Deallocate the prepared statement `name` on the server.
    fn unprepare(&mut self, name: &str) -> impl Future<Output = Result<()>> + Send;
}
