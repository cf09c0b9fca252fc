use crate::{
    Connection, Error, Invocation, Result, StatementError, StatementRegistry, statement_label,
    truncate_long,
};
use std::borrow::Cow;

/// A connection together with the prepared statements defined on it.
///
/// Statements are defined with [`Session::prepare`] and reach the server only when they are
/// first executed through [`Session::invoke`]. Each named statement is prepared at most
/// once per connection, the anonymous one (empty name) on every execution.
///
/// ```rust,ignore
/// session.prepare("find", "SELECT * FROM employee WHERE name = $1 AND salary > $2")?;
/// let rows = session
///     .invoke("find")
///     .append("Xavier")?
///     .append(50000)?
///     .execute()
///     .await?;
/// ```
pub struct Session<C: Connection> {
    pub(crate) connection: C,
    pub(crate) registry: StatementRegistry,
}

impl<C: Connection> Session<C> {
    pub fn new(connection: C) -> Self {
        Self {
            connection,
            registry: StatementRegistry::new(),
        }
    }

    /// Connect through the driver and start with no statements defined.
    pub async fn connect(url: impl Into<Cow<'static, str>>) -> Result<Self> {
        Ok(Self::new(C::connect(url.into()).await?))
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn registry(&self) -> &StatementRegistry {
        &self.registry
    }

    pub fn into_inner(self) -> (C, StatementRegistry) {
        (self.connection, self.registry)
    }

    /// Define a statement. Nothing is sent to the server yet.
    pub fn prepare(&mut self, name: &str, sql: impl Into<String>) -> Result<()> {
        self.registry.define(name, sql)
    }

    /// Prepare `name` on the server right away instead of waiting for its first execution.
    pub async fn prepare_now(&mut self, name: &str) -> Result<()> {
        self.register(name).await
    }

    /// Has a statement of this name been defined?
    pub fn exists(&self, name: &str) -> bool {
        self.registry.exists(name)
    }

    /// Start an invocation of the statement `name`.
    pub fn invoke(&mut self, name: impl Into<String>) -> Invocation<'_, C> {
        Invocation::new(self, name.into())
    }

    /// Drop the definition of `name`, deallocating it on the server if it was prepared there.
    pub async fn unprepare(&mut self, name: &str) -> Result<()> {
        let Some(def) = self.registry.get(name) else {
            let error = Error::new(StatementError::unknown(name));
            log::error!("{:#}", error);
            return Err(error);
        };
        if def.is_registered() {
            self.connection.unprepare(name).await.map_err(|e| {
                let e = e.context(format!(
                    "While deallocating prepared statement `{}`",
                    statement_label(name)
                ));
                log::error!("{:#}", e);
                e
            })?;
        }
        self.registry.remove(name);
        log::debug!("Dropped prepared statement `{}`", statement_label(name));
        Ok(())
    }

    /// Forget every registration, the statements will be prepared again on first use.
    /// Call it after the underlying connection was reestablished.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    /// Align the registration flags with what the server reports as prepared.
    pub fn sync_registrations(&mut self) {
        let names = self
            .registry
            .iter()
            .filter(|def| !def.is_anonymous())
            .map(|def| def.name().to_owned())
            .collect::<Vec<_>>();
        for name in names {
            let prepared = self.connection.is_prepared(&name);
            self.registry.set_registered(&name, prepared);
        }
    }

    /// Make sure `name` is prepared on the server.
    ///
    /// A refused preparation leaves the statement unregistered, so the next attempt sends it
    /// again. Nothing is retried here.
    pub(crate) async fn register(&mut self, name: &str) -> Result<()> {
        let Some(def) = self.registry.get(name) else {
            let error = Error::new(StatementError::unknown(name));
            log::error!("{:#}", error);
            return Err(error);
        };
        if def.is_registered() {
            return Ok(());
        }
        log::debug!(
            "Preparing statement `{}` on the server",
            statement_label(name)
        );
        if let Err(e) = self.connection.prepare(name, def.sql()).await {
            let error = Error::new(StatementError::prepare_failed(name, e)).context(format!(
                "While preparing the query:\n{}",
                truncate_long!(def.sql())
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        self.registry.mark_registered(name)
    }
}
