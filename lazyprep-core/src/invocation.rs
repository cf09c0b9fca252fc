use crate::{
    AsValue, Connection, Error, ParameterList, Result, RowSet, Session, StatementError, WireValue,
    encoder::encode, statement_label,
};

/// Parameters collected for one execution of a prepared statement.
///
/// Values are encoded as soon as they are appended and bind to the placeholders in the
/// order they were appended: the first to `$1`, the second to `$2` and so on. Whether a
/// value travels as text or binary is decided by its type, see [`AsValue`].
///
/// **Beware of zero bytes.** A text parameter ends at its first zero byte, anything after
/// it is silently dropped. Pass a [`crate::Binary`] when zero bytes must reach the server.
pub struct Invocation<'s, C: Connection> {
    session: &'s mut Session<C>,
    statement: String,
    params: ParameterList,
}

impl<'s, C: Connection> Invocation<'s, C> {
    pub(crate) fn new(session: &'s mut Session<C>, statement: String) -> Self {
        Self {
            session,
            statement,
            params: ParameterList::new(),
        }
    }

    /// Name of the statement being invoked.
    pub fn name(&self) -> &str {
        &self.statement
    }

    /// Has the statement been defined on this connection?
    pub fn exists(&self) -> bool {
        self.session.registry.exists(&self.statement)
    }

    /// Parameters appended so far.
    pub fn params(&self) -> &ParameterList {
        &self.params
    }

    /// Append the next parameter.
    pub fn append(&mut self, value: impl AsValue) -> Result<&mut Self> {
        self.append_nullable(value, true)
    }

    /// Append the next parameter, sending NULL instead when `nonnull` is false.
    pub fn append_nullable(&mut self, value: impl AsValue, nonnull: bool) -> Result<&mut Self> {
        let placeholder = self.params.len() + 1;
        let value = encode(value.as_value(), nonnull, Some(placeholder)).map_err(|e| {
            e.context(format!(
                "While binding the parameters of `{}`",
                statement_label(&self.statement)
            ))
        })?;
        self.params.push(value);
        Ok(self)
    }

    /// Append a NULL parameter.
    pub fn append_null(&mut self) -> &mut Self {
        self.params.push(WireValue::Null);
        self
    }

    /// Remove every parameter appended so far.
    pub fn clear(&mut self) -> &mut Self {
        self.params = ParameterList::new();
        self
    }

    /// Run the statement with the parameters appended so far.
    ///
    /// The first execution of a named statement prepares it on the server. A statement that
    /// was never defined fails with [`StatementError::UnknownStatement`] before anything is
    /// sent. The parameters are kept, the invocation can be executed again.
    pub async fn execute(&mut self) -> Result<RowSet> {
        let name = self.statement.as_str();
        if !self.session.registry.exists(name) {
            let error = Error::new(StatementError::unknown(name));
            log::error!("{:#}", error);
            return Err(error);
        }
        self.session.register(name).await?;
        log::debug!(
            "Executing prepared statement `{}` with {}",
            statement_label(name),
            self.params
        );
        self.session
            .connection
            .execute_prepared(name, &self.params)
            .await
            .map_err(|e| {
                let error = Error::new(StatementError::exec_failed(name, e)).context(format!(
                    "While executing `{}` with parameters {}",
                    statement_label(name),
                    self.params
                ));
                log::error!("{:#}", error);
                error
            })
    }
}
