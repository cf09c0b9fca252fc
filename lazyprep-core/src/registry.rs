use crate::{Error, Result, StatementError, is_valid_statement_name, statement_label, truncate_long};
use std::collections::{HashMap, hash_map};

/// Definition of a prepared statement known to a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDef {
    pub(crate) name: String,
    pub(crate) sql: String,
    pub(crate) registered: bool,
}

impl StatementDef {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            registered: false,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn sql(&self) -> &str {
        &self.sql
    }
    /// Has the server confirmed the preparation in the current session?
    pub fn is_registered(&self) -> bool {
        self.registered
    }
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// Statements defined on one connection, keyed by name.
///
/// Definitions are cheap: nothing reaches the server until the statement is first
/// executed. The empty name is the anonymous statement, it can be redefined at will and
/// never counts as registered, so every execution prepares it again.
#[derive(Default, Debug, Clone)]
pub struct StatementRegistry {
    statements: HashMap<String, StatementDef>,
}

impl StatementRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// True when a definition exists for `name`, registered or not.
    pub fn exists(&self, name: &str) -> bool {
        self.statements.contains_key(name)
    }

    /// Define `name` as `sql`, to be prepared lazily.
    ///
    /// Defining a named statement again with the same query is a no-op that keeps its
    /// registration. A different query is rejected with
    /// [`StatementError::DuplicateStatement`], except for the anonymous statement which is
    /// simply replaced.
    pub fn define(&mut self, name: &str, sql: impl Into<String>) -> Result<()> {
        let sql = sql.into();
        if !name.is_empty() && !is_valid_statement_name(name) {
            let error = Error::new(StatementError::InvalidName { name: name.into() });
            log::error!("{:#}", error);
            return Err(error);
        }
        match self.statements.entry(name.into()) {
            hash_map::Entry::Occupied(mut entry) => {
                let def = entry.get_mut();
                if def.sql == sql {
                    return Ok(());
                }
                if !def.is_anonymous() {
                    let error = Error::new(StatementError::duplicate(name)).context(format!(
                        "Already defined as:\n{}\nRequested:\n{}",
                        truncate_long!(def.sql),
                        truncate_long!(sql),
                    ));
                    log::error!("{:#}", error);
                    return Err(error);
                }
                def.sql = sql;
                def.registered = false;
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(StatementDef::new(name, sql));
            }
        }
        log::debug!("Defined prepared statement `{}`", statement_label(name));
        Ok(())
    }

    /// Record that the server has prepared `name`. Calling it again has no effect.
    pub fn mark_registered(&mut self, name: &str) -> Result<()> {
        let Some(def) = self.statements.get_mut(name) else {
            let error = Error::new(StatementError::unknown(name));
            log::error!("{:#}", error);
            return Err(error);
        };
        if !def.is_anonymous() {
            def.registered = true;
        }
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.statements
            .get(name)
            .map(StatementDef::is_registered)
            .unwrap_or(false)
    }

    pub fn get(&self, name: &str) -> Option<&StatementDef> {
        self.statements.get(name)
    }

    /// Forget `name`, returning its definition.
    pub fn remove(&mut self, name: &str) -> Option<StatementDef> {
        self.statements.remove(name)
    }

    /// Mark every statement as not prepared, for example after the connection was
    /// reestablished and the server lost its prepared statements.
    pub fn reset(&mut self) {
        self.statements
            .values_mut()
            .for_each(|def| def.registered = false);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatementDef> {
        self.statements.values()
    }

    pub(crate) fn set_registered(&mut self, name: &str, registered: bool) {
        if let Some(def) = self.statements.get_mut(name)
            && !def.is_anonymous()
        {
            def.registered = registered;
        }
    }
}
