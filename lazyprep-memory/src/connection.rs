use crate::MemoryOptions;
use lazyprep_core::{
    Connection, Error, ParameterList, Result, RowSet, max_placeholder, statement_label,
    truncate_long,
};
use std::{borrow::Cow, collections::HashMap, sync::Arc};

/// Keywords a query may start with when the server is strict.
const STATEMENT_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "WITH", "VALUES", "TABLE", "CALL", "MERGE",
];

/// Request received by the simulated server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Prepare { name: String, sql: String },
    Execute { name: String, params: ParameterList },
    Unprepare { name: String },
}

#[derive(Debug, Clone)]
struct ServerStatement {
    sql: String,
    params: usize,
}

/// A connection to a server that lives in memory.
///
/// Prepared statements are kept in a map, executing one returns a single row echoing the
/// parameters it received, labelled `$1`, `$2`, ... Every request is recorded and can be
/// inspected with [`MemoryConnection::calls`].
#[derive(Debug, Default)]
pub struct MemoryConnection {
    statements: HashMap<String, ServerStatement>,
    calls: Vec<Call>,
    options: MemoryOptions,
}

impl MemoryConnection {
    pub fn new(options: MemoryOptions) -> Self {
        Self {
            statements: HashMap::new(),
            calls: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &MemoryOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut MemoryOptions {
        &mut self.options
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of `Prepare` requests received for `name`.
    pub fn prepare_count(&self, name: &str) -> usize {
        self.calls
            .iter()
            .filter(|v| matches!(v, Call::Prepare { name: n, .. } if n == name))
            .count()
    }

    /// Number of `Execute` requests received for `name`.
    pub fn execute_count(&self, name: &str) -> usize {
        self.calls
            .iter()
            .filter(|v| matches!(v, Call::Execute { name: n, .. } if n == name))
            .count()
    }

    /// The server loses every prepared statement, as it happens when a connection drops.
    pub fn restart(&mut self) {
        log::debug!(
            "Memory server restarted, {} prepared statements lost",
            self.statements.len()
        );
        self.statements.clear();
    }

    fn check_syntax(&self, sql: &str) -> Result<()> {
        if !self.options.strict {
            return Ok(());
        }
        let keyword = sql
            .trim_start()
            .split(|c: char| !c.is_ascii_alphabetic())
            .next()
            .unwrap_or_default();
        if STATEMENT_KEYWORDS
            .iter()
            .any(|v| v.eq_ignore_ascii_case(keyword))
        {
            return Ok(());
        }
        let near = sql
            .trim_start()
            .split_whitespace()
            .next()
            .unwrap_or_default();
        Err(Error::msg(format!("syntax error at or near \"{near}\"")))
    }
}

impl Connection for MemoryConnection {
    async fn connect(url: Cow<'static, str>) -> Result<MemoryConnection> {
        Ok(MemoryConnection::new(MemoryOptions::from_url(&url)?))
    }

    async fn prepare(&mut self, name: &str, sql: &str) -> Result<()> {
        self.calls.push(Call::Prepare {
            name: name.into(),
            sql: sql.into(),
        });
        if self.options.reject.contains(name) {
            return Err(Error::msg(format!(
                "The preparation of `{}` is rejected by the server configuration",
                statement_label(name)
            )));
        }
        if !name.is_empty() && self.statements.contains_key(name) {
            return Err(Error::msg(format!(
                "prepared statement \"{name}\" already exists"
            )));
        }
        self.check_syntax(sql)
            .map_err(|e| e.context(format!("In query:\n{}", truncate_long!(sql))))?;
        let params = max_placeholder(sql);
        log::debug!(
            "Memory server prepared `{}` with {params} parameters",
            statement_label(name)
        );
        self.statements.insert(
            name.into(),
            ServerStatement {
                sql: sql.into(),
                params,
            },
        );
        Ok(())
    }

    async fn execute_prepared(&mut self, name: &str, params: &ParameterList) -> Result<RowSet> {
        self.calls.push(Call::Execute {
            name: name.into(),
            params: params.clone(),
        });
        let Some(statement) = self.statements.get(name) else {
            return Err(Error::msg(format!(
                "prepared statement \"{name}\" does not exist"
            )));
        };
        if statement.params != params.len() {
            return Err(Error::msg(format!(
                "bind message supplies {} parameters, but prepared statement \"{name}\" requires {}",
                params.len(),
                statement.params,
            )));
        }
        log::debug!(
            "Memory server executing `{}`: {}",
            statement_label(name),
            truncate_long!(statement.sql)
        );
        let labels: Arc<[String]> = (1..=params.len()).map(|i| format!("${i}")).collect();
        Ok(RowSet {
            labels,
            rows: vec![params.iter().cloned().collect()],
            rows_affected: 0,
        })
    }

    fn is_prepared(&self, name: &str) -> bool {
        self.statements.contains_key(name)
    }

    async fn unprepare(&mut self, name: &str) -> Result<()> {
        self.calls.push(Call::Unprepare { name: name.into() });
        if self.statements.remove(name).is_none() {
            return Err(Error::msg(format!(
                "prepared statement \"{name}\" does not exist"
            )));
        }
        Ok(())
    }
}
