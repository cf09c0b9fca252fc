use crate::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures specific to prepared statements.
///
/// Operations return [`anyhow::Error`] with one of these inside, use
/// `error.downcast_ref::<StatementError>()` to tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    /// The name was never defined on this connection, nothing was sent to the server.
    #[error("Prepared statement `{name}` is not defined on this connection")]
    UnknownStatement { name: String },

    /// A named statement already exists with a different query.
    #[error("Inconsistent redefinition of prepared statement `{name}`")]
    DuplicateStatement { name: String },

    /// Named statements use ASCII letters, digits and underscores and start with a letter.
    #[error("`{name}` is not a valid prepared statement name")]
    InvalidName { name: String },

    /// The server refused to prepare the statement, it stays unregistered.
    #[error("The server could not prepare statement `{name}`")]
    PrepareFailed {
        name: String,
        #[source]
        source: BoxError,
    },

    /// A parameter has no wire representation.
    #[error("Cannot encode parameter{}: {reason}", .index.map(|i| format!(" ${i}")).unwrap_or_default())]
    EncodeError {
        index: Option<usize>,
        reason: String,
    },

    /// The server refused to execute an already prepared statement.
    #[error("The server could not execute statement `{name}`")]
    ExecError {
        name: String,
        #[source]
        source: BoxError,
    },
}

impl StatementError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownStatement { name: name.into() }
    }
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateStatement { name: name.into() }
    }
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::EncodeError {
            index: None,
            reason: reason.into(),
        }
    }
    pub fn prepare_failed(name: impl Into<String>, source: Error) -> Self {
        Self::PrepareFailed {
            name: name.into(),
            source: source.into(),
        }
    }
    pub fn exec_failed(name: impl Into<String>, source: Error) -> Self {
        Self::ExecError {
            name: name.into(),
            source: source.into(),
        }
    }
    /// Attach the placeholder position to an encoding error.
    pub fn at(self, placeholder: usize) -> Self {
        match self {
            Self::EncodeError { reason, .. } => Self::EncodeError {
                index: Some(placeholder),
                reason,
            },
            other => other,
        }
    }
}

/// Classify an error returned by this crate, `None` when it did not originate here.
pub fn statement_error(error: &Error) -> Option<&StatementError> {
    error.downcast_ref::<StatementError>()
}
