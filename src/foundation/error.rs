use crate::function::compiler::{CompileError, EvalError};

/// Convenience result type used across fplot.
pub type PlotResult<T> = Result<T, PlotError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A function redefinition was rejected; the previous function is still active.
    #[error("redefinition rejected: {0}")]
    Redefine(#[from] RedefineError),

    /// The presentation surface failed to accept a frame.
    #[error("presentation error: {0}")]
    Present(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl PlotError {
    /// Build a [`PlotError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlotError::Present`] value.
    pub fn present(msg: impl Into<String>) -> Self {
        Self::Present(msg.into())
    }

    /// Build a [`PlotError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Why a `try_redefine` transition did not swap in the new function.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RedefineError {
    /// The source text did not produce a callable.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// The smoke-test call failed with a type-level error.
    #[error("runtime error: {0}")]
    Runtime(EvalError),

    /// The smoke-test call returned something that is not a number.
    #[error("type error: {0}")]
    Type(String),
}

impl RedefineError {
    /// Short stable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Compile(_) => "CompileError",
            Self::Runtime(_) => "RuntimeError",
            Self::Type(_) => "TypeError",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
