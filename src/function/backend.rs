use crate::foundation::error::{PlotError, PlotResult, RedefineError};
use crate::function::compiler::{
    BackendKind, BuiltinSquare, CompileError, CompiledFunction, EvalError, FunctionCompiler, Value,
    create_compiler,
};

/// Whether the active function may be plotted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionState {
    Usable,
    Unusable,
}

/// Tunables for [`FunctionBackend`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackendOpts {
    /// Argument of the single smoke-test call made before a swap.
    pub smoke_x: f64,
    /// Longest accepted source text, in bytes.
    pub max_source_len: usize,
}

impl BackendOpts {
    pub const DEFAULT_SMOKE_X: f64 = 1.0;
    pub const DEFAULT_MAX_SOURCE_LEN: usize = 128;
    /// Upper bound for `max_source_len`. Keeps the depth of operator chains, and so the
    /// recursion in binding and lowering, bounded.
    pub const MAX_SOURCE_LEN_LIMIT: usize = 2048;

    pub fn validate(&self) -> PlotResult<()> {
        if !self.smoke_x.is_finite() {
            return Err(PlotError::validation("smoke_x must be finite"));
        }
        if self.max_source_len == 0 || self.max_source_len > Self::MAX_SOURCE_LEN_LIMIT {
            return Err(PlotError::validation(format!(
                "max_source_len must be in 1..={}, got {}",
                Self::MAX_SOURCE_LEN_LIMIT,
                self.max_source_len
            )));
        }
        Ok(())
    }
}

impl Default for BackendOpts {
    fn default() -> Self {
        Self {
            smoke_x: Self::DEFAULT_SMOKE_X,
            max_source_len: Self::DEFAULT_MAX_SOURCE_LEN,
        }
    }
}

/// Holds the active function and swaps it only after a candidate compiles and survives a
/// smoke-test call.
///
/// A rejected candidate never replaces the active function; it only marks the backend
/// [`FunctionState::Unusable`] until the next accepted redefinition.
pub struct FunctionBackend {
    compiler: Box<dyn FunctionCompiler>,
    active: Box<dyn CompiledFunction>,
    source: String,
    state: FunctionState,
    revision: u64,
    last_error: Option<RedefineError>,
    opts: BackendOpts,
}

impl FunctionBackend {
    /// Start in the usable state with the built-in `x -> x²`.
    pub fn new(compiler: Box<dyn FunctionCompiler>, opts: BackendOpts) -> PlotResult<Self> {
        opts.validate()?;
        Ok(Self {
            compiler,
            active: Box::new(BuiltinSquare),
            source: BuiltinSquare::SOURCE.to_owned(),
            state: FunctionState::Usable,
            revision: 0,
            last_error: None,
            opts,
        })
    }

    pub fn with_kind(kind: BackendKind, opts: BackendOpts) -> PlotResult<Self> {
        Self::new(create_compiler(kind), opts)
    }

    /// Compile, smoke-test and, on success, swap in `source`.
    #[tracing::instrument(skip(self), fields(compiler = self.compiler.name()))]
    pub fn try_redefine(&mut self, source: &str) -> Result<(), RedefineError> {
        match self.compile_checked(source) {
            Ok(func) => {
                self.active = func;
                self.source = source.trim().to_owned();
                self.state = FunctionState::Usable;
                self.revision += 1;
                self.last_error = None;
                tracing::info!(revision = self.revision, "function redefined");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "redefinition rejected");
                self.state = FunctionState::Unusable;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn compile_checked(&mut self, source: &str) -> Result<Box<dyn CompiledFunction>, RedefineError> {
        let len = source.len();
        if len > self.opts.max_source_len {
            return Err(CompileError::TooLong {
                len,
                limit: self.opts.max_source_len,
            }
            .into());
        }

        // Domain failures and non-finite values at `smoke_x` are accepted; `evaluate`
        // reports them per sample.
        let mut func = self.compiler.compile(source)?;
        let x = self.opts.smoke_x;
        match func.call(x) {
            Ok(Value::Number(v)) => {
                if !v.is_finite() {
                    tracing::debug!(x, value = v, "smoke test returned a non-finite number");
                }
                Ok(func)
            }
            Err(EvalError::Domain(msg)) => {
                tracing::debug!(x, error = %msg, "smoke test left the numeric domain");
                Ok(func)
            }
            Ok(other) => Err(RedefineError::Type(format!(
                "f({x}) returned a {}, expected a number",
                other.type_name()
            ))),
            Err(e) => Err(RedefineError::Runtime(e)),
        }
    }

    /// Evaluate the active function at `x`.
    ///
    /// Works in both states; the retained function keeps answering while the backend is
    /// unusable.
    pub fn evaluate(&mut self, x: f64) -> Result<f64, EvalError> {
        match self.active.call(x)? {
            Value::Number(v) if v.is_finite() => Ok(v),
            Value::Number(v) => Err(EvalError::NonFinite(v)),
            other => Err(EvalError::NonNumeric(other.type_name())),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.state == FunctionState::Usable
    }

    pub fn state(&self) -> FunctionState {
        self.state
    }

    /// Source text of the active function.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of accepted redefinitions so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Why the most recent redefinition was rejected, if it was.
    pub fn last_error(&self) -> Option<&RedefineError> {
        self.last_error.as_ref()
    }

    pub fn compiler_name(&self) -> &'static str {
        self.compiler.name()
    }

    pub fn opts(&self) -> BackendOpts {
        self.opts
    }
}

impl std::fmt::Debug for FunctionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionBackend")
            .field("compiler", &self.compiler.name())
            .field("source", &self.source)
            .field("state", &self.state)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/function/backend.rs"]
mod tests;
