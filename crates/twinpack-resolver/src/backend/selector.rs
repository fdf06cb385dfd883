//! Backend selection from environment signals.

use std::ffi::OsString;
use std::path::Path;

use crate::backend::{BackendContext, BackendKind};
use crate::error::{Error, Result};

/// The two backend selection signals, captured once at the process edge
///
/// A signal is set when its variable is present and non-empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendSignals {
    pub webpack: bool,
    pub rspack: bool,
}

impl BackendSignals {
    /// Read `WEBPACK` and `RSPACK` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Read signals through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let truthy = |kind: BackendKind| lookup(kind.env_var()).is_some_and(|v| !v.is_empty());
        Self {
            webpack: truthy(BackendKind::Webpack),
            rspack: truthy(BackendKind::Rspack),
        }
    }

    /// Signals selecting exactly `kind`
    pub fn only(kind: BackendKind) -> Self {
        Self {
            webpack: kind == BackendKind::Webpack,
            rspack: kind == BackendKind::Rspack,
        }
    }

    /// Resolve to exactly one backend
    ///
    /// There is no default: zero or two signals is a contract violation.
    pub fn select(self) -> Result<BackendKind> {
        match (self.webpack, self.rspack) {
            (true, false) => Ok(BackendKind::Webpack),
            (false, true) => Ok(BackendKind::Rspack),
            (false, false) => Err(Error::NoBackendSelected),
            (true, true) => Err(Error::ConflictingBackends),
        }
    }
}

/// Select the active backend and build its context
///
/// The output directory is fixed per backend under `project_root`, so
/// builds for both backends can run side by side.
pub fn select_backend(signals: BackendSignals, project_root: &Path) -> Result<BackendContext> {
    let kind = signals.select()?;
    let context = BackendContext::for_kind(kind, project_root);
    tracing::debug!(
        backend = context.name(),
        output_dir = %context.output_dir().display(),
        "selected bundler backend"
    );
    Ok(context)
}
