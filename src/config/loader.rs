//! ConfigSet struct, registration, and resolution.

use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::constants::{APP_NAME, CONFLICT_EXIT_CODE};
use crate::document::{self, FlatEntry};
use crate::env::Env;
use crate::overlay;
use crate::registry::{Applied, Registry, Staged, Var};
use crate::value::{Typed, Value};

use super::ConfigError;

/// What registration does when a name is defined twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Log a warning, keep the first registration, and hand back a handle
    /// that is never resolved.
    #[default]
    Continue,
    /// Print the error and exit with status 2.
    Exit,
    /// Panic with the error.
    Panic,
}

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Writes applied from the document.
    pub document: usize,
    /// Writes applied from the environment.
    pub environment: usize,
    /// Keys that matched no registered name.
    pub ignored: usize,
}

/// A scope of typed configuration variables plus resolution policy.
#[derive(Debug)]
pub struct ConfigSet {
    name: String,
    prefix: String,
    error_handling: ErrorHandling,
    registry: Registry,
}

impl ConfigSet {
    pub fn new(name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        Self {
            name: name.into(),
            prefix: String::new(),
            error_handling,
            registry: Registry::new(),
        }
    }

    /// Set named after the running program that exits on conflicts.
    pub fn process_default() -> Self {
        let name = std::env::args().next().unwrap_or_else(|| APP_NAME.to_string());
        Self::new(name, ErrorHandling::Exit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix that environment variables must carry to take part.
    ///
    /// An empty prefix disables the environment layer.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ── Registration ────────────────────────────────────────────────

    pub fn bool(&mut self, name: &str, default: bool) -> Var<bool> {
        self.define(name, default)
    }

    pub fn int32(&mut self, name: &str, default: i32) -> Var<i32> {
        self.define(name, default)
    }

    pub fn int64(&mut self, name: &str, default: i64) -> Var<i64> {
        self.define(name, default)
    }

    pub fn uint32(&mut self, name: &str, default: u32) -> Var<u32> {
        self.define(name, default)
    }

    pub fn uint64(&mut self, name: &str, default: u64) -> Var<u64> {
        self.define(name, default)
    }

    pub fn float64(&mut self, name: &str, default: f64) -> Var<f64> {
        self.define(name, default)
    }

    pub fn string(&mut self, name: &str, default: impl Into<String>) -> Var<String> {
        self.define(name, default.into())
    }

    pub fn duration(&mut self, name: &str, default: Duration) -> Var<Duration> {
        self.define(name, default)
    }

    /// String list, starting empty. Every layer that sets it appends.
    pub fn strings(&mut self, name: &str) -> Var<Vec<String>> {
        self.define(name, Vec::new())
    }

    /// Register an untyped default without applying the conflict policy.
    pub fn try_register(&mut self, name: &str, default: Value) -> Result<(), ConfigError> {
        self.registry.register(name, default).map(|_| ())
    }

    fn define<T: Typed>(&mut self, name: &str, default: T) -> Var<T> {
        let default = default.into_value();
        match self.registry.register(name, default.clone()) {
            Ok(cell) => Var::new(name, cell),
            Err(err) => self.conflict(name, default, err),
        }
    }

    fn conflict<T: Typed>(&self, name: &str, default: Value, err: ConfigError) -> Var<T> {
        match self.error_handling {
            ErrorHandling::Continue => {
                tracing::warn!(set = %self.name, name, "{err}; keeping the first registration");
                Var::new(name, Arc::new(RwLock::new(default)))
            }
            ErrorHandling::Exit => {
                eprintln!("{}: {err}", self.name);
                std::process::exit(CONFLICT_EXIT_CODE);
            }
            ErrorHandling::Panic => panic!("{}: {err}", self.name),
        }
    }

    // ── Lookup ──────────────────────────────────────────────────────

    /// Parse `raw` into the named slot, outside of a resolution pass.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), ConfigError> {
        self.registry.set(name, raw)
    }

    /// Current value of `name` as text.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.registry.lookup(name)
    }

    // ── Resolution ──────────────────────────────────────────────────

    /// Resolve from the document at `path` and the process environment.
    ///
    /// An empty path means no document; a missing file at a non-empty path
    /// is an error. Must run after every variable has been registered and
    /// before any of them is read.
    pub fn resolve(&mut self, path: impl AsRef<Path>) -> Result<Resolution, ConfigError> {
        self.resolve_with_env(path, &Env::real())
    }

    /// Resolve from an in-memory document and the process environment.
    pub fn resolve_bytes(&mut self, bytes: &[u8]) -> Result<Resolution, ConfigError> {
        self.resolve_bytes_with_env(bytes, &Env::real())
    }

    pub fn resolve_with_env(
        &mut self,
        path: impl AsRef<Path>,
        env: &Env,
    ) -> Result<Resolution, ConfigError> {
        let path = path.as_ref();
        let bytes = if path.as_os_str().is_empty() {
            Vec::new()
        } else {
            std::fs::read(path).map_err(|source| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?
        };
        tracing::debug!(set = %self.name, path = %path.display(), bytes = bytes.len(), "loading config document");
        self.resolve_bytes_with_env(&bytes, env)
    }

    /// Apply the document, then the environment, then publish.
    ///
    /// All layers are applied to a staged copy; slots change only if every
    /// layer succeeded.
    pub fn resolve_bytes_with_env(
        &mut self,
        bytes: &[u8],
        env: &Env,
    ) -> Result<Resolution, ConfigError> {
        let entries = document::load_document(bytes)?;
        let mut staged = self.registry.stage();
        let mut resolution = Resolution::default();

        for entry in &entries {
            if apply(&mut staged, entry, "document")? {
                resolution.document += 1;
            } else {
                resolution.ignored += 1;
            }
        }

        if !self.prefix.is_empty() {
            for entry in &overlay::environment_entries(&self.prefix, env) {
                if apply(&mut staged, entry, "environment")? {
                    resolution.environment += 1;
                } else {
                    resolution.ignored += 1;
                }
            }
        }

        self.registry.commit(staged);
        tracing::info!(
            set = %self.name,
            document = resolution.document,
            environment = resolution.environment,
            ignored = resolution.ignored,
            "config resolved"
        );
        Ok(resolution)
    }
}

impl Default for ConfigSet {
    fn default() -> Self {
        Self::new(APP_NAME, ErrorHandling::default())
    }
}

fn apply(
    staged: &mut Staged,
    entry: &FlatEntry,
    layer: &'static str,
) -> Result<bool, ConfigError> {
    match staged.set(&entry.key, &entry.value)? {
        Applied::Set => {
            tracing::debug!(key = %entry.key, layer, "applied config value");
            Ok(true)
        }
        Applied::Ignored => {
            tracing::trace!(key = %entry.key, layer, "no config registered; ignoring");
            Ok(false)
        }
    }
}
