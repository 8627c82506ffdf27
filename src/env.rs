//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env`].
//! Tests and embedding callers use [`Env::from_pairs()`] backed by an
//! explicit list, eliminating the need for `unsafe` calls to
//! [`std::env::set_var`] / [`std::env::remove_var`].

/// Environment variable source.
///
/// Wraps lookups so that production code hits `std::env` while tests
/// can supply a controlled set of values.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<Vec<(String, String)>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    ///
    /// Later duplicates shadow earlier ones in [`Env::var`], mirroring how a
    /// process environment cannot hold the same name twice.
    pub fn from_pairs(
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Create an `Env` with no variables at all.
    pub fn empty() -> Self {
        Self {
            overrides: Some(Vec::new()),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(pairs) => pairs
                .iter()
                .rev()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// All variables as `(name, value)` pairs.
    ///
    /// Entries of the real environment that are not valid UTF-8 are skipped.
    pub fn vars(&self) -> Vec<(String, String)> {
        match &self.overrides {
            Some(pairs) => {
                let mut seen = std::collections::HashSet::new();
                let mut out: Vec<(String, String)> = pairs
                    .iter()
                    .rev()
                    .filter(|(k, _)| seen.insert(k.as_str()))
                    .cloned()
                    .collect();
                out.reverse();
                out
            }
            None => std::env::vars_os()
                .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                    (Ok(k), Ok(v)) => Some((k, v)),
                    (Ok(k), Err(_)) => {
                        tracing::trace!(name = %k, "skipping non UTF-8 environment value");
                        None
                    }
                    _ => None,
                })
                .collect(),
        }
    }
}
