//! App-wide constants.
//!
//! Centralises the tool name, key separators, and environment variable
//! names so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "confset";

/// Crate version, as reported by `confset version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Joins document path segments into a flat registry name.
pub const KEY_SEPARATOR: char = '-';

/// Characters in document keys and environment names that map to
/// [`KEY_SEPARATOR`].
pub const KEY_SEPARATOR_ALIAS: char = '_';

/// Splits raw text into list elements, and joins document arrays.
pub const LIST_SEPARATOR: char = ',';

/// Exit status used when a registration conflict aborts the process.
pub const CONFLICT_EXIT_CODE: i32 = 2;

// ── Environment variable names (binary) ────────────────────────────

pub const ENV_CONFIG: &str = "CONFSET_CONFIG";
pub const ENV_PREFIX: &str = "CONFSET_PREFIX";
pub const ENV_LOG: &str = "CONFSET_LOG";
