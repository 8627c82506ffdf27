//! confset — typed configuration variables resolved from defaults, a TOML
//! document, and prefixed environment variables (library crate).
//!
//! ```no_run
//! use confset::{ConfigSet, ErrorHandling};
//!
//! let mut config = ConfigSet::new("submit", ErrorHandling::Exit).with_prefix("SUBMIT_");
//! let redis_host = config.string("redis-host", "localhost");
//! let allowed = config.strings("google-allowed-emails");
//!
//! config.resolve("submit.conf")?;
//! println!("{} {:?}", redis_host.get(), allowed.get());
//! # Ok::<(), confset::ConfigError>(())
//! ```

pub mod config;
pub mod constants;
pub mod document;
pub mod env;
pub mod overlay;
pub mod registry;
pub mod value;

pub use config::{ConfigError, ConfigSet, ErrorHandling, Resolution};
pub use env::Env;
pub use registry::Var;
pub use value::{Kind, StringList, Value};
