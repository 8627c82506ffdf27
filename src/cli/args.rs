//! Clap argument types and variable-spec parsing.

use clap::Parser;
use std::path::PathBuf;

use confset::Kind;
use confset::constants::{ENV_CONFIG, ENV_PREFIX};

/// Resolve typed configuration from a TOML document and the environment.
#[derive(Parser, Debug)]
#[command(name = "confset", version = confset::constants::VERSION)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Register variables, resolve them, and print the result.
    Resolve(ResolveArgs),

    /// Print the flat keys a document produces.
    Flatten(FlattenArgs),

    /// Print environment variables that carry a prefix and their flat keys.
    Env(EnvArgs),

    /// Print version information.
    Version,
}

/// Arguments for the `resolve` subcommand.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// TOML document to load. Omit to resolve from defaults and environment only.
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Environment variable prefix (empty disables the environment layer).
    #[arg(long, short = 'p', env = ENV_PREFIX, default_value = "")]
    pub prefix: String,

    /// Variable to register, as `name:kind[=default]`.
    /// Kinds: bool, int32, int64, uint32, uint64, float64, string, duration, strings
    #[arg(long = "var", value_name = "SPEC", required = true)]
    pub vars: Vec<VarSpec>,

    /// Print a JSON object instead of `name = value` lines.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Arguments for the `flatten` subcommand.
#[derive(Parser, Debug)]
pub struct FlattenArgs {
    /// TOML document to flatten.
    pub file: PathBuf,

    /// Print JSON instead of `key = value` lines.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Arguments for the `env` subcommand.
#[derive(Parser, Debug)]
pub struct EnvArgs {
    /// Environment variable prefix to match.
    #[arg(long, short = 'p', env = ENV_PREFIX)]
    pub prefix: String,
}

/// A variable declared on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub kind: Kind,
    pub default: Option<String>,
}

impl std::str::FromStr for VarSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (decl, default) = match s.split_once('=') {
            Some((decl, default)) => (decl, Some(default.to_string())),
            None => (s, None),
        };
        let (name, kind) = decl
            .split_once(':')
            .ok_or_else(|| format!("expected name:kind[=default], got '{s}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing variable name in '{s}'"));
        }
        Ok(VarSpec {
            name: name.to_string(),
            kind: kind.trim().parse()?,
            default,
        })
    }
}
