//! confset: resolve typed configuration from the command line.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::args::{Cli, Command, EnvArgs, FlattenArgs, ResolveArgs};
use confset::constants;
use confset::document;
use confset::env::Env;
use confset::overlay;
use confset::{ConfigSet, ErrorHandling, Value};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Resolve(args) => run_resolve(args),
        Command::Flatten(args) => run_flatten(args),
        Command::Env(args) => run_env(args),
        Command::Version => run_version(),
    }
}

/// Install the stderr subscriber. `CONFSET_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = log_directives(&Env::real(), verbose)
        .parse::<EnvFilter>()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Filter directives from `CONFSET_LOG`, else a level picked by `-v`.
fn log_directives(env: &Env, verbose: u8) -> String {
    env.var(constants::ENV_LOG).unwrap_or_else(|_| {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string()
    })
}

/// Register the `--var` schema, resolve, and print the values.
fn run_resolve(args: ResolveArgs) -> Result<()> {
    let mut config = ConfigSet::new(constants::APP_NAME, ErrorHandling::Continue)
        .with_prefix(args.prefix);

    for spec in &args.vars {
        let default = match &spec.default {
            Some(raw) => Value::parse(spec.kind, raw).with_context(|| {
                format!("invalid default {raw:?} for {} `{}`", spec.kind, spec.name)
            })?,
            None => Value::zero(spec.kind),
        };
        config
            .try_register(&spec.name, default)
            .with_context(|| format!("failed to register `{}`", spec.name))?;
    }

    let path = args.config.unwrap_or_default();
    config
        .resolve(&path)
        .context("failed to resolve configuration")?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        let object: serde_json::Map<String, serde_json::Value> = config
            .registry()
            .iter()
            .map(|(name, value)| serde_json::to_value(&value).map(|v| (name.to_string(), v)))
            .collect::<Result<_, _>>()?;
        cli::write_json(&mut stdout, &object)?;
    } else {
        cli::write_pairs(
            &mut stdout,
            config
                .registry()
                .iter()
                .map(|(name, value)| (name, value.to_string())),
        )?;
    }
    Ok(())
}

/// Print the flat keys a document produces, without any registry.
fn run_flatten(args: FlattenArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let entries = document::load_document(&bytes)
        .with_context(|| format!("failed to flatten {}", args.file.display()))?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        cli::write_json(&mut stdout, &entries)?;
    } else {
        cli::write_pairs(
            &mut stdout,
            entries.iter().map(|e| (e.key.as_str(), e.value.clone())),
        )?;
    }
    Ok(())
}

/// Show which environment variables the overlay would apply.
fn run_env(args: EnvArgs) -> Result<()> {
    if args.prefix.is_empty() {
        anyhow::bail!("an empty prefix disables the environment layer; pass --prefix");
    }
    let mut entries = overlay::environment_entries(&args.prefix, &Env::real());
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let mut stdout = std::io::stdout().lock();
    cli::write_pairs(
        &mut stdout,
        entries.iter().map(|e| (e.key.as_str(), e.value.clone())),
    )?;
    Ok(())
}

fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_directives_prefer_environment() {
        let env = Env::from_pairs([(constants::ENV_LOG, "confset=trace")]);
        assert_eq!(log_directives(&env, 0), "confset=trace");
    }

    #[test]
    fn log_directives_fall_back_to_verbosity() {
        let env = Env::empty();
        assert_eq!(log_directives(&env, 0), "warn");
        assert_eq!(log_directives(&env, 1), "info");
        assert_eq!(log_directives(&env, 2), "debug");
        assert_eq!(log_directives(&env, 5), "trace");
    }
}
