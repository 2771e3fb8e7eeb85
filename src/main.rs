use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use simpleconf::{Config, Section};
use tracing_subscriber::EnvFilter;

/// Print a configuration file, a single section of it, or one typed value.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file to read.
    path: PathBuf,
    /// Only print this section.
    section: Option<String>,
    /// Only print this key of SECTION.
    key: Option<String>,
    /// How to interpret the value of KEY.
    #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
    value_type: ValueType,
    /// Printed instead when SECTION or KEY does not exist.
    #[arg(long, requires = "key")]
    default: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_path(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    match (args.section.as_deref(), args.key.as_deref()) {
        (None, _) => {
            let mut sections = config.sections().collect::<Vec<_>>();
            sections.sort_by(|a, b| a.name().cmp(b.name()));

            for section in sections {
                print_section(section);
                println!();
            }
        }
        (Some(name), None) => {
            let Some(section) = config.section(name) else {
                bail!("section [{name}] not found");
            };
            print_section(section);
        }
        (Some(section), Some(key)) => {
            let value = get_value(&config, section, key, args.value_type, args.default.as_deref())?;
            println!("{value}");
        }
    }

    Ok(())
}

fn print_section(section: &Section) {
    println!("[{}]", section.name());

    let mut entries = section.entries().collect::<Vec<_>>();
    entries.sort_unstable();

    for (key, value) in entries {
        println!("{key} = {value}");
    }
}

fn get_value(
    config: &Config,
    section: &str,
    key: &str,
    value_type: ValueType,
    default: Option<&str>,
) -> anyhow::Result<String> {
    let value = match (value_type, default) {
        (ValueType::String, None) => config.get_str(section, key)?.to_owned(),
        (ValueType::String, Some(d)) => config.get_string_or(section, key, d),
        (ValueType::Int, None) => config.get_int(section, key)?.to_string(),
        (ValueType::Int, Some(d)) => {
            let d = d.parse::<i64>().with_context(|| format!("invalid integer default {d:?}"))?;
            config.get_int_or(section, key, d)?.to_string()
        }
        (ValueType::Float, None) => config.get_float(section, key)?.to_string(),
        (ValueType::Float, Some(d)) => {
            let d = d.parse::<f64>().with_context(|| format!("invalid float default {d:?}"))?;
            config.get_float_or(section, key, d)?.to_string()
        }
        (ValueType::Bool, None) => config.get_bool(section, key)?.to_string(),
        (ValueType::Bool, Some(d)) => {
            let d = simpleconf::parse_bool(d)
                .with_context(|| format!("invalid boolean default {d:?}"))?;
            config.get_bool_or(section, key, d)?.to_string()
        }
    };

    Ok(value)
}
