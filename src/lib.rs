pub mod cli;
pub mod config;
pub mod display;
pub mod filter;
pub mod reader;

pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use config::{ConfigError, DisplayRules, SieveConfig, load_config, load_config_from_path};
pub use filter::{FilterExpression, FilterParseError, Record, WildcardMode};
pub use reader::{ReadError, read_records, read_records_from};

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let config = load_config(cli.config.as_deref()).context("failed to load config")?;

    // Config filters come first; CLI filters extend the same OR-combined list
    let mut filters = config.filters.clone();
    filters.extend(cli.filters.iter().cloned());

    let mode = if cli.exact_wildcards {
        WildcardMode::Backtracking
    } else {
        WildcardMode::OneLookahead
    };
    let expression =
        FilterExpression::compile_with(&filters, mode).context("invalid filter expression")?;

    match &cli.command {
        Commands::Run {
            files,
            format,
            output,
            count,
        } => {
            let records = collect_records(files)?;
            let matched: Vec<&Record> = records
                .iter()
                .filter(|record| expression.matches(record))
                .collect();

            if *count {
                println!("{}", matched.len());
            } else {
                for record in &matched {
                    match format {
                        OutputFormat::Text => {
                            println!("{}", display::format_record(record, &config.display));
                        }
                        OutputFormat::Json => println!("{}", serde_json::to_string(record)?),
                    }
                }
            }

            if let Some(path) = output {
                write_json_lines(path, &matched).with_context(|| {
                    format!("failed to write output file '{}'", path.display())
                })?;
            }
        }
        Commands::Check => {
            if expression.is_empty() {
                println!("no filter expressions configured; every record will be kept");
            } else {
                println!("{}", display::expression_table(&expression));
                println!("{} filter clause(s) compiled", expression.clauses().len());
            }
        }
    }

    Ok(())
}

fn collect_records(files: &[PathBuf]) -> anyhow::Result<Vec<Record>> {
    if files.is_empty() {
        let stdin = std::io::stdin();
        return read_records_from(stdin.lock()).context("failed to read records from stdin");
    }

    let mut records = Vec::new();
    for file in files {
        let mut parsed = read_records(file)
            .with_context(|| format!("failed to read log file '{}'", file.display()))?;
        records.append(&mut parsed);
    }
    Ok(records)
}

fn write_json_lines(path: &Path, records: &[&Record]) -> anyhow::Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}
