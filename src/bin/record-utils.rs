use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use record_utils::io::{load_json_with, parse_scalar, save_json, LoadOptions, TracingObserver};
use record_utils::logging;
use record_utils::processing::{
    column_stats, filter_rows, filter_rows_with, group_by, group_by_with, normalize, Groups,
    LookupOptions,
};
use record_utils::types::{DataSet, Number, Record, Value};

/// Inspect JSON record files: column stats, filtering, grouping, normalization.
#[derive(Debug, Parser)]
#[command(name = "record-utils", version, about)]
struct Cli {
    /// Log at DEBUG instead of INFO (RUST_LOG overrides both).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print min/max/mean of a numeric field.
    Stats {
        path: PathBuf,
        #[arg(short, long)]
        key: String,
    },
    /// Print (or save) the records whose field equals a value.
    Filter {
        path: PathBuf,
        #[arg(short, long)]
        key: String,
        /// Parsed as a JSON scalar (`23`, `true`, `null`), otherwise taken as a string.
        #[arg(long)]
        value: String,
        /// Treat a missing field differently from an explicit null.
        #[arg(long)]
        distinct_missing: bool,
        /// Write the result here instead of printing it.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print records grouped by a field's value.
    Group {
        path: PathBuf,
        #[arg(short, long)]
        key: String,
        #[arg(long)]
        distinct_missing: bool,
    },
    /// Mean-center a list of numbers.
    Normalize {
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_number)]
        values: Vec<Number>,
    },
    /// Run every transform over built-in sample data.
    Demo,
}

fn parse_number(raw: &str) -> Result<Number, String> {
    match parse_scalar(raw).as_number() {
        Some(n) => Ok(n),
        None => Err(format!("'{raw}' is not a number")),
    }
}

fn lookup_options(distinct_missing: bool) -> LookupOptions {
    if distinct_missing {
        LookupOptions::distinct_missing()
    } else {
        LookupOptions::default()
    }
}

fn load(path: &Path) -> Result<DataSet, record_utils::LoadError> {
    let opts = LoadOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    load_json_with(path, &opts)
}

/// One group in CLI output. Keys keep their JSON type, so `1` and `"1"` stay separate groups.
#[derive(Debug, Serialize)]
struct GroupEntry<'a> {
    key: &'a Value,
    records: &'a DataSet,
}

fn group_entries(groups: &Groups) -> Vec<GroupEntry<'_>> {
    groups
        .iter()
        .map(|(key, records)| GroupEntry { key, records })
        .collect()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn records<const N: usize>(rows: [[(&str, Value); 2]; N]) -> DataSet {
    rows.into_iter().map(Record::from).collect()
}

fn demo() -> Result<(), Box<dyn std::error::Error>> {
    let people = records([
        [("name", "Alice".into()), ("city", "Minsk".into())],
        [("name", "Bob".into()), ("city", "Moskow".into())],
        [("name", "Kate".into()), ("city", "Dubai".into())],
        [("name", "Alex".into()), ("city", "Minsk".into())],
        [("name", "Maria".into()), ("city", "Moskow".into())],
    ]);
    let ages = records([
        [("name", "Alice".into()), ("age", 23.into())],
        [("name", "Bob".into()), ("age", 24.into())],
        [("name", "Kate".into()), ("age", 67.into())],
        [("name", "Alex".into()), ("age", 23.into())],
        [("name", "Maria".into()), ("age", 23.into())],
    ]);
    let sequence: Vec<Number> = (1..1000).map(Number::Int).collect();

    normalize(&sequence)?;
    print_json(&group_entries(&group_by(&people, "city")))?;
    print_json(&column_stats(&ages, "age")?)?;
    print_json(&filter_rows(&ages, "age", &Value::from(23)))?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Stats { path, key } => {
            let ds = load(&path)?;
            print_json(&column_stats(&ds, &key)?)?;
        }
        Command::Filter {
            path,
            key,
            value,
            distinct_missing,
            output,
        } => {
            let ds = load(&path)?;
            let target = parse_scalar(&value);
            let out = filter_rows_with(&ds, &key, &target, &lookup_options(distinct_missing));
            match output {
                Some(dest) => save_json(&out, dest)?,
                None => print_json(&out)?,
            }
        }
        Command::Group {
            path,
            key,
            distinct_missing,
        } => {
            let ds = load(&path)?;
            let grouping = group_by_with(&ds, &key, &lookup_options(distinct_missing));
            print_json(&group_entries(&grouping.groups))?;
            if !grouping.missing.is_empty() {
                tracing::warn!(
                    "{} records lack field '{key}' and were left out",
                    grouping.missing.row_count()
                );
            }
        }
        Command::Normalize { values } => {
            print_json(&*normalize(&values)?)?;
        }
        Command::Demo => demo()?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    logging::init_logging(level);

    tracing::warn!("Starting record-utils");
    let result = run(cli);
    tracing::warn!("Finishing record-utils");

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
