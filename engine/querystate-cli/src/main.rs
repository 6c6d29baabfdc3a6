use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use querystate::{FieldValue, Preset, QueryParams, Record, Schema};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "querystate", version, about = "querystate CLI")]
struct Cli {
    /// Log codec fallbacks (same as RUST_LOG=debug)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a query string and print the resulting state
    Parse {
        #[command(flatten)]
        schemas: SchemaArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Query string (leading '?' optional) or full URL
        query: String,
    },
    /// Decode and re-encode a query string with defaults elided
    Normalize {
        #[command(flatten)]
        schemas: SchemaArgs,
        /// Query string (leading '?' optional) or full URL
        query: String,
    },
    /// Print the default state
    Defaults {
        #[command(flatten)]
        schemas: SchemaArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print fields, types and defaults
    Describe {
        #[command(flatten)]
        schemas: SchemaArgs,
    },
    /// Report whether a query string decodes to the default state
    IsDefault {
        #[command(flatten)]
        schemas: SchemaArgs,
        /// Query string (leading '?' optional) or full URL
        query: String,
    },
}

#[derive(clap::Args, Debug)]
struct SchemaArgs {
    /// Preset schema; repeat to share one query string between schemas
    #[arg(long = "schema", value_enum, required = true)]
    schemas: Vec<SchemaName>,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
#[value(rename_all = "lower")]
enum SchemaName {
    Filter,
    List,
    Calendar,
    Map,
}

impl From<SchemaName> for Preset {
    fn from(value: SchemaName) -> Self {
        match value {
            SchemaName::Filter => Preset::Filter,
            SchemaName::List => Preset::List,
            SchemaName::Calendar => Preset::Calendar,
            SchemaName::Map => Preset::Map,
        }
    }
}

impl SchemaArgs {
    fn presets(&self) -> Vec<(Preset, Schema)> {
        self.schemas
            .iter()
            .map(|name| {
                let preset = Preset::from(*name);
                (preset, preset.schema())
            })
            .collect()
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    QueryState(#[from] querystate::QueryStateError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

const EXIT_MODIFIED: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Parse {
            schemas,
            json,
            query,
        } => cmd_parse(&schemas.presets(), &query, json),
        Commands::Normalize { schemas, query } => cmd_normalize(&schemas.presets(), &query),
        Commands::Defaults { schemas, json } => cmd_defaults(&schemas.presets(), json),
        Commands::Describe { schemas } => cmd_describe(&schemas.presets()),
        Commands::IsDefault { schemas, query } => cmd_is_default(&schemas.presets(), &query),
    }
}

fn cmd_parse(presets: &[(Preset, Schema)], query: &str, json: bool) -> Result<ExitCode, CliError> {
    let params = read_query(query)?;
    let records = presets
        .iter()
        .map(|(preset, schema)| (*preset, querystate::parse(schema, &params)))
        .collect::<Vec<_>>();
    print_records(&records, json)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_normalize(presets: &[(Preset, Schema)], query: &str) -> Result<ExitCode, CliError> {
    let params = read_query(query)?;
    let mut out = QueryParams::new();
    for (_, schema) in presets {
        let record = querystate::parse(schema, &params);
        querystate::serialize_into(schema, &record, &mut out);
    }
    write_line(&out.to_query_string())?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_defaults(presets: &[(Preset, Schema)], json: bool) -> Result<ExitCode, CliError> {
    let records = presets
        .iter()
        .map(|(preset, schema)| (*preset, querystate::defaults(schema)))
        .collect::<Vec<_>>();
    print_records(&records, json)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_describe(presets: &[(Preset, Schema)]) -> Result<ExitCode, CliError> {
    let mut out = String::new();
    for (preset, schema) in presets {
        out.push_str(&format!("# {preset}\n{schema}"));
    }
    write_stdout(&out)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_is_default(presets: &[(Preset, Schema)], query: &str) -> Result<ExitCode, CliError> {
    let params = read_query(query)?;
    let is_default = presets.iter().all(|(_, schema)| {
        querystate::equals(
            schema,
            &querystate::parse(schema, &params),
            &querystate::defaults(schema),
        )
    });
    if is_default {
        write_line("default")?;
        Ok(ExitCode::SUCCESS)
    } else {
        write_line("modified")?;
        Ok(ExitCode::from(EXIT_MODIFIED))
    }
}

fn read_query(input: &str) -> Result<QueryParams, CliError> {
    if input.contains("://") {
        let url = Url::parse(input)?;
        Ok(QueryParams::from_url(&url))
    } else {
        Ok(QueryParams::parse(input))
    }
}

fn print_records(records: &[(Preset, Record)], json: bool) -> Result<(), CliError> {
    if json {
        let object = records
            .iter()
            .map(|(preset, record)| (preset.name().to_string(), record.to_json()))
            .collect::<serde_json::Map<_, _>>();
        let text = serde_json::to_string_pretty(&serde_json::Value::Object(object))?;
        return write_line(&text);
    }

    let mut out = String::new();
    for (preset, record) in records {
        out.push_str(&format!("# {preset}\n"));
        for (name, value) in record.iter() {
            out.push_str(&format!("{name} = {}\n", render_field(value)));
        }
    }
    write_stdout(&out)
}

fn render_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Scalar(None) => "<absent>".to_string(),
        FieldValue::Scalar(Some(value)) => value.to_string(),
        FieldValue::Multiple(values) => {
            let items = values
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>();
            format!("multiple [{}]", items.join(", "))
        }
    }
}

fn write_line(text: &str) -> Result<(), CliError> {
    write_stdout(&format!("{text}\n"))
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    Ok(())
}
