use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use apollo_compiler::Name;
use apollo_compiler::Schema;
use clap::Parser;
use federated_subgraph::FederatedSchemaConfig;
use federated_subgraph::PrintOptions;
use federated_subgraph::SchemaConfig;
use federated_subgraph::build_federated_schema;
use federated_subgraph::print_schema;
use federated_subgraph::subgraph::BoxError;
use federated_subgraph::subgraph::EntityResolver;
use federated_subgraph::subgraph::Representation;
use serde_json_bytes::Value;
use tracing_subscriber::EnvFilter;

/// CLI arguments. See <https://docs.rs/clap/latest/clap/_derive/index.html>
#[derive(Parser)]
struct Args {
    /// Printer options as JSON, for example `{"include_schema_definition": true}`
    #[arg(long, global = true)]
    options: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Prints a schema as canonical SDL
    Print {
        /// The path to the schema file, or `-` for stdin
        schema: PathBuf,
        /// Leave out directive definitions
        #[arg(long)]
        no_directives: bool,
        /// Print the `schema` block even when root types have their default names
        #[arg(long)]
        schema_definition: bool,
        /// Print the default values of arguments and input fields
        #[arg(long)]
        default_values: bool,
    },
    /// Composes a schema as a federated subgraph and prints the SDL it serves
    Compose {
        /// The path to the schema file, or `-` for stdin
        schema: PathBuf,
    },
}

/// `compose` only prints, no entity is ever resolved.
struct Unresolved;

impl EntityResolver for Unresolved {
    fn resolve_entities(&self, representations: &[Representation]) -> Result<Vec<Value>, BoxError> {
        Ok(vec![Value::Null; representations.len()])
    }

    fn resolve_entity_type(&self, _: &Value) -> Option<Name> {
        None
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = args
        .options
        .as_deref()
        .map(serde_json::from_str::<PrintOptions>)
        .transpose()
        .context("could not parse printer options")?;
    match args.command {
        Command::Print {
            schema,
            no_directives,
            schema_definition,
            default_values,
        } => {
            let mut options = options.unwrap_or(PrintOptions {
                include_directive_definitions: true,
                include_schema_definition: false,
                include_default_values: false,
            });
            if no_directives {
                options.include_directive_definitions = false;
            }
            if schema_definition {
                options.include_schema_definition = true;
            }
            if default_values {
                options.include_default_values = true;
            }
            print(&schema, options)
        }
        Command::Compose { schema } => compose(&schema, options),
    }
}

fn read_schema(input_path: &Path) -> Result<Schema> {
    let (input, source_name) = if input_path == Path::new("-") {
        (
            io::read_to_string(io::stdin()).context("could not read stdin")?,
            "stdin.graphql".to_owned(),
        )
    } else {
        (
            fs::read_to_string(input_path)
                .with_context(|| format!("could not read {}", input_path.display()))?,
            input_path.display().to_string(),
        )
    };
    Schema::parse(input, source_name)
        .map_err(|with_errors| anyhow::anyhow!("{}", with_errors.errors))
}

fn print(input_path: &Path, options: PrintOptions) -> Result<()> {
    let schema = read_schema(input_path)?;
    println!("{}", print_schema(&schema, options));
    Ok(())
}

fn compose(input_path: &Path, options: Option<PrintOptions>) -> Result<()> {
    let schema = read_schema(input_path)?;
    let federated = build_federated_schema(FederatedSchemaConfig {
        schema: SchemaConfig::from_schema(&schema)?,
        resolver: Arc::new(Unresolved),
    })?;
    match options {
        Some(options) => println!("{}", federated.print(options)),
        None => println!("{}", federated.sdl()),
    }
    Ok(())
}
