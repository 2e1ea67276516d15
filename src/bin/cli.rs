//! blockstore CLI
//!
//! Inspect schemas and pack rows into a block from the command line.

use clap::{Parser, Subcommand};
use blockstore::{Block, Config, FieldType, Schema, StoreError, Tuple, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// blockstore CLI
#[derive(Parser, Debug)]
#[command(name = "blockstore-cli")]
#[command(about = "Inspect schemas and block layouts")]
#[command(version)]
struct Args {
    /// Field definition as name:TYPE (TYPE is INT or STR20); repeatable
    #[arg(short, long = "field", required = true)]
    fields: Vec<String>,

    /// Field slots available in one block
    #[arg(long, default_value = "8")]
    fields_per_block: usize,

    /// Maximum number of fields in one relation
    #[arg(long, default_value = "8")]
    max_fields: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the schema and its block capacity
    Schema,

    /// Append rows to one block and print it
    Fill {
        /// Comma separated values in field order, e.g. "1,alice"; repeatable
        #[arg(short, long = "row")]
        rows: Vec<String>,

        /// Turn these slots into holes after filling
        #[arg(long = "invalidate")]
        invalidate: Vec<usize>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,blockstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> blockstore::Result<()> {
    let config = Config::builder()
        .fields_per_block(args.fields_per_block)
        .max_fields_per_relation(args.max_fields)
        .build();
    config.validate()?;

    let definitions = args
        .fields
        .iter()
        .map(|field| {
            field.split_once(':').ok_or_else(|| {
                StoreError::Config(format!("field {} is not of the form name:TYPE", field))
            })
        })
        .collect::<blockstore::Result<Vec<_>>>()?;
    let schema = Schema::from_definitions(&config, &definitions)?;

    match args.command {
        Commands::Schema => {
            println!("{}", schema);
            println!("tuples per block: {}", schema.tuples_per_block());
            println!("tuple width: {} bytes", schema.tuple_width());
        }
        Commands::Fill { rows, invalidate } => {
            let mut block = Block::new();
            for row in &rows {
                let tuple = parse_row(&schema, row)?;
                if let Err(e) = block.append_tuple(tuple) {
                    tracing::warn!("row {:?} not stored: {}", row, e);
                }
            }
            for offset in invalidate {
                block.invalidate_tuple(offset)?;
            }

            println!("{}", schema.field_names_line());
            print!("{}", block);
            println!(
                "{} tuples in {} slots (capacity {})",
                block.num_tuples(),
                block.num_slots(),
                schema.tuples_per_block()
            );
            println!("image: {} bytes", block.encode()?.len());
        }
    }
    Ok(())
}

/// Parse one comma separated row against `schema`
fn parse_row(schema: &Schema, row: &str) -> blockstore::Result<Tuple> {
    let values = row
        .split(',')
        .zip(schema.field_types())
        .map(|(raw, field_type)| match field_type {
            FieldType::Int => raw
                .trim()
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|e| StoreError::Config(format!("{:?} is not an INT: {}", raw, e))),
            FieldType::Str20 => Ok(Value::Str20(raw.to_string())),
        })
        .collect::<blockstore::Result<Vec<_>>>()?;

    if values.len() != row.split(',').count() {
        return Err(StoreError::ValueCountMismatch {
            expected: schema.num_fields(),
            actual: row.split(',').count(),
        });
    }
    Tuple::with_values(schema.clone(), values)
}
