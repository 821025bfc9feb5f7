use clap::Parser;
use paramtree::prelude::*;
use paramtree::schema::DEFAULT_MAX_DEPTH;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A CLI tool to generate raw form values for a parameter schema
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the parameter schema JSON file
    schema_path: String,

    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_values.json")]
    output: String,

    /// Share of optional fields that are filled in (0.0 to 1.0)
    #[arg(long, default_value_t = 0.7)]
    fill_ratio: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Nesting depth beyond which complex parameters are kept as a single field
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.fill_ratio) {
        eprintln!(
            "Error: --fill-ratio ({}) must be between 0.0 and 1.0",
            cli.fill_ratio
        );
        std::process::exit(1);
    }

    let converter = SchemaConverter::builder().max_depth(cli.max_depth).build();
    let schema = load_schema_file(&cli.schema_path, &converter)?;
    let leaves = ParamCodec::flatten(&schema);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut raw = RawValues::default();
    for leaf in &leaves {
        let value = if leaf.required || rng.random_bool(cli.fill_ratio) {
            generate_raw_value(&mut rng, leaf)
        } else {
            String::new()
        };
        raw.insert(leaf.path.clone(), value);
    }

    let json_output = serde_json::to_string_pretty(&raw)?;
    fs::write(&cli.output, json_output)?;

    info!(
        leaves = leaves.len(),
        output = %cli.output,
        "generated raw values"
    );

    Ok(())
}

/// Produces a raw input that coerces cleanly to the leaf's declared kind.
fn generate_raw_value<R: Rng>(rng: &mut R, leaf: &LeafDescriptor) -> String {
    if let Some(choice) = leaf
        .enum_values
        .as_ref()
        .and_then(|allowed| allowed.choose(rng))
    {
        return choice.clone();
    }

    match leaf.leaf_type {
        LeafType::Integer => rng.random_range(0..=65535).to_string(),
        LeafType::Float => format!("{:.3}", rng.random_range(-100.0..100.0)),
        LeafType::Boolean => rng.random_bool(0.5).to_string(),
        LeafType::String | LeafType::Other(_) => {
            format!("{}-{}", leaf.name, rng.random_range(1..=999))
        }
    }
}
