use clap::{Parser, Subcommand, ValueEnum};
use paramtree::prelude::*;
use paramtree::schema::DEFAULT_MAX_DEPTH;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Output format for flattened leaves.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the addressable leaves of a parameter schema
    Flatten {
        /// Path to the parameter schema JSON file
        schema_path: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Build the nested parameter object from a raw values file
    Collect {
        /// Path to the parameter schema JSON file
        schema_path: String,
        /// Path to the raw values JSON file (`{"Dotted.Path": "raw"}`)
        values_path: String,
        /// Report every invalid value instead of stopping at the first
        #[arg(long)]
        all_errors: bool,
    },
    /// Check a parameter schema for names that would corrupt dotted paths
    Validate {
        /// Path to the parameter schema JSON file
        schema_path: String,
    },
}

/// Flatten operation parameter schemas into form fields and collect typed parameters
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Nesting depth beyond which complex parameters are kept as a single field
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log codec activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in interactive mode to be prompted for every parameter
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let converter = SchemaConverter::builder().max_depth(cli.max_depth).build();

    if cli.human {
        run_interactive(&converter);
        return;
    }

    match cli.command {
        Some(Command::Flatten {
            schema_path,
            format,
        }) => run_flatten(&converter, &schema_path, format),
        Some(Command::Collect {
            schema_path,
            values_path,
            all_errors,
        }) => run_collect(&converter, &schema_path, &values_path, all_errors),
        Some(Command::Validate { schema_path }) => run_validate(&converter, &schema_path),
        None => exit_with_error("A subcommand is required in non-interactive mode."),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_schema(converter: &SchemaConverter, schema_path: &str) -> SchemaTree {
    load_schema_file(schema_path, converter)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load schema: {}", e)))
}

fn run_flatten(converter: &SchemaConverter, schema_path: &str, format: OutputFormat) {
    let schema = load_schema(converter, schema_path);
    let leaves = ParamCodec::flatten(&schema);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&leaves)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode leaves: {}", e)));
            println!("{}", json);
        }
        OutputFormat::Table => print_leaf_table(&leaves),
    }
}

fn print_leaf_table(leaves: &[LeafDescriptor]) {
    if leaves.is_empty() {
        println!("No parameters required.");
        return;
    }

    let path_width = leaves.iter().map(|l| l.path.len()).max().unwrap_or(4).max(4);
    let type_width = leaves
        .iter()
        .map(|l| l.leaf_type.as_str().len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:<path_width$}  {:<type_width$}  {:<8}  ALLOWED",
        "PATH", "TYPE", "REQUIRED"
    );
    for leaf in leaves {
        let allowed = leaf
            .enum_values
            .as_ref()
            .map(|values| values.join("|"))
            .unwrap_or_default();
        println!(
            "{:<path_width$}  {:<type_width$}  {:<8}  {}",
            leaf.path,
            leaf.leaf_type.as_str(),
            if leaf.required { "yes" } else { "no" },
            allowed
        );
    }
    println!("\n{} leaf parameter(s)", leaves.len());
}

fn run_collect(converter: &SchemaConverter, schema_path: &str, values_path: &str, all_errors: bool) {
    let start = Instant::now();
    let schema = load_schema(converter, schema_path);
    let leaves = ParamCodec::flatten(&schema);

    let raw = RawValues::from_file(values_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load values: {}", e)));
    let values = raw
        .typed(&leaves)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let collected = if all_errors {
        ParamCodec::collect_all(&values)
    } else {
        ParamCodec::collect(&values)
    };

    match collected {
        Ok(params) => {
            let json = serde_json::to_string_pretty(&params)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode params: {}", e)));
            println!("{}", json);
            eprintln!("Collected {} top-level parameter(s) in {:?}", params.len(), start.elapsed());
        }
        Err(CodecError::Multiple(errors)) => {
            for error in &errors {
                eprintln!("  - {}", error);
            }
            exit_with_error(&format!("{} value(s) could not be collected", errors.len()));
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn run_validate(converter: &SchemaConverter, schema_path: &str) {
    let schema = load_schema(converter, schema_path);
    let issues = schema.validate();

    if issues.is_empty() {
        println!(
            "Schema is well formed ({} leaf parameter(s)).",
            schema.leaf_count()
        );
        return;
    }

    for issue in &issues {
        println!("{}", issue);
    }
    if !schema.is_well_formed() {
        std::process::exit(1);
    }
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(converter: &SchemaConverter) {
    println!("--- paramtree Interactive Mode ---");

    let schema_path = prompt_for_input("Enter schema path", Some("data/schema.json"));
    let schema = load_schema(converter, &schema_path);
    let leaves = ParamCodec::flatten(&schema);

    if leaves.is_empty() {
        println!("No parameters required.");
        println!("{{}}");
        return;
    }

    println!("\nLeave a field blank to omit it.");
    loop {
        let mut values = PathValueMap::new();
        for leaf in &leaves {
            let mut label = format!("{} ({})", leaf.path, leaf.leaf_type);
            if leaf.required {
                label.push_str(" *");
            }
            if let Some(allowed) = &leaf.enum_values {
                label.push_str(&format!(" [{}]", allowed.join("|")));
            }
            let raw = prompt_for_input(&label, None);
            values.insert(leaf.path.clone(), leaf.leaf_type.clone(), raw);
        }

        match ParamCodec::collect_all(&values) {
            Ok(params) => {
                let json = serde_json::to_string_pretty(&params).unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to encode params: {}", e))
                });
                println!("\n{}", json);
                return;
            }
            Err(e) => {
                println!("\n{}", e);
                println!("Please enter the values again.\n");
            }
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
