//! locator-forge CLI
//!
//! Reads an HTML document from a file or stdin, runs one extraction tool on
//! it and prints the JSON result to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use locator_forge::tools::{ToolContext, ToolRegistry};
use locator_forge::{ExtractOptions, HtmlDocument, load_document};
use serde_json::{Value, json};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locator-forge")]
#[command(version)]
#[command(
    about = "Synthesize verified CSS locators and element hierarchies from HTML",
    long_about = None
)]
struct Cli {
    /// JSON file with extraction options
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotated element hierarchy with flat list and statistics
    Hierarchy {
        /// HTML file, or `-` for stdin
        input: String,

        /// Omit the flat pre-order list
        #[arg(long)]
        no_flat: bool,

        /// Depth cap for the descent
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
    },
    /// Text-bearing elements with best-effort locators
    Text {
        /// HTML file, or `-` for stdin
        input: String,
    },
    /// Count the elements a locator matches
    Count {
        /// HTML file, or `-` for stdin
        input: String,
        locator: String,
    },
    /// Ranked strategies for the single element a locator matches
    Strategies {
        /// HTML file, or `-` for stdin
        input: String,
        locator: String,
    },
    /// List tools and their parameter schemas
    Tools,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn read_document(input: &str) -> Result<HtmlDocument> {
    if input == "-" {
        let mut markup = String::new();
        std::io::stdin()
            .read_to_string(&mut markup)
            .context("Failed to read HTML from stdin")?;
        return Ok(HtmlDocument::parse(&markup));
    }
    load_document(input).with_context(|| format!("Failed to read {}", input))
}

fn load_options(config: Option<&PathBuf>) -> Result<ExtractOptions> {
    match config {
        Some(path) => ExtractOptions::from_json_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display())),
        None => Ok(ExtractOptions::default()),
    }
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = ToolRegistry::with_defaults();

    let (tool, input, params) = match cli.command {
        Command::Tools => return print_json(&registry.schemas(), cli.pretty),
        Command::Hierarchy {
            input,
            no_flat,
            max_depth,
        } => (
            "extract_hierarchy",
            input,
            json!({"include_flat": !no_flat, "max_depth": max_depth}),
        ),
        Command::Text { input } => ("extract_text_elements", input, json!({})),
        Command::Count { input, locator } => ("count_matches", input, json!({"locator": locator})),
        Command::Strategies { input, locator } => {
            ("strategies", input, json!({"locator": locator}))
        }
    };

    let options = load_options(cli.config.as_ref())?;
    let document = read_document(&input)?;
    log::info!("Parsed {} elements from {}", document.element_count(), input);

    let mut context = ToolContext::new(&document, &options);
    let result = registry.execute(tool, params, &mut context)?;

    print_json(&result.data.unwrap_or(Value::Null), cli.pretty)
}
