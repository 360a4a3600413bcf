//! factq command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use factq::cli::{eval, load_config, output, parse_trace_level, rewrite};
use factq_eval::TraceLevel;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// factq command-line tool
#[derive(Parser)]
#[command(name = "factq")]
#[command(author, version, about = "Evaluate predicate terms over facts", long_about = None)]
struct Cli {
    /// Log registry changes and every dispatched term
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Maximum evaluation depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Level `traced` logs at (error, warn, info, debug, trace)
    #[arg(long, global = true, value_parser = parse_trace_level)]
    trace_level: Option<TraceLevel>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a term
    Eval {
        /// Term in canonical form, e.g. "(ge age 18)"
        term: String,

        /// Fact to evaluate against (JSON object)
        #[arg(short, long, conflicts_with = "repeat_over")]
        fact: Option<PathBuf>,

        /// Rows for aggregate operators (JSON array of objects)
        #[arg(short, long)]
        maps: Option<PathBuf>,

        /// Evaluate one term instance against each fact of a JSON array
        #[arg(short, long)]
        repeat_over: Option<PathBuf>,
    },

    /// Print the simplified form of a term
    Simplify {
        /// Term in canonical form
        term: String,
    },

    /// Print the canonical form of a term
    Fmt {
        /// Term in any spacing
        term: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,factq::trace=trace"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.max_depth, cli.trace_level)?;
    let format = if cli.json {
        output::OutputFormat::Json
    } else {
        output::OutputFormat::Text
    };

    match cli.command {
        Commands::Eval {
            term,
            fact,
            maps,
            repeat_over,
        } => eval::eval(eval::EvalConfig {
            term,
            fact,
            maps,
            repeat_over,
            engine: config,
            verbose: cli.verbose,
            format,
        }),
        Commands::Simplify { term } => {
            println!("{}", rewrite::simplify(&term, &config)?);
            Ok(())
        }
        Commands::Fmt { term } => {
            println!("{}", rewrite::fmt(&term)?);
            Ok(())
        }
    }
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    output::setup_colors(&cli.color);
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
