//! pdfriffle CLI - PDF page interleaving tool

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use pdfriffle::{PipelineOptions, RifflePipeline, DEFAULT_INPUT, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(name = "pdfriffle")]
#[command(version)]
#[command(about = "Interleave the two halves of a PDF's pages", long_about = None)]
struct Cli {
    /// Input PDF file [default: input.pdf]
    #[arg(value_name = "INPUT", allow_hyphen_values = true)]
    input: Option<PathBuf>,

    /// Output PDF file [default: output.pdf]
    #[arg(value_name = "OUTPUT", allow_hyphen_values = true)]
    output: Option<PathBuf>,

    /// Extra positional arguments are accepted and ignored
    #[arg(
        value_name = "IGNORED",
        hide = true,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    ignored: Vec<String>,

    /// Fixed path for the intermediate document (temporary file if unset)
    #[arg(long, value_name = "PATH")]
    intermediate: Option<PathBuf>,

    /// Compress streams in the output
    #[arg(long)]
    compress: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Exit with a distinct non-zero status when no output was written
    #[arg(long)]
    strict: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("starting pdfriffle");
    for (i, arg) in std::env::args().skip(1).enumerate() {
        log::info!("args[{}]: {}", i, arg);
    }

    let cli = Cli::parse();

    match cmd_riffle(&cli) {
        Ok(code) => {
            log::info!("pdfriffle finished");
            std::process::exit(code);
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_riffle(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    if !cli.ignored.is_empty() {
        log::debug!("ignoring extra arguments: {:?}", cli.ignored);
    }

    let input = cli
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let mut options = PipelineOptions::new().with_compression(cli.compress);
    if let Some(ref path) = cli.intermediate {
        options = options.with_intermediate_path(path);
    }

    let outcome = RifflePipeline::new(options).process(&input, &output)?;

    if cli.json {
        println!("{}", outcome.to_json()?);
    } else if outcome.is_completed() {
        println!("{} {}", "Saved to".green(), output.display());
    } else {
        log::info!("terminating program, no output written");
    }

    Ok(if cli.strict { outcome.exit_code() } else { 0 })
}
