//! docsplit CLI - document decomposition tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use docsplit::config::{DEFAULT_CHUNK_LENGTH, DEFAULT_MEMORY_MB};
use docsplit::{render, DocumentProcessor, JsonFormat, ProcessingConfig};

#[derive(Parser)]
#[command(name = "docsplit")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Split paper text into chunks, figures, tables, equations, and citations",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a document and print the extracted content as JSON
    Process {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        options: ProcessArgs,
    },

    /// Print the text chunks of a document, one per line
    Chunk {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum chunk length in characters
        #[arg(long, env = "DOCSPLIT_CHUNK_LENGTH", default_value_t = DEFAULT_CHUNK_LENGTH)]
        max_length: usize,
    },

    /// Show a summary of what a document contains
    Summary {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        options: ProcessArgs,
    },

    /// Process several documents in parallel and report statistics
    Batch {
        /// Input text files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        options: ProcessArgs,
    },
}

/// Processing options shared by the commands that run the full pipeline.
#[derive(Args)]
struct ProcessArgs {
    /// Skip figure extraction
    #[arg(long)]
    no_figures: bool,

    /// Skip table extraction
    #[arg(long)]
    no_tables: bool,

    /// Skip equation extraction
    #[arg(long)]
    no_equations: bool,

    /// Skip citation extraction
    #[arg(long)]
    no_citations: bool,

    /// Memory budget in megabytes (512-8192)
    #[arg(long, env = "DOCSPLIT_MEMORY_MB", default_value_t = DEFAULT_MEMORY_MB)]
    memory_mb: u32,

    /// Maximum chunk length in characters
    #[arg(long, env = "DOCSPLIT_CHUNK_LENGTH", default_value_t = DEFAULT_CHUNK_LENGTH)]
    chunk_length: usize,
}

impl ProcessArgs {
    fn to_config(&self) -> docsplit::Result<ProcessingConfig> {
        ProcessingConfig::builder()
            .with_figures(!self.no_figures)
            .with_tables(!self.no_tables)
            .with_equations(!self.no_equations)
            .with_citations(!self.no_citations)
            .with_max_memory_mb(self.memory_mb)
            .with_chunk_max_length(self.chunk_length)
            .build()
    }

    fn processor(&self) -> docsplit::Result<DocumentProcessor> {
        let config = self.to_config()?;
        log::debug!("Using configuration: {:?}", config);
        Ok(DocumentProcessor::new(config))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input,
            output,
            compact,
            options,
        } => cmd_process(&input, output.as_deref(), compact, &options),
        Commands::Chunk { input, max_length } => cmd_chunk(&input, max_length),
        Commands::Summary { input, options } => cmd_summary(&input, &options),
        Commands::Batch { inputs, options } => cmd_batch(&inputs, &options),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_process(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &ProcessArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let processor = options.processor()?;
    let content = processor.process_bytes(&fs::read(input)?)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&content, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_chunk(input: &Path, max_length: usize) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let text = docsplit::input::decode_text(&data)?;

    for chunk in docsplit::chunk_text(text, max_length)? {
        println!("{}", chunk);
    }

    Ok(())
}

fn cmd_summary(input: &Path, options: &ProcessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let processor = options.processor()?;
    let content = processor.process_bytes(&fs::read(input)?)?;

    println!("{}", "Document Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!();

    print!("{}", colorize_summary(&render::to_summary(&content)));

    Ok(())
}

fn cmd_batch(inputs: &[PathBuf], options: &ProcessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let processor = options.processor()?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let failures: Vec<(&PathBuf, String)> = inputs
        .par_iter()
        .filter_map(|path| {
            let result = fs::read(path)
                .map_err(docsplit::Error::from)
                .and_then(|data| processor.process_bytes(&data));
            pb.inc(1);
            result.err().map(|e| (path, e.to_string()))
        })
        .collect();

    pb.finish_with_message("Done!");

    for (path, message) in &failures {
        eprintln!("{} {}: {}", "Failed".red(), path.display(), message);
    }

    println!("\n{}", "Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (name, value) in processor.statistics().iter() {
        println!("{}: {}", name.bold(), value);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} documents failed", failures.len(), inputs.len()).into())
    }
}

/// Highlight the section headings of a plain-text summary.
fn colorize_summary(summary: &str) -> String {
    summary
        .lines()
        .map(|line| match line.split_once(": ") {
            Some((label, rest)) if !line.starts_with(' ') => {
                format!("{}: {}\n", label.bold(), rest)
            }
            _ => format!("{}\n", line.dimmed()),
        })
        .collect()
}
