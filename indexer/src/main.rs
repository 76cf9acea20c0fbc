use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tfindex_core::export::save_csv;
use tfindex_core::{BuildOptions, Index, IndexBuilder, QuerySet};
use tracing_subscriber::{fmt, EnvFilter};

mod display;
mod repl;

#[derive(Parser)]
#[command(name = "tfindex")]
#[command(about = "Index the c-words of a directory of text files and rank documents by weighted terms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct IndexArgs {
    /// Directory containing the documents
    #[arg(long)]
    dir: PathBuf,
    /// Name of the stop-word file inside the directory (never indexed itself)
    #[arg(long, default_value = "stoplist.txt")]
    stop_list: String,
    /// Worker threads used to tally documents
    #[arg(long, default_value_t = 1)]
    jobs: usize,
}

impl IndexArgs {
    fn build(&self) -> Result<Index> {
        let opts = BuildOptions { stop_list: self.stop_list.clone(), jobs: self.jobs };
        IndexBuilder::from_dir(&self.dir, &opts)
            .with_context(|| format!("failed to index {}", self.dir.display()))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the index, display both tables and optionally export them as CSV
    Build {
        #[command(flatten)]
        index: IndexArgs,
        /// Directory to write doc_table.csv and term_table.csv into
        #[arg(long)]
        export: Option<PathBuf>,
        /// Only print the summary line
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },
    /// Rank documents for a single weighted term
    Find {
        #[command(flatten)]
        index: IndexArgs,
        #[arg(long)]
        term: String,
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true, value_parser = finite_weight)]
        weight: f64,
        /// Number of top documents to return; negative means none
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        top: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Rank documents for a file of `term weight` lines
    Query {
        #[command(flatten)]
        index: IndexArgs,
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        top: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Interactive search menu
    Repl {
        #[command(flatten)]
        index: IndexArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Build { index, export, quiet } => {
            let idx = index.build()?;
            writeln!(out, "Created index with {} documents and {} terms", idx.num_docs(), idx.num_terms())?;
            if !quiet {
                display::print_index(&mut out, &idx)?;
            }
            if let Some(dir) = export {
                let (docs, terms) = save_csv(&dir, &idx).context("failed to export csv")?;
                writeln!(out, "\nResults saved to {} and {}", docs.display(), terms.display())?;
            }
        }
        Commands::Find { index, term, weight, top, json } => {
            let idx = index.build()?;
            let results = idx.find(&term, weight, top_n(top));
            if json {
                display::print_json(&mut out, &results)?;
            } else {
                display::print_results(&mut out, &format!("'{term}' (weight: {weight})"), &results)?;
            }
        }
        Commands::Query { index, file, top, json } => {
            let idx = index.build()?;
            let query = QuerySet::load(&file).with_context(|| format!("failed to read word file {}", file.display()))?;
            let results = idx.find_multi(&query.terms, top_n(top));
            if json {
                display::print_json(&mut out, &results)?;
            } else {
                display::print_results(&mut out, &format!("query in '{}'", file.display()), &results)?;
            }
        }
        Commands::Repl { index } => {
            let idx = index.build()?;
            writeln!(out, "Created index with {} documents and {} terms", idx.num_docs(), idx.num_terms())?;
            repl::run(&idx, io::stdin().lock(), &mut out)?;
        }
    }
    Ok(())
}

fn finite_weight(s: &str) -> std::result::Result<f64, String> {
    match s.parse::<f64>() {
        Ok(w) if w.is_finite() => Ok(w),
        Ok(_) => Err(format!("weight must be a finite number, got {s}")),
        Err(e) => Err(e.to_string()),
    }
}

/// Non-positive counts ask for nothing.
pub(crate) fn top_n(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}
