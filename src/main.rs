//! Command line front end: load two matrices, apply one operation, emit the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use sparse_matrix::{Operation, SparseMatrix, TextFormat};

#[derive(Parser, Debug)]
#[command(
    name = "sparse-matrix",
    version,
    about = "Add, subtract or multiply two sparse matrices stored in the rows=/cols= text format"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute A + B
    Add(Operands),
    /// Compute A - B
    Subtract(Operands),
    /// Compute A × B
    Multiply(Operands),
}

#[derive(clap::Args, Debug)]
struct Operands {
    /// File holding the left operand
    a: PathBuf,

    /// File holding the right operand
    b: PathBuf,

    /// Also write the result to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the result to stdout
    #[arg(short, long)]
    quiet: bool,
}

impl Command {
    fn split(self) -> (Operation, Operands) {
        match self {
            Command::Add(operands) => (Operation::Add, operands),
            Command::Subtract(operands) => (Operation::Subtract, operands),
            Command::Multiply(operands) => (Operation::Multiply, operands),
        }
    }
}

fn load(path: &Path) -> Result<SparseMatrix> {
    TextFormat::read_file(path)
        .with_context(|| format!("failed to load matrix from {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (op, operands) = cli.command.split();

    let a = load(&operands.a)?;
    let b = load(&operands.b)?;
    info!(
        "{}: A is {}x{} ({} non-zeros), B is {}x{} ({} non-zeros)",
        op,
        a.rows(),
        a.cols(),
        a.nnz(),
        b.rows(),
        b.cols(),
        b.nnz()
    );

    let result = op.apply(&a, &b).with_context(|| {
        format!(
            "failed to {} {} and {}",
            op,
            operands.a.display(),
            operands.b.display()
        )
    })?;

    if !operands.quiet {
        println!("{}", result);
    }

    if let Some(path) = &operands.output {
        TextFormat::write_file(path, &result)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        info!("result saved to {}", path.display());
    }

    Ok(())
}
