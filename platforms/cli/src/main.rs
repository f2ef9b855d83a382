use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tapewalk::{ProgramLoader, TuringMachine};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs a single-tape Turing machine described by a JSON program file.
///
/// Before every cycle the tape is printed with a `^` under the head; the number of
/// executed steps is printed once the machine halts. Set `RUST_LOG=info` to also see
/// why it halted.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The program description file to execute
    #[clap(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let program = ProgramLoader::load_program(&cli.file)
        .with_context(|| format!("failed to load program from {}", cli.file.display()))?;
    let mut machine = TuringMachine::new(program).context("failed to start machine")?;

    let result = machine
        .run_with(|snapshot| println!("{}", snapshot))
        .context("machine failed")?;

    println!("{}", result.step_count);
    info!(reason = %result.halt_reason, steps = result.step_count, "run finished");

    Ok(())
}
