use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for townwalk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and the headless smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Run the town build and collision benchmarks
    Bench,
    /// Build the town and walk the player headlessly through the CLI
    Smoke,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt", &["fmt", "--all", "--", "--check"])?;
            cargo("clippy", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
            cargo("test", &["test", "--workspace"])?;
            smoke()?;
        }
        Commands::Fmt => cargo("fmt", &["fmt", "--all", "--", "--check"])?,
        Commands::Clippy => cargo("clippy", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?,
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Bench => cargo("bench", &["bench", "-p", "townwalk-world", "--bench", "bench_town"])?,
        Commands::Smoke => smoke()?,
    }

    Ok(())
}

fn smoke() -> Result<()> {
    cargo("layout", &["run", "-q", "-p", "townwalk-cli", "--", "layout"])?;
    cargo(
        "simulate",
        &["run", "-q", "-p", "townwalk-cli", "--", "simulate", "--frames", "90", "--toggle-at", "30"],
    )
}

fn cargo(what: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {what}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {what} failed");
    }
    Ok(())
}
