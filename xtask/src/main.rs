use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for axisview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc, smoke
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Drive the headless viewport through a short page lifecycle
    Smoke {
        /// Frames to render once the document is ready
        #[arg(short, long, default_value = "10")]
        frames: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
            run_smoke(3)?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Build => run_build()?,
        Commands::Smoke { frames } => run_smoke(frames)?,
    }

    Ok(())
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {step}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {step} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt --check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn run_tests() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn run_build() -> Result<()> {
    cargo("build", &["build", "--workspace"])
}

fn run_smoke(frames: u32) -> Result<()> {
    let frames = frames.to_string();
    cargo(
        "run (headless smoke)",
        &[
            "run",
            "-p",
            "axisview-cli",
            "--",
            "run",
            "--frames",
            &frames,
            "--resizes",
            "2",
        ],
    )
}
