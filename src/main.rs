//!
//! cargo-strgen
//! This is the entry point for our cargo extension, and what is ultimately run
//! when you type `cargo strgen` on the command line. To run, it must be present
//! in the user's path.
//!
//!  # What it does
//!
//! Every struct in the crate carrying the marker attribute (by default
//! `#[crate::strgen::GenerateDisplay]`) gets a generated `Display` impl written
//! to the output directory, one file per type. The crate pulls each file in
//! with `include!` next to the struct.
//!
//! rustc itself doesn't accept the marker struct as an attribute. The crate
//! registers an attribute of the same name, usually a pass-through attribute
//! macro re-exported from the marker module; see the README.
//!
//!  # Incremental runs
//!
//! A `manifest.json` next to the generated files records what each one was
//! generated from. The next run starts from it, and only rewrites files whose
//! struct actually changed, so cargo's own change detection isn't tripped by
//! files that were rewritten with identical content. `cargo strgen watch`
//! keeps the same state in memory between passes.
//!

mod generate;
mod project;
mod watch;

use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use anyhow::{Context, Result};
use cargo_strgen_common::cli::{StrgenArgs, StrgenCommand};
use cargo_strgen_config::{ConfigBuilder, DEFAULT_CONFIG_FILE};
use std::env;
use std::path::Path;
use std::process::exit;

use crate::generate::{Session, print_run, print_summaries};
use crate::project::{Project, ProjectType, validate_project};

fn show_help() {
    println!("{}", help_message());
}

fn show_version() {
    println!(
        "{} {}",
        Style::new().bold().paint("cargo-strgen version"),
        Green.paint(env!("CARGO_PKG_VERSION"))
    );
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

pub fn main() {
    // Handle help and version flags
    if env::args().any(|a| a == "--help" || a == "-h") {
        show_help();
        return;
    }

    if env::args().any(|a| a == "--version" || a == "-V") {
        show_version();
        return;
    }

    init_tracing();

    let args = StrgenArgs::parse(env::args());
    for unknown in &args.unknown_args {
        eprintln!("{} ignoring unknown argument '{}'", Yellow.paint("Warning:"), unknown);
    }

    let root = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} {}", Red.bold().paint("Error:"), e);
            exit(1);
        }
    };

    if args.command != StrgenCommand::GenerateConfig
        && validate_project(&root) == ProjectType::OtherDirectory
    {
        println!("{}", Red.bold().paint("Not in a Cargo project directory!"));
        println!(
            "{}",
            Yellow.paint("cargo-strgen generates Display implementations for Rust structs.")
        );
        println!("It needs to be run from a directory containing a Cargo.toml file.");
        exit(-1)
    }

    if let Err(e) = process(&root, &args) {
        eprintln!("{} {:#}", Red.bold().paint("Error:"), e);
        exit(1);
    }
}

fn process(root: &Path, args: &StrgenArgs) -> Result<()> {
    match args.command {
        StrgenCommand::GenerateConfig => process_generate_config(root),
        StrgenCommand::PrintSummaries => print_summaries(&Project::load(root, args)?),
        StrgenCommand::Watch => watch::watch(Project::load(root, args)?),
        StrgenCommand::Generate => {
            let mut session = Session::open(Project::load(root, args)?)?;
            let run = session.pass()?;
            print_run(&run);
            Ok(())
        }
    }
}

fn process_generate_config(root: &Path) -> Result<()> {
    let path = root.join(DEFAULT_CONFIG_FILE);
    if path.exists() {
        println!("{} already exists, leaving it alone.", path.display());
        println!("Remove it if you want to regenerate the configuration.");
        return Ok(());
    }

    ConfigBuilder::new()
        .write_to_file(&path)
        .context(format!("Failed to write {}", path.display()))?;
    println!("Created {}", Green.paint(DEFAULT_CONFIG_FILE));
    Ok(())
}

#[must_use]
pub fn help_message() -> String {
    format!("
{title}: Generates Display implementations for marked structs.

{usage_label}:
    cargo strgen [COMMAND] [OPTIONS]

{commands_label}:
    {generate}          Generate artifacts for changed types (default)
    {print_summaries}   Print every marked type and its public fields
    {generate_config}   Generates an initial strgen.ron for your project
    {watch}             Regenerate whenever the sources change

{options_label}:
    --config PATH          Configuration file to use instead of strgen.ron
    --out-dir PATH         Directory to write artifacts to
    -h, --help             Print this message
    -V, --version          Print version info and exit

{note}: RUST_LOG=debug shows which types were regenerated and why.
",
        title = Style::new().bold().paint("cargo-strgen"),
        usage_label = Blue.bold().paint("Usage"),
        commands_label = Blue.bold().paint("Commands"),
        generate = Green.paint("generate"),
        print_summaries = Green.paint("print-summaries"),
        generate_config = Green.paint("generate-config"),
        watch = Green.paint("watch"),
        options_label = Blue.bold().paint("Options"),
        note = Yellow.paint("Logging"))
}
