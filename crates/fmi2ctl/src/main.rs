use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use fmi2_xml::Causality;
use tracing_subscriber::EnvFilter;

use fmi2ctl::cmd_info;
use fmi2ctl::cmd_structure;
use fmi2ctl::cmd_vars;

#[derive(Parser, Debug)]
#[command(name = "fmi2ctl", version, about = "FMI 2.0 model description inspector")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Output JSON where applicable
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show model identity, interfaces and default experiment
    Info {
        /// Path to modelDescription.xml
        path: PathBuf,
    },
    /// List scalar variables
    Vars {
        /// Path to modelDescription.xml
        path: PathBuf,
        /// Only show variables with this causality (e.g. output, parameter)
        #[arg(long)]
        causality: Option<Causality>,
    },
    /// Show outputs, derivatives and initial unknowns with dependencies
    Structure {
        /// Path to modelDescription.xml
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let Cli { verbose, json, cmd } = Cli::parse();

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cmd {
        Cmd::Info { path } => cmd_info::run(&path, json)?,
        Cmd::Vars { path, causality } => cmd_vars::run(&path, causality, json)?,
        Cmd::Structure { path } => cmd_structure::run(&path, json)?,
    };

    Ok(())
}
