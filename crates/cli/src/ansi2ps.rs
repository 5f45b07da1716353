//! ansi2ps - Convert ANSI-colored text to PostScript
//!
//! Same layout as ansi2pdf; lines cut at the width limit end with ` ...`.

mod common;

use std::path::PathBuf;
use std::process::ExitCode;

use ansi2pdf_core::api::ConvertOptions;
use ansi2pdf_core::converter::{OutputFormat, PageSetup};
use anyhow::Result;
use clap::{ArgAction, Parser};

use common::{LayoutArgs, init_logging, run_conversion};

/// Convert ANSI-colored text from a file or stdin to PostScript.
#[derive(Parser, Debug)]
#[command(name = "ansi2ps")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file; stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Output file; stdout when omitted or "-"
    output: Option<PathBuf>,

    /// Header text centred at the top of every page
    #[arg(short = 'H', long)]
    header: Option<String>,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let options = ConvertOptions {
        layout: cli.layout.to_params()?,
        page: PageSetup::with_header(cli.header.clone()),
        format: OutputFormat::PostScript,
    };
    run_conversion(cli.input.as_ref(), cli.output.as_ref(), &options)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ansi2ps: {e:#}");
            ExitCode::FAILURE
        }
    }
}
