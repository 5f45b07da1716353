//! ansi2pdf - Typeset ANSI-colored text as a PDF document
//!
//! Reads a text stream containing ANSI color escapes (a build log, test
//! output, `ls --color` ...) and writes a paginated, fixed-width document.
//! PostScript and plain-text renderings of the same layout are available
//! through `--format`.

mod common;

use std::path::PathBuf;
use std::process::ExitCode;

use ansi2pdf_core::api::ConvertOptions;
use ansi2pdf_core::converter::{OutputFormat, PageSetup};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;

use common::{LayoutArgs, init_logging, run_conversion};

/// Output type for the rendered document.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// PDF document (default)
    Pdf,
    /// PostScript print stream
    Ps,
    /// Plain text, colors dropped
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => OutputFormat::Pdf,
            Format::Ps => OutputFormat::PostScript,
            Format::Text => OutputFormat::Text,
        }
    }
}

/// Convert ANSI-colored text from a file or stdin to PDF.
#[derive(Parser, Debug)]
#[command(name = "ansi2pdf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file; stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Output file; stdout when omitted or "-"
    output: Option<PathBuf>,

    /// Header text printed at the top of every page
    #[arg(short = 'H', long)]
    header: Option<String>,

    /// Type of output to generate (inferred from the output file name)
    #[arg(short = 't', long, value_enum)]
    format: Option<Format>,

    /// Font size in points
    #[arg(short = 's', long = "font-size", default_value = "8")]
    font_size: f32,

    /// Distance between baselines in points
    #[arg(long, default_value = "10")]
    leading: f32,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|p| p.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default()
    }

    fn options(&self) -> Result<ConvertOptions> {
        let page = PageSetup {
            font_size: self.font_size,
            leading: self.leading,
            ..PageSetup::with_header(self.header.clone())
        };
        page.validate().context("invalid page options")?;
        Ok(ConvertOptions {
            layout: self.layout.to_params()?,
            page,
            format: self.output_format(),
        })
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options()?;
    let stats = run_conversion(cli.input.as_ref(), cli.output.as_ref(), &options)?;
    if let Some(path) = &cli.output {
        info!(pages = stats.pages, "wrote {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ansi2pdf: {e:#}");
            ExitCode::FAILURE
        }
    }
}
