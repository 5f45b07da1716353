//! Pieces shared by the ansi2pdf and ansi2ps binaries.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use ansi2pdf_core::api::{ConvertOptions, ConvertStats, convert, convert_to_path};
use ansi2pdf_core::layout::LayoutParams;
use anyhow::{Context, Result};
use clap::Args;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Wrapping and pagination options.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Maximum characters per printed line
    #[arg(short = 'w', long = "width", default_value = "80")]
    pub line_width: usize,

    /// Distance between tab stops
    #[arg(long = "tab-width", default_value = "8")]
    pub tab_width: usize,

    /// Printed lines per page
    #[arg(short = 'l', long = "lines-per-page", default_value = "55")]
    pub lines_per_page: usize,
}

impl LayoutArgs {
    pub fn to_params(&self) -> Result<LayoutParams> {
        LayoutParams::new(self.line_width, self.tab_width, self.lines_per_page)
            .context("invalid layout options")
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `debug`.
pub fn init_logging(debug: bool) {
    let default_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Open the input file, or stdin when absent or `-`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if !is_stdio(path) => {
            let file =
                File::open(p).with_context(|| format!("cannot open input {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Run the conversion to a file (atomically) or to stdout.
pub fn run_conversion(
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
    options: &ConvertOptions,
) -> Result<ConvertStats> {
    let reader = open_input(input.map(PathBuf::as_path))?;
    match output {
        Some(path) if !is_stdio(Some(path.as_path())) => {
            convert_to_path(reader, path, options)
                .with_context(|| format!("cannot write {}", path.display()))
        }
        _ => {
            let stdout = BufWriter::new(io::stdout().lock());
            convert(reader, stdout, options).context("cannot write to standard output")
        }
    }
}
