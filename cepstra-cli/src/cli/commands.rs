//! Command implementation and argument parsing for the cepstra CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use cepstra_core::{
    ConfigError, ExtractError, ExtractionSummary, Extractor, ExtractorBuilder, Family,
};
use clap::Parser;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::params::{ParameterKey, Parameters, parse_parameters};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "cepstra",
    about = "Extract selected cepstral coefficients from an HList feature report.",
    after_help = "Parameters: input=PATH output=PATH [C=ORDERS] [D=ORDERS] [A=ORDERS] [frames=N]\n\
                  ORDERS is a comma-separated list of orders in 0..=12, e.g. C=0,1,2.\n\
                  Columns are written C first, then D, then A.\n\
                  Other switches are accepted and ignored."
)]
pub struct Cli {
    /// Do not echo word names to standard output.
    #[arg(short = 'S')]
    pub silent: bool,

    /// Conversion parameters given as KEY=VALUE. Other `-` switches may be
    /// mixed in; `S` among their letters silences the echo.
    #[arg(value_name = "KEY=VALUE", required = true, allow_hyphen_values = true)]
    pub parameters: Vec<String>,
}

/// Errors surfaced while executing the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// A required parameter was not supplied.
    #[error("missing required parameter `{key}=`")]
    MissingParameter {
        /// The absent key.
        key: ParameterKey,
    },
    /// A parameter used a key the converter does not know.
    #[error("unknown parameter `{key}`; expected input, output, C, D, A or frames")]
    UnknownParameter {
        /// The unrecognised key.
        key: String,
    },
    /// The same key was given twice.
    #[error("parameter `{key}` given more than once")]
    DuplicateParameter {
        /// The repeated key.
        key: ParameterKey,
    },
    /// An argument was not of the form `KEY=VALUE`.
    #[error("expected KEY=VALUE but found `{argument}`")]
    MalformedParameter {
        /// The argument as given.
        argument: String,
    },
    /// The `frames` value was not a non-negative integer.
    #[error("frame limit `{value}` is not a non-negative integer")]
    InvalidFrameLimit {
        /// The value as given, after trimming.
        value: String,
    },
    /// The input report could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Open {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The output file could not be created.
    #[error("failed to create `{path}`: {source}")]
    Create {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Coefficient orders were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Conversion failed part way through.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl CliError {
    /// Returns the stable code of the underlying core error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Config(err) => Some(err.code().as_str()),
            Self::Extract(err) => Some(err.code().as_str()),
            _ => None,
        }
    }
}

/// Executes the conversion described by `cli`, echoing word names to
/// `status` unless `-S` was given.
///
/// # Errors
/// Returns [`CliError`] when parameters are invalid, a file cannot be
/// opened, or the conversion fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cepstra_cli::cli::{Cli, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let input = dir.path().join("report.txt");
/// let output = dir.path().join("frames.csv");
/// std::fs::write(&input, "--- Source- plum.wav ---\n")?;
/// let cli = Cli {
///     silent: false,
///     parameters: vec![
///         format!("input={}", input.display()),
///         format!("output={}", output.display()),
///     ],
/// };
/// let mut status = Vec::new();
/// let summary = run_cli(cli, &mut status)?;
/// assert_eq!(summary.words, 1);
/// assert_eq!(status, b"plum\n");
/// assert_eq!(std::fs::read_to_string(&output)?, "plum\n");
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, status),
    fields(silent = cli.silent, parameters = cli.parameters.len()),
)]
pub fn run_cli(cli: Cli, status: impl Write) -> Result<ExtractionSummary, CliError> {
    let Cli {
        silent,
        parameters: arguments,
    } = cli;
    let parameters = parse_parameters(&arguments)?;
    let extractor = build_extractor(&parameters, silent || parameters.silent)?;
    run_extraction(&extractor, &parameters, status)
}

#[instrument(
    name = "cli.configure",
    err,
    skip(parameters),
    fields(order_lists = parameters.orders.len(), frame_limit = field::Empty),
)]
pub(super) fn build_extractor(parameters: &Parameters, silent: bool) -> Result<Extractor, CliError> {
    let mut builder = ExtractorBuilder::new().with_word_echo(!silent);
    // columns are grouped C, D, A whatever order the lists were given in
    for family in Family::ALL {
        for (_, raw) in parameters.orders.iter().filter(|(given, _)| *given == family) {
            builder = builder.with_orders(family, raw.as_str());
        }
    }
    if let Some(limit) = parameters.frame_limit {
        Span::current().record("frame_limit", limit);
        builder = builder.with_frame_limit(limit);
    }

    let extractor = builder.build()?;
    let columns: Vec<String> = extractor.requested().iter().map(ToString::to_string).collect();
    info!(columns = %columns.join(","), "coefficients selected");
    Ok(extractor)
}

#[instrument(
    name = "cli.extract",
    err,
    skip(extractor, parameters, status),
    fields(input = field::Empty, output = field::Empty),
)]
pub(super) fn run_extraction(
    extractor: &Extractor,
    parameters: &Parameters,
    mut status: impl Write,
) -> Result<ExtractionSummary, CliError> {
    let span = Span::current();
    span.record("input", field::display(parameters.input.display()));
    span.record("output", field::display(parameters.output.display()));

    // Open the input first so a missing report leaves the output untouched.
    let reader = open_input(&parameters.input)?;
    let writer = create_output(&parameters.output)?;
    let summary = extractor.run(reader, writer, &mut status)?;
    info!(
        words = summary.words,
        frames = summary.frames,
        frames_skipped = summary.frames_skipped,
        "conversion completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[instrument(name = "cli.create_output", err, fields(path = field::Empty))]
pub(super) fn create_output(path: &Path) -> Result<BufWriter<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::create(path).map_err(|source| CliError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
