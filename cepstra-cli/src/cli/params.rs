//! `KEY=VALUE` parameter parsing.
//!
//! Each argument is split at its first `=`; key and value are trimmed and
//! must both be non-empty. Keys are case-sensitive. Arguments starting with
//! `-` are switches: `S` silences the word echo and other letters are
//! ignored.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use cepstra_core::Family;
use tracing::debug;

use super::commands::CliError;

/// Keys accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    /// `input=`: report to read.
    Input,
    /// `output=`: file to create or truncate.
    Output,
    /// `frames=`: exclusive upper bound on written frame ids.
    Frames,
    /// `C=`, `D=` or `A=`: comma-separated coefficient orders.
    Orders(Family),
}

impl ParameterKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            "frames" => Some(Self::Frames),
            other => Family::from_label(other).map(Self::Orders),
        }
    }

    /// Returns the key as written on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Frames => "frames",
            Self::Orders(family) => family.label(),
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters collected from the command line, before order lists are
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    /// Report to read.
    pub input: PathBuf,
    /// File to write.
    pub output: PathBuf,
    /// Exclusive upper bound on written frame ids.
    pub frame_limit: Option<u64>,
    /// Raw order lists in the order they were given.
    pub orders: Vec<(Family, String)>,
    /// Whether an `-S` switch appeared among the arguments.
    pub silent: bool,
}

/// Parses `KEY=VALUE` arguments and `-` switches.
///
/// # Errors
/// Returns [`CliError::MalformedParameter`] for arguments without a key and a
/// value, [`CliError::UnknownParameter`] and [`CliError::DuplicateParameter`]
/// for unexpected or repeated keys, [`CliError::InvalidFrameLimit`] when
/// `frames` is not a non-negative integer, and
/// [`CliError::MissingParameter`] when `input` or `output` is absent.
///
/// # Examples
/// ```
/// use cepstra_cli::cli::parse_parameters;
/// use cepstra_core::Family;
///
/// let parameters = parse_parameters(["input=in.txt", "D=0", "output=out.txt", "C=1,2"])?;
/// assert_eq!(parameters.input.to_str(), Some("in.txt"));
/// assert_eq!(
///     parameters.orders,
///     [(Family::D, "0".to_owned()), (Family::C, "1,2".to_owned())],
/// );
/// # Ok::<(), cepstra_cli::cli::CliError>(())
/// ```
pub fn parse_parameters<I, S>(arguments: I) -> Result<Parameters, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut input = None;
    let mut output = None;
    let mut frame_limit = None;
    let mut orders = Vec::new();
    let mut silent = false;

    for argument in arguments {
        let text = argument.as_ref();
        if let Some(letters) = text.strip_prefix('-') {
            if letters.contains('S') {
                silent = true;
            } else {
                debug!(switch = text, "switch ignored");
            }
            continue;
        }
        let (name, value) = split_parameter(text)?;
        let key = ParameterKey::parse(name).ok_or_else(|| CliError::UnknownParameter {
            key: name.to_owned(),
        })?;
        if !seen.insert(key) {
            return Err(CliError::DuplicateParameter { key });
        }
        match key {
            ParameterKey::Input => input = Some(PathBuf::from(value)),
            ParameterKey::Output => output = Some(PathBuf::from(value)),
            ParameterKey::Frames => frame_limit = Some(parse_frame_limit(value)?),
            ParameterKey::Orders(family) => orders.push((family, value.to_owned())),
        }
    }

    Ok(Parameters {
        input: input.ok_or(CliError::MissingParameter {
            key: ParameterKey::Input,
        })?,
        output: output.ok_or(CliError::MissingParameter {
            key: ParameterKey::Output,
        })?,
        frame_limit,
        orders,
        silent,
    })
}

fn split_parameter(argument: &str) -> Result<(&str, &str), CliError> {
    argument
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .ok_or_else(|| CliError::MalformedParameter {
            argument: argument.to_owned(),
        })
}

fn parse_frame_limit(value: &str) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::InvalidFrameLimit {
        value: value.to_owned(),
    })
}
