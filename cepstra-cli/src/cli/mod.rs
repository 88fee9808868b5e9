//! Command-line interface for converting HList feature reports.
//!
//! The binary takes `KEY=VALUE` parameters in the style of the HTK
//! tooling (`input=`, `output=`, `C=`, `D=`, `A=`, `frames=`) plus the `-S`
//! switch, and streams the input report into the output file.

mod commands;
mod params;

pub use commands::{Cli, CliError, run_cli};
pub use params::{ParameterKey, Parameters, parse_parameters};

#[cfg(test)]
mod test_helpers;
