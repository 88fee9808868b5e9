//! Support library for the cepstra CLI binary.
//!
//! Exposes argument handling and logging setup so integration tests can drive
//! a conversion without spawning a subprocess.

pub mod cli;
pub mod logging;
