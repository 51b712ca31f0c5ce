//! Command-line handling.

pub mod run;
