//! # woundcare-cli
//!
//! Command-line front end for WoundCare. Every command signs in against the
//! configured gateway, runs one service operation and prints the result as
//! a table or JSON.

pub mod commands;
pub mod output;

pub use commands::Cli;
