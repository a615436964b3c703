//! Command-line interface for gearstash.

pub mod args;
pub mod commands;
