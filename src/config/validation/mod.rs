//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Validators for gateway, server and logging configuration
//! - `tests`: Test suite for all validators

mod config_validators;
mod trait_def;

pub use trait_def::Validate;
