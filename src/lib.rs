//! Lokit - hardcoded text detection and translation key analysis
//!
//! Lokit finds user-visible text that bypasses translation in Vue, script
//! and HTML sources, relates translation calls to locale JSON files, and
//! rewrites sources and locales when keys are extracted, renamed, inlined or
//! deleted.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Detection and analysis engine
//! - `issues`: Issue types reported by `check`

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
