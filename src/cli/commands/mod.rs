//! Command implementations for the katas CLI
//!
//! Each command is organized into its own module.

pub mod combos;
pub mod config;
pub mod pig_latin;
pub mod salary;
pub mod version;
