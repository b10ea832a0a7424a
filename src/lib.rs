//! # katas
//!
//! Three small exercises behind one CLI:
//!
//! - **combos**: every distinct ordered combination of candidates that sums to
//!   a target, found by an exhaustive parallel walk over index paths
//! - **salary**: net salary over progressive tax brackets
//! - **pig latin**: phrase translation that keeps case and punctuation
//!
//! ## Quick Start
//!
//! ```bash
//! katas combos 10,1,2,7,1,6,2,5 8
//! katas salary 15000,25000
//! katas pig-latin "How will we know it's correct?"
//! ```
//!
//! ```rust
//! use katas::combos::generate;
//!
//! let result = generate(&[10, 1, 2, 7, 1, 6, 2, 5], 8);
//! assert_eq!(result.len(), 7);
//! assert!(result.contains(&vec![2, 1, 5]));
//! ```

pub mod cli;
pub mod combos;
pub mod config;
pub mod parallel;
pub mod pig_latin;
pub mod salary;

pub use cli::{Cli, Output};
pub use config::{KatasConfig, Settings};

/// Result type alias for katas operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
