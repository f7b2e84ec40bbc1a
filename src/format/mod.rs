//! Text format readers and writers.
//!
//! Two dialects are supported, each with a `read` and a `write` entry point:
//! [`pcs`] (explicit declarations with dedicated condition and forbidden
//! sections) and [`irace`] (compact switch-style declarations with conditions
//! spliced inline). The forbidden-clause literal syntax and the per-child
//! condition assembly are shared between the two.

mod assemble;
mod expand;

pub mod error;
pub mod irace;
pub mod pcs;

pub use error::FormatError;
