//! Diagnostics for the BCON pipeline.
//!
//! Stage errors (`LexError`, `ParseError`, `EvalError`) stay structured in
//! their own crates and convert into a [`Diagnostic`] through
//! [`IntoDiagnostic`] only when a host wants to print them.

mod diagnostic;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, IntoDiagnostic, Location, Severity};
pub use error_code::ErrorCode;

#[cfg(test)]
mod tests;
