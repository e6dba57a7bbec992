//! Style and semantic checker for PAL assembly sources.
//!
//! [`checker::check_source`] runs the line pass over a loaded program and
//! [`report::render_report`] turns the result into the text report.

use tracing_subscriber as _;

/// Line pass producing the listing, tallies and warnings.
pub mod checker;
/// Diagnostic kinds, categories and warnings.
pub mod diagnostics;
/// Fatal I/O error types.
pub mod errors;
/// Opcode table with arity and operand rules.
pub mod mnemonic;
/// Operand classification against slot rules.
pub mod operand;
/// Line classification and field splitting.
pub mod parser;
/// Text report rendering and writing.
pub mod report;
/// Source loading into numbered lines.
pub mod source;
/// Label and memory-location bookkeeping.
pub mod symbols;
