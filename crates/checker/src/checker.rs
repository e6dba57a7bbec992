//! The line pass: validates every source line and tallies the outcome.
//!
//! The pass runs in two phases:
//!
//! 1. **Pre-scan**: every line containing `:` declares a label
//!    ([`SymbolTable::from_lines`]).
//! 2. **Line checks**: each line is classified, then its label, opcode,
//!    arity and operands are checked in that order. The first failure
//!    rejects the line; a line with no failure is accepted. `END` stops the
//!    pass.
//!
//! Afterwards every declared label that no branch consumed becomes a
//! [`Warning::UnusedLabel`].

use std::fmt;

use tracing::{debug, trace};

use crate::diagnostics::{CategoryCounts, Diagnostic, DiagnosticKind, Warning};
use crate::mnemonic::{lookup_opcode, ControlMarker, OpcodeSpec, OperandRule};
use crate::operand::{check_operand, looks_numeric};
use crate::parser::{parse_line, ParsedInstruction, ParsedLine, MAX_OPERANDS};
use crate::source::SourceLine;
use crate::symbols::SymbolTable;

/// Longest label accepted.
pub const MAX_LABEL_LEN: usize = 5;

/// Field count above which a three-operand instruction has too many operands.
pub const MAX_THREE_OPERAND_FIELDS: usize = 8;

/// One numbered entry of the report listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEntry {
    /// A line that passed every check (including `SRT` and `END`).
    Accepted(SourceLine),
    /// A line rejected with a diagnostic.
    Rejected(Diagnostic),
}

impl ListingEntry {
    /// 1-indexed source line number of the entry.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Accepted(line) => line.number,
            Self::Rejected(diagnostic) => diagnostic.line,
        }
    }

    /// The diagnostic, if the line was rejected.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(diagnostic) => Some(diagnostic),
        }
    }
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted(line) => write!(f, "{}", line.text),
            Self::Rejected(diagnostic) => write!(f, "{diagnostic}"),
        }
    }
}

/// Everything one check run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Listing entries in source order.
    pub listing: Vec<ListingEntry>,
    /// Warnings, in declaration order.
    pub warnings: Vec<Warning>,
    /// Error tallies per category.
    pub counts: CategoryCounts,
    /// Line number of the `END` that stopped the pass, if any.
    pub halted_at: Option<usize>,
}

impl CheckResult {
    /// Total number of errors.
    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.counts.total()
    }

    /// Returns true if any line was rejected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.total_errors() > 0
    }

    /// Iterates the rejected lines.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.listing.iter().filter_map(ListingEntry::diagnostic)
    }
}

/// How the pass continues after an accepted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// Checks a whole program.
#[must_use]
pub fn check_source(lines: &[SourceLine]) -> CheckResult {
    let mut symbols = SymbolTable::from_lines(lines);
    debug!(
        declared = symbols.declared_labels().len(),
        "collected label declarations"
    );

    let mut result = CheckResult::default();

    for line in lines {
        let (text, outcome) = match parse_line(&line.text) {
            ParsedLine::Blank | ParsedLine::Comment => {
                trace!(line = line.number, "skipped");
                continue;
            }
            ParsedLine::MissingEndLineOperator => (
                line.text.clone(),
                Err(DiagnosticKind::MissingEndLineOperator),
            ),
            ParsedLine::Instruction { code, instruction } => {
                let outcome = check_instruction(&instruction, &mut symbols);
                (code, outcome)
            }
        };

        match outcome {
            Ok(flow) => {
                trace!(line = line.number, "accepted");
                result
                    .listing
                    .push(ListingEntry::Accepted(SourceLine::new(text, line.number)));
                if flow == Flow::Halt {
                    debug!(line = line.number, "END reached, halting");
                    result.halted_at = Some(line.number);
                    break;
                }
            }
            Err(kind) => {
                trace!(line = line.number, category = ?kind.category(), "rejected");
                result.counts.record(kind.category());
                result.listing.push(ListingEntry::Rejected(Diagnostic {
                    line: line.number,
                    text,
                    kind,
                }));
            }
        }
    }

    result.warnings = symbols
        .unused_labels()
        .into_iter()
        .map(Warning::UnusedLabel)
        .collect();

    debug!(
        entries = result.listing.len(),
        errors = result.total_errors(),
        warnings = result.warnings.len(),
        "check complete"
    );
    result
}

fn check_instruction(
    instruction: &ParsedInstruction,
    symbols: &mut SymbolTable,
) -> Result<Flow, DiagnosticKind> {
    if let Some(label) = &instruction.label {
        check_label(label)?;
    }

    let Some(opcode) = instruction.opcode.as_deref() else {
        return Err(DiagnosticKind::MissingOpcode);
    };

    match ControlMarker::parse(opcode) {
        Some(ControlMarker::Start) => return Ok(Flow::Continue),
        Some(ControlMarker::End) => return Ok(Flow::Halt),
        None => {}
    }

    let spec =
        lookup_opcode(opcode).ok_or_else(|| DiagnosticKind::UnknownOpcode(opcode.to_string()))?;

    check_arity(spec, instruction)?;
    check_operands(spec, instruction, symbols)?;
    Ok(Flow::Continue)
}

fn check_label(label: &str) -> Result<(), DiagnosticKind> {
    if label.chars().count() > MAX_LABEL_LEN {
        Err(DiagnosticKind::LabelTooLong)
    } else if looks_numeric(label) {
        Err(DiagnosticKind::LabelContainsDigit)
    } else {
        Ok(())
    }
}

fn check_arity(spec: &OpcodeSpec, instruction: &ParsedInstruction) -> Result<(), DiagnosticKind> {
    let required = spec.arity.count();
    let is_present = |slot: usize| instruction.operand(slot).is_some();

    if !(0..required).all(is_present) {
        return Err(DiagnosticKind::TooFewOperands(spec.arity));
    }

    let too_many = if required == MAX_OPERANDS {
        instruction.field_count > MAX_THREE_OPERAND_FIELDS
    } else {
        (required..MAX_OPERANDS).any(is_present)
    };

    if too_many {
        Err(DiagnosticKind::TooManyOperands(spec.arity))
    } else {
        Ok(())
    }
}

fn check_operands(
    spec: &OpcodeSpec,
    instruction: &ParsedInstruction,
    symbols: &mut SymbolTable,
) -> Result<(), DiagnosticKind> {
    let mut operands = Vec::with_capacity(spec.rules.len());
    for (slot, &rule) in spec.rules.iter().enumerate() {
        let token = instruction
            .operand(slot)
            .ok_or(DiagnosticKind::TooFewOperands(spec.arity))?;
        check_operand(rule, token, symbols)?;
        operands.push((rule, token));
    }

    for (rule, token) in operands {
        match rule {
            OperandRule::NewMemoryLocation => symbols.define_memory_location(token),
            OperandRule::Label => symbols.reference_label(token),
            _ => {}
        }
    }
    Ok(())
}
