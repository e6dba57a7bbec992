//! Operand token classification.
//!
//! A token is numeric-looking when it contains an ASCII digit anywhere, so
//! `M1` and `12ab` both qualify.

use crate::diagnostics::DiagnosticKind;
use crate::mnemonic::OperandRule;
use crate::symbols::SymbolTable;

/// Register names.
pub const REGISTERS: [&str; 8] = ["R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7"];

/// Longest memory-location name allowed when the name contains a digit.
pub const MAX_NUMERIC_NAME_LEN: usize = 5;

/// Returns true for `R0` through `R7` (case-sensitive).
#[must_use]
pub fn is_register(token: &str) -> bool {
    REGISTERS.contains(&token)
}

/// Returns true if the token contains at least one ASCII digit.
#[must_use]
pub fn looks_numeric(token: &str) -> bool {
    token.chars().any(|ch| ch.is_ascii_digit())
}

/// Checks one operand against the rule for its slot.
///
/// # Errors
///
/// Returns the diagnostic for the first way the token fails the rule.
pub fn check_operand(
    rule: OperandRule,
    token: &str,
    symbols: &SymbolTable,
) -> Result<(), DiagnosticKind> {
    let is_storage = is_register(token) || symbols.is_memory_location(token);

    match rule {
        OperandRule::Label if symbols.is_declared_label(token) => Ok(()),
        OperandRule::Label if is_register(token) => {
            Err(DiagnosticKind::WrongOperandType(token.to_string()))
        }
        OperandRule::Label => Err(DiagnosticKind::UnknownLabel(token.to_string())),

        OperandRule::Storage if is_storage => Ok(()),
        OperandRule::Register if is_register(token) => Ok(()),
        OperandRule::Storage | OperandRule::Register => Err(misplaced_operand(token)),

        OperandRule::Source if is_storage || looks_numeric(token) => Ok(()),
        OperandRule::Arithmetic if is_register(token) || looks_numeric(token) => Ok(()),
        OperandRule::Source | OperandRule::Arithmetic => Err(
            DiagnosticKind::NotNumberOrMemoryLocation(token.to_string()),
        ),

        OperandRule::NewMemoryLocation
            if token.chars().count() > MAX_NUMERIC_NAME_LEN && looks_numeric(token) =>
        {
            Err(DiagnosticKind::MalformedMemoryLocation(token.to_string()))
        }
        OperandRule::NewMemoryLocation => Ok(()),
    }
}

fn misplaced_operand(token: &str) -> DiagnosticKind {
    if looks_numeric(token) {
        DiagnosticKind::WrongOperandType(token.to_string())
    } else {
        DiagnosticKind::UnrecognizedMemoryLocation(token.to_string())
    }
}
