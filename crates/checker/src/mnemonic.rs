//! Opcode table for the PAL instruction set.
//!
//! Each opcode maps to its arity and to the rule applied to every operand
//! slot. The line checker walks this table generically instead of branching
//! per opcode.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of operands an opcode requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one operand.
    One,
    /// Exactly two operands.
    Two,
    /// Exactly three operands.
    Three,
}

impl Arity {
    /// Returns the operand count.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Wording used in arity diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::One => "a single operand",
            Self::Two => "exactly 2 operands",
            Self::Three => "exactly 3 operands",
        }
    }
}

/// What an operand slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRule {
    /// A declared label; recorded as referenced when the line validates.
    Label,
    /// A register or a known memory location.
    Storage,
    /// A register, a known memory location, or a numeric-looking literal.
    Source,
    /// A register or a numeric-looking literal.
    Arithmetic,
    /// A memory location being introduced; recorded when the line validates.
    NewMemoryLocation,
    /// A register only.
    Register,
}

/// Opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeSpec {
    /// Mnemonic as written in source (case-sensitive).
    pub name: &'static str,
    /// Required operand count.
    pub arity: Arity,
    /// Rule per operand slot, in slot order.
    pub rules: &'static [OperandRule],
}

/// Markers that frame a program rather than perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMarker {
    /// `SRT`: start of program.
    Start,
    /// `END`: end of program; nothing after it is checked.
    End,
}

impl ControlMarker {
    /// Recognizes a control marker mnemonic.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SRT" => Some(Self::Start),
            "END" => Some(Self::End),
            _ => None,
        }
    }
}

/// The twelve PAL opcodes.
pub const OPCODE_SPECS: &[OpcodeSpec] = &[
    OpcodeSpec {
        name: "DEF",
        arity: Arity::Two,
        rules: &[OperandRule::NewMemoryLocation, OperandRule::Register],
    },
    OpcodeSpec {
        name: "COPY",
        arity: Arity::Two,
        rules: &[OperandRule::Storage, OperandRule::Storage],
    },
    OpcodeSpec {
        name: "MOVE",
        arity: Arity::Two,
        rules: &[OperandRule::Source, OperandRule::Storage],
    },
    OpcodeSpec {
        name: "ADD",
        arity: Arity::Three,
        rules: &[OperandRule::Arithmetic, OperandRule::Arithmetic, OperandRule::Storage],
    },
    OpcodeSpec {
        name: "INC",
        arity: Arity::One,
        rules: &[OperandRule::Storage],
    },
    OpcodeSpec {
        name: "SUB",
        arity: Arity::Three,
        rules: &[OperandRule::Arithmetic, OperandRule::Arithmetic, OperandRule::Storage],
    },
    OpcodeSpec {
        name: "DEC",
        arity: Arity::One,
        rules: &[OperandRule::Storage],
    },
    OpcodeSpec {
        name: "MUL",
        arity: Arity::Three,
        rules: &[OperandRule::Arithmetic, OperandRule::Arithmetic, OperandRule::Storage],
    },
    OpcodeSpec {
        name: "DIV",
        arity: Arity::Three,
        rules: &[OperandRule::Arithmetic, OperandRule::Arithmetic, OperandRule::Storage],
    },
    OpcodeSpec {
        name: "BEQ",
        arity: Arity::Three,
        rules: &[OperandRule::Source, OperandRule::Source, OperandRule::Label],
    },
    OpcodeSpec {
        name: "BGT",
        arity: Arity::Three,
        rules: &[OperandRule::Source, OperandRule::Source, OperandRule::Label],
    },
    OpcodeSpec {
        name: "BR",
        arity: Arity::One,
        rules: &[OperandRule::Label],
    },
];

fn opcode_index() -> &'static HashMap<&'static str, &'static OpcodeSpec> {
    static INDEX: OnceLock<HashMap<&'static str, &'static OpcodeSpec>> = OnceLock::new();
    INDEX.get_or_init(|| OPCODE_SPECS.iter().map(|spec| (spec.name, spec)).collect())
}

/// Looks up an opcode by mnemonic.
///
/// Matching is exact: `add` is not `ADD`.
#[must_use]
pub fn lookup_opcode(name: &str) -> Option<&'static OpcodeSpec> {
    opcode_index().get(name).copied()
}
