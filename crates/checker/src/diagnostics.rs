//! Diagnostic categories, messages and per-category tallies.
//!
//! A [`DiagnosticKind`] carries the exact message printed under a rejected
//! line in the report, and maps to one of the seven summary [`Category`]s.

use std::fmt;

use thiserror::Error;

use crate::mnemonic::Arity;

/// Error categories tallied in the report summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Label too long or containing digits.
    IllFormedLabel,
    /// Opcode missing or not in the instruction set.
    InvalidOpcode,
    /// Fewer operands than the opcode requires (also missing `ELO`).
    TooFewOperands,
    /// More operands than the opcode allows.
    TooManyOperands,
    /// Operand matches none of the kinds its slot accepts.
    IllFormedOperand,
    /// Operand is a register or number where something else belongs.
    WrongOperandType,
    /// Branch target is not a declared label.
    LabelProblem,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 7;

    /// Every category, in summary order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::IllFormedLabel,
        Self::InvalidOpcode,
        Self::TooFewOperands,
        Self::TooManyOperands,
        Self::IllFormedOperand,
        Self::WrongOperandType,
        Self::LabelProblem,
    ];

    /// Label used for this category in the report summary.
    #[must_use]
    pub const fn summary_label(self) -> &'static str {
        match self {
            Self::IllFormedLabel => "Ill Formed Label",
            Self::InvalidOpcode => "Invalid Opcode",
            Self::TooFewOperands => "Too Few Operands",
            Self::TooManyOperands => "Too Many Operands",
            Self::IllFormedOperand => "Ill Formed Operands",
            Self::WrongOperandType => "Wrong Operand Type",
            Self::LabelProblem => "Label Problem",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// A comment without the trailing `ELO` marker.
    #[error("End line operator is required following a comment.")]
    MissingEndLineOperator,
    /// Label longer than five characters.
    #[error("Ill Formed Label. Limit of 5 characters.")]
    LabelTooLong,
    /// Label containing a digit.
    #[error("Ill Formed Label. Label cannot contain numbers.")]
    LabelContainsDigit,
    /// Opcode not in the instruction set.
    #[error("Invalid Opcode. {0} was not found.")]
    UnknownOpcode(String),
    /// No opcode could be extracted from the line.
    #[error("Invalid Opcode. No opcode was found.")]
    MissingOpcode,
    /// A required operand is absent.
    #[error("Invalid number of operands. This command should have {}.", .0.describe())]
    TooFewOperands(Arity),
    /// An operand beyond the opcode's arity is present.
    #[error("Invalid number of operands. This command should have {}.", .0.describe())]
    TooManyOperands(Arity),
    /// A register or number where a memory location or label belongs.
    #[error("Wrong Operand Type. {0} should be a memory location.")]
    WrongOperandType(String),
    /// Neither a register nor a defined memory location.
    #[error("Ill Formed Operand. {0} is not a recognized memory location.")]
    UnrecognizedMemoryLocation(String),
    /// Neither a number, a register, nor a defined memory location.
    #[error("Ill Formed Operand. {0} is not a number or recognized memory location.")]
    NotNumberOrMemoryLocation(String),
    /// A `DEF` name that is both long and numeric-looking.
    #[error("Ill Formed Operand. {0} does not fit the rules for a memory location.")]
    MalformedMemoryLocation(String),
    /// Branch target not declared anywhere in the file.
    #[error("Label Error. {0} is not a recognized label.")]
    UnknownLabel(String),
}

impl DiagnosticKind {
    /// The summary category this diagnostic is counted under.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::LabelTooLong | Self::LabelContainsDigit => Category::IllFormedLabel,
            Self::UnknownOpcode(_) | Self::MissingOpcode => Category::InvalidOpcode,
            Self::MissingEndLineOperator | Self::TooFewOperands(_) => Category::TooFewOperands,
            Self::TooManyOperands(_) => Category::TooManyOperands,
            Self::UnrecognizedMemoryLocation(_)
            | Self::NotNumberOrMemoryLocation(_)
            | Self::MalformedMemoryLocation(_) => Category::IllFormedOperand,
            Self::WrongOperandType(_) => Category::WrongOperandType,
            Self::UnknownLabel(_) => Category::LabelProblem,
        }
    }
}

/// A rejected line and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-indexed source line number.
    pub line: usize,
    /// Line text as checked (the code part when a trailing comment was split off).
    pub text: String,
    /// Reason for rejection.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// The summary category of this diagnostic.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.kind.category()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n   **{}", self.text, self.kind)
    }
}

/// A non-fatal finding that never affects the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A label no branch ever targets.
    UnusedLabel(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnusedLabel(label) => write!(f, "{label} is never accessed."),
        }
    }
}

/// Error tallies per [`Category`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts([usize; Category::COUNT]);

impl CategoryCounts {
    /// Counts one diagnostic of the given category.
    pub fn record(&mut self, category: Category) {
        self.0[category.index()] += 1;
    }

    /// Returns the count for one category.
    #[must_use]
    pub const fn get(&self, category: Category) -> usize {
        self.0[category.index()]
    }

    /// Returns the total across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Iterates categories with a non-zero count, in summary order.
    pub fn non_zero(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, count)| *count > 0)
    }
}
