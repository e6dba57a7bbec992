//! Line classification and field splitting for PAL source.
//!
//! A line is first classified as blank, comment or instruction. Instruction
//! text is then split into fields on every comma and on every run of
//! whitespace. Empty fields between adjacent delimiters are kept, so in the
//! conventional layout
//!
//! ```text
//!  ADD R1, R2, R3
//! ```
//!
//! the opcode is field 1 (field 0 is the empty text before the indent) and
//! the operands sit at fields 2, 4 and 6, each comma-space pair leaving an
//! empty field behind.

/// Character starting a comment.
pub const COMMENT_MARKER: char = ';';
/// Literal that must end every line carrying a comment.
pub const END_LINE_OPERATOR: &str = "ELO";
/// Character terminating a label.
pub const LABEL_TERMINATOR: char = ':';
/// Maximum number of operand slots on a line.
pub const MAX_OPERANDS: usize = 3;

/// Field position of the opcode.
const OPCODE_FIELD: usize = 1;

/// A tokenized instruction line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInstruction {
    /// Text before the first `:`, verbatim.
    pub label: Option<String>,
    /// Opcode field, when the field count allows one.
    pub opcode: Option<String>,
    /// Operand fields, by slot.
    pub operands: [Option<String>; MAX_OPERANDS],
    /// Number of fields the instruction text split into.
    pub field_count: usize,
}

impl ParsedInstruction {
    /// Returns the operand in `slot` (0-based), if present.
    #[must_use]
    pub fn operand(&self, slot: usize) -> Option<&str> {
        self.operands.get(slot).and_then(Option::as_deref)
    }

    /// Number of operand slots that are filled.
    #[must_use]
    pub fn operand_count(&self) -> usize {
        self.operands.iter().flatten().count()
    }
}

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Empty or whitespace-only line.
    Blank,
    /// Comment-only content, correctly terminated with `ELO`.
    Comment,
    /// A comment that does not end with `ELO`.
    MissingEndLineOperator,
    /// Instruction text (with any trailing comment removed).
    Instruction {
        /// The code part of the line, as it will be echoed in the listing.
        code: String,
        /// The tokenized instruction.
        instruction: ParsedInstruction,
    },
}

/// Classifies and tokenizes one source line.
#[must_use]
pub fn parse_line(line: &str) -> ParsedLine {
    if line.is_empty() || is_whitespace_only(line) {
        return ParsedLine::Blank;
    }

    if line.starts_with(COMMENT_MARKER) {
        return if line.ends_with(END_LINE_OPERATOR) {
            ParsedLine::Comment
        } else {
            ParsedLine::MissingEndLineOperator
        };
    }

    let code = match line.split_once(COMMENT_MARKER) {
        Some(_) if !line.ends_with(END_LINE_OPERATOR) => {
            return ParsedLine::MissingEndLineOperator;
        }
        Some((code, _)) if is_whitespace_only(code) => return ParsedLine::Comment,
        Some((code, _)) => code,
        None => line,
    };

    ParsedLine::Instruction {
        code: code.to_string(),
        instruction: parse_instruction(code),
    }
}

/// Tokenizes instruction text into label, opcode and operands.
///
/// Only field counts of 2, 3, 5 and 7 map onto an opcode and zero to three
/// operands; any other count leaves every field unset.
#[must_use]
pub fn parse_instruction(code: &str) -> ParsedInstruction {
    let (label, body) = match code.split_once(LABEL_TERMINATOR) {
        Some((label, rest)) => (
            Some(label.to_string()),
            rest.split(LABEL_TERMINATOR).next().unwrap_or_default(),
        ),
        None => (None, code),
    };

    let fields = split_fields(body);
    let mut instruction = ParsedInstruction {
        label,
        field_count: fields.len(),
        ..ParsedInstruction::default()
    };

    let operand_fields: &[usize] = match fields.len() {
        2 => &[],
        3 => &[2],
        5 => &[2, 4],
        7 => &[2, 4, 6],
        _ => return instruction,
    };

    instruction.opcode = Some(fields[OPCODE_FIELD].to_string());
    for (slot, &field) in operand_fields.iter().enumerate() {
        instruction.operands[slot] = Some(fields[field].to_string());
    }
    instruction
}

/// Splits text on every `,` and every maximal whitespace run.
///
/// A delimiter at the very start yields a leading empty field; trailing
/// empty fields are dropped.
#[must_use]
pub fn split_fields(text: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let end = if ch == ',' {
            idx + 1
        } else if is_field_space(ch) {
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !is_field_space(next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            end
        } else {
            continue;
        };
        fields.push(&text[start..idx]);
        start = end;
    }
    fields.push(&text[start..]);

    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

/// Whitespace as recognized between fields: space, tab, newline, vertical
/// tab, form feed and carriage return.
const fn is_field_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

fn is_whitespace_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_field_space)
}
