//! Label and memory-location bookkeeping for a check run.
//!
//! Labels are collected up front by a pre-scan so that branches may target
//! labels declared further down the file. Memory locations and label
//! references accumulate while lines are checked. Declarations and
//! references are kept as ordered lists, duplicates included: each reference
//! consumes one matching declaration in the unused-label pass.

use std::collections::HashSet;

use crate::parser::LABEL_TERMINATOR;
use crate::source::SourceLine;

/// Collects the text before the first `:` of every line that has one.
///
/// No trimming and no deduplication: comment lines and lines past `END`
/// contribute too.
#[must_use]
pub fn collect_declared_labels(lines: &[SourceLine]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.text.split_once(LABEL_TERMINATOR))
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Symbol state for one check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    declared_labels: Vec<String>,
    memory_locations: HashSet<String>,
    referenced_labels: Vec<String>,
}

impl SymbolTable {
    /// Creates a table seeded with pre-scanned label declarations.
    #[must_use]
    pub fn with_declared_labels(declared_labels: Vec<String>) -> Self {
        Self {
            declared_labels,
            ..Self::default()
        }
    }

    /// Creates a table by pre-scanning `lines` for label declarations.
    #[must_use]
    pub fn from_lines(lines: &[SourceLine]) -> Self {
        Self::with_declared_labels(collect_declared_labels(lines))
    }

    /// Returns true if `name` was declared as a label anywhere in the file.
    #[must_use]
    pub fn is_declared_label(&self, name: &str) -> bool {
        self.declared_labels.iter().any(|label| label == name)
    }

    /// Returns true if `name` was introduced by a validated `DEF`.
    #[must_use]
    pub fn is_memory_location(&self, name: &str) -> bool {
        self.memory_locations.contains(name)
    }

    /// Records a memory location introduced by `DEF`.
    pub fn define_memory_location(&mut self, name: &str) {
        self.memory_locations.insert(name.to_string());
    }

    /// Records a branch reference to a label.
    pub fn reference_label(&mut self, name: &str) {
        self.referenced_labels.push(name.to_string());
    }

    /// Pre-scanned label declarations, in file order.
    #[must_use]
    pub fn declared_labels(&self) -> &[String] {
        &self.declared_labels
    }

    /// Label references, in the order they were validated.
    #[must_use]
    pub fn referenced_labels(&self) -> &[String] {
        &self.referenced_labels
    }

    /// Declared labels left over once every reference has consumed one
    /// matching declaration.
    #[must_use]
    pub fn unused_labels(&self) -> Vec<String> {
        let mut unused = self.declared_labels.clone();
        for referenced in &self.referenced_labels {
            if let Some(pos) = unused.iter().position(|label| label == referenced) {
                unused.remove(pos);
            }
        }
        unused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::split_lines;

    #[test]
    fn prescan_takes_text_before_first_colon() {
        let lines = split_lines("LBL: DEF M1, R0\n BR LBL\nA: B: INC R1\n");
        assert_eq!(collect_declared_labels(&lines), vec!["LBL", "A"]);
    }

    #[test]
    fn prescan_is_verbatim_and_keeps_duplicates() {
        let lines = split_lines("  LP: INC R1\nLP: DEC R1\nLP: DEC R2\n; why: ELO\n");
        assert_eq!(
            collect_declared_labels(&lines),
            vec!["  LP", "LP", "LP", "; why"]
        );
    }

    #[test]
    fn memory_locations_accumulate() {
        let mut symbols = SymbolTable::default();
        assert!(!symbols.is_memory_location("M1"));
        symbols.define_memory_location("M1");
        assert!(symbols.is_memory_location("M1"));
        assert!(!symbols.is_memory_location("M2"));
    }

    #[test]
    fn every_label_unused_without_references() {
        let symbols = SymbolTable::with_declared_labels(vec!["A".into(), "B".into()]);
        assert!(symbols.is_declared_label("A"));
        assert!(!symbols.is_declared_label("C"));
        assert_eq!(symbols.unused_labels(), vec!["A", "B"]);
    }

    #[test]
    fn each_reference_consumes_one_declaration() {
        let mut symbols =
            SymbolTable::with_declared_labels(vec!["A".into(), "B".into(), "A".into()]);
        symbols.reference_label("A");
        assert_eq!(symbols.unused_labels(), vec!["B", "A"]);

        symbols.reference_label("A");
        symbols.reference_label("A");
        assert_eq!(symbols.unused_labels(), vec!["B"]);
        assert_eq!(symbols.referenced_labels().len(), 3);
    }

    #[test]
    fn references_to_undeclared_labels_are_ignored() {
        let mut symbols = SymbolTable::with_declared_labels(vec!["A".into()]);
        symbols.reference_label("Z");
        assert_eq!(symbols.unused_labels(), vec!["A"]);
        assert_eq!(symbols.declared_labels(), ["A".to_string()]);
    }
}
