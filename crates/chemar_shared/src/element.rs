//! Element kinds and the marker-label lookup table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Chemical element an atom entity represents.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// H
    Hydrogen = 1,
    /// He
    Helium = 2,
    /// Li
    Lithium = 3,
    /// C
    Carbon = 6,
    /// O
    Oxygen = 8,
}

impl ElementKind {
    /// Atomic number.
    #[must_use]
    pub const fn atomic_number(self) -> u8 {
        self as u8
    }

    /// Chemical symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Hydrogen => "H",
            Self::Helium => "He",
            Self::Lithium => "Li",
            Self::Carbon => "C",
            Self::Oxygen => "O",
        }
    }

    /// English name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hydrogen => "Hydrogen",
            Self::Helium => "Helium",
            Self::Lithium => "Lithium",
            Self::Carbon => "Carbon",
            Self::Oxygen => "Oxygen",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps marker kind labels to elements.
///
/// Several labels may resolve to the same element: the printed deck ships two
/// interchangeable oxygen cards, `Oxygen1` and `Oxygen2`.
/// Matching is exact and case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementTable {
    labels: BTreeMap<String, ElementKind>,
}

impl ElementTable {
    /// Creates an empty table. Every label is unresolved.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            labels: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a label mapping.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, kind: ElementKind) -> Self {
        self.insert(label, kind);
        self
    }

    /// Adds (or replaces) a label mapping, returning the previous kind.
    pub fn insert(&mut self, label: impl Into<String>, kind: ElementKind) -> Option<ElementKind> {
        self.labels.insert(label.into(), kind)
    }

    /// Resolves a marker label.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<ElementKind> {
        self.labels.get(label).copied()
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no labels are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates `(label, kind)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ElementKind)> {
        self.labels.iter().map(|(label, kind)| (label.as_str(), *kind))
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::empty()
            .with("Hydrogen", ElementKind::Hydrogen)
            .with("Helium", ElementKind::Helium)
            .with("Lithium", ElementKind::Lithium)
            .with("Carbon", ElementKind::Carbon)
            .with("Oxygen1", ElementKind::Oxygen)
            .with("Oxygen2", ElementKind::Oxygen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = ElementTable::default();
        assert_eq!(table.len(), 6);
        assert_eq!(table.resolve("Carbon"), Some(ElementKind::Carbon));
        assert_eq!(table.resolve("Oxygen1"), Some(ElementKind::Oxygen));
        assert_eq!(table.resolve("Oxygen2"), Some(ElementKind::Oxygen));
        assert_eq!(table.resolve("Hydrogen"), Some(ElementKind::Hydrogen));
    }

    #[test]
    fn test_unknown_labels() {
        let table = ElementTable::default();
        assert_eq!(table.resolve("Oxygen"), None);
        assert_eq!(table.resolve("carbon"), None);
        assert_eq!(table.resolve("Nitrogen"), None);
        assert_eq!(ElementTable::empty().resolve("Carbon"), None);
    }

    #[test]
    fn test_table_from_toml() {
        let table: ElementTable = toml::from_str(
            r#"
            "Card-C" = "Carbon"
            "Card-O" = "Oxygen"
            "#,
        )
        .unwrap();
        assert_eq!(table.resolve("Card-C"), Some(ElementKind::Carbon));
        assert_eq!(table.resolve("Card-O"), Some(ElementKind::Oxygen));
        assert_eq!(table.resolve("Carbon"), None);
    }

    #[test]
    fn test_element_metadata() {
        assert_eq!(ElementKind::Oxygen.atomic_number(), 8);
        assert_eq!(ElementKind::Helium.symbol(), "He");
        assert_eq!(ElementKind::Lithium.to_string(), "Lithium");
    }
}
