//! Constant definitions
//!
//! Constants are declared once in a component document and referenced by
//! later constants and by build steps. Declaration order is significant.

use serde::{Deserialize, Serialize};

/// A named literal value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub value: String,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Insertion-ordered table of constants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantTable {
    entries: Vec<Constant>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of constants in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a constant's value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Position of a constant in declaration order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|c| c.name == name)
    }

    /// Add a constant at the end of the table.
    ///
    /// Redeclaring an existing name replaces its value but keeps its position.
    pub fn insert(&mut self, constant: Constant) {
        match self.position(&constant.name) {
            Some(index) => self.entries[index].value = constant.value,
            None => self.entries.push(constant),
        }
    }

    /// Remove a constant, returning it if it was declared
    pub fn remove(&mut self, name: &str) -> Option<Constant> {
        self.position(name).map(|index| self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.entries.iter()
    }

    /// Constant names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.name.as_str()).collect()
    }
}

impl FromIterator<Constant> for ConstantTable {
    fn from_iter<I: IntoIterator<Item = Constant>>(iter: I) -> Self {
        let mut table = ConstantTable::new();
        for constant in iter {
            table.insert(constant);
        }
        table
    }
}

impl<'a> IntoIterator for &'a ConstantTable {
    type Item = &'a Constant;
    type IntoIter = std::slice::Iter<'a, Constant>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
