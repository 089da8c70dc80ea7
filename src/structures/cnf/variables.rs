/*!
Names of atoms.

Each atom of a formula has a name, and names are used to relate the atoms of two formulas.
For example, when a [graph](crate::graph::Graph) is updated [incrementally](crate::builder::incremental) the clauses of the old and new formula are compared by the names of their atoms, as the same name may be given different atoms in each formula.

Atoms without an explicit name are named by the decimal representation of the atom.
*/

use std::collections::HashMap;

use crate::structures::atom::Atom;

/// A bijection between atoms and names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableMap {
    /// The name of each atom, indexed by atom - 1.
    names: Vec<String>,

    /// The atom of each name.
    atoms: HashMap<String, Atom>,
}

impl VariableMap {
    /// A map from the atoms `1..=count` to their decimal names.
    pub fn with_count(count: usize) -> Self {
        let mut map = VariableMap::default();
        map.grow_to(count);
        map
    }

    /// A map from names, with the first name given the atom `1`, etc.
    ///
    /// Repeated names are given a single atom.
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut map = VariableMap::default();
        for name in names {
            map.add(name);
        }
        map
    }

    /// The atom of `name`, after adding `name` with a fresh atom if required.
    pub fn add(&mut self, name: impl Into<String>) -> Atom {
        let name = name.into();
        if let Some(atom) = self.atoms.get(&name) {
            return *atom;
        }
        self.names.push(name.clone());
        let atom = self.names.len() as Atom;
        self.atoms.insert(name, atom);
        atom
    }

    /// Ensures the atoms `1..=count` are named, naming any fresh atom by its decimal representation.
    pub fn grow_to(&mut self, count: usize) {
        while self.names.len() < count {
            let atom = self.names.len() + 1;
            let mut name = atom.to_string();
            // A decimal name may already have been given to some other atom.
            while self.atoms.contains_key(&name) {
                name.push('\'');
            }
            self.add(name);
        }
    }

    /// The atom of `name`, if one exists.
    pub fn atom(&self, name: &str) -> Option<Atom> {
        self.atoms.get(name).copied()
    }

    /// The name of `atom`, if `atom` is in the map.
    pub fn name(&self, atom: Atom) -> Option<&str> {
        match atom {
            0 => None,
            _ => self.names.get(atom as usize - 1).map(|name| name.as_str()),
        }
    }

    /// A count of atoms in the map.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pairs of atoms and names, in order of the atoms.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (index as Atom + 1, name.as_str()))
    }

    /// For each atom of `self`, the atom of `other` with the same name, if one exists.
    ///
    /// The translation is indexed by atom - 1.
    pub fn translation_to(&self, other: &VariableMap) -> Vec<Option<Atom>> {
        self.names.iter().map(|name| other.atom(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_collision() {
        let mut map = VariableMap::from_names(["3", "x"]);
        map.grow_to(4);
        assert_eq!(map.atom("3"), Some(1));
        assert_eq!(map.name(3), Some("3'"));
        assert_eq!(map.name(4), Some("4"));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn translation() {
        let old = VariableMap::from_names(["a", "b", "c"]);
        let new = VariableMap::from_names(["c", "a"]);
        assert_eq!(old.translation_to(&new), vec![Some(2), None, Some(1)]);
    }
}
