//! Terminological knowledge: named concept definitions
//!
//! A `TBox` maps atomic concept names to definition concepts. Definitions
//! may be cyclic; nothing is expanded statically. The tableau engine
//! unfolds lazily, one assertion at a time, and relies on blocking to stay
//! terminating on cyclic definition sets.

use crate::concept::Concept;
use crate::symbol::Name;
use indexmap::{IndexMap, IndexSet};
use std::fmt;

#[derive(Debug, Clone)]
struct Definition {
    raw: Concept,
    /// NNF of the definition, added when N(a) is unfolded
    positive: Concept,
    /// NNF of the negated definition, added when (not N)(a) is unfolded
    negative: Concept,
}

/// A mapping from atomic concept names to definition concepts
#[derive(Debug, Clone, Default)]
pub struct TBox {
    definitions: IndexMap<Name, Definition>,
}

impl TBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name == concept`, replacing any previous definition
    ///
    /// Both unfolding directions are normalized once here so the engine
    /// only ever sees NNF concepts.
    pub fn define<N: Into<Name>>(&mut self, name: N, concept: Concept) {
        let positive = concept.nnf();
        let negative = concept.negation_nnf();
        self.definitions.insert(
            name.into(),
            Definition {
                raw: concept,
                positive,
                negative,
            },
        );
    }

    pub fn is_defined(&self, name: &Name) -> bool {
        self.definitions.contains_key(name)
    }

    /// The NNF definition to add for an assertion N(a)
    pub fn unfold(&self, name: &Name) -> Option<&Concept> {
        self.definitions.get(name).map(|def| &def.positive)
    }

    /// The NNF concept to add for an assertion (not N)(a)
    pub fn unfold_negation(&self, name: &Name) -> Option<&Concept> {
        self.definitions.get(name).map(|def| &def.negative)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Atomic concept names mentioned anywhere in the TBox
    pub fn atomic_names(&self, out: &mut IndexSet<Name>) {
        for (name, def) in &self.definitions {
            out.insert(name.clone());
            def.raw.atomic_names(out);
        }
    }
}

impl fmt::Display for TBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, def) in &self.definitions {
            writeln!(f, "{} == {}", name, def.raw)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::Role;

    #[test]
    fn test_unfold_both_directions() {
        let mut tbox = TBox::new();
        tbox.define(
            "Woman",
            Concept::intersection(Concept::named("Person"), Concept::named("Female")),
        );

        let name = Name::new("Woman");
        assert!(tbox.is_defined(&name));
        assert_eq!(
            tbox.unfold(&name),
            Some(&Concept::intersection(
                Concept::named("Person"),
                Concept::named("Female")
            ))
        );
        assert_eq!(
            tbox.unfold_negation(&name),
            Some(&Concept::union(
                Concept::complement(Concept::named("Person")),
                Concept::complement(Concept::named("Female"))
            ))
        );
        assert_eq!(tbox.unfold(&Name::new("Man")), None);
    }

    #[test]
    fn test_cyclic_definition_is_stored_as_is() {
        let mut tbox = TBox::new();
        tbox.define(
            "Person",
            Concept::some_values(Role::new("hasParent"), Concept::named("Person")),
        );
        let name = Name::new("Person");
        assert_eq!(
            tbox.unfold(&name),
            Some(&Concept::some_values(
                Role::new("hasParent"),
                Concept::named("Person")
            ))
        );
    }

    #[test]
    fn test_signature_collection() {
        let mut tbox = TBox::new();
        tbox.define(
            "Mother",
            Concept::intersection(
                Concept::named("Woman"),
                Concept::some_values(Role::new("hasChild"), Concept::named("Person")),
            ),
        );
        let mut names = IndexSet::new();
        tbox.atomic_names(&mut names);
        assert!(names.contains(&Name::new("Mother")));
        assert!(names.contains(&Name::new("Woman")));
        assert!(names.contains(&Name::new("Person")));
    }
}
