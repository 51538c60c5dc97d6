//! Assertional knowledge: individuals, assertions, and the ABox store
//!
//! The `Abox` is the state the tableau engine rewrites: per-individual
//! concept labels, a role-successor index, a symmetric inequality set, and
//! generator provenance for anonymous individuals. Branches snapshot the
//! whole store by cloning it; within a branch all additions are monotonic.

use crate::concept::{Concept, Role};
use crate::symbol::Name;
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// An individual: user-named, or generated by the exists / at-least rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Individual {
    Named(Name),
    Anonymous(u32),
}

impl Individual {
    pub fn named<N: Into<Name>>(name: N) -> Self {
        Individual::Named(name.into())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Individual::Anonymous(_))
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Individual::Named(name) => write!(f, "{}", name),
            Individual::Anonymous(id) => write!(f, "_:{}", id),
        }
    }
}

/// Provenance of an anonymous individual: which individual's which concept
/// caused its creation. Drives the blocking ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    pub parent: Individual,
    pub concept: Concept,
}

/// A single ABox assertion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Assertion {
    /// C(a)
    Concept(Concept, Individual),
    /// r(a, b)
    Role(Role, Individual, Individual),
    /// a != b
    Distinct(Individual, Individual),
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assertion::Concept(concept, individual) => write!(f, "{}[{}]", concept, individual),
            Assertion::Role(role, from, to) => write!(f, "{}[{}, {}]", role, from, to),
            Assertion::Distinct(lhs, rhs) => write!(f, "{} != {}", lhs, rhs),
        }
    }
}

/// The assertional store rewritten by the tableau engine
#[derive(Debug, Clone, Default)]
pub struct Abox {
    /// Concept labels per individual; registers every known individual
    labels: IndexMap<Individual, IndexSet<Concept>>,
    /// Role-successor index: individual -> role -> successors
    successors: IndexMap<Individual, IndexMap<Role, IndexSet<Individual>>>,
    /// Symmetric inequality; a self-mate entry means the x != x clash
    distinct: IndexMap<Individual, IndexSet<Individual>>,
    /// Generator provenance, anonymous individuals only
    generators: IndexMap<Individual, Generator>,
    next_anonymous: u32,
}

impl Abox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an individual without asserting anything about it
    pub fn touch(&mut self, individual: &Individual) {
        if !self.labels.contains_key(individual) {
            self.labels.insert(individual.clone(), IndexSet::new());
        }
    }

    /// Assert C(a), normalizing C first
    pub fn assert_concept(&mut self, concept: Concept, individual: Individual) {
        self.add_concept(concept.nnf(), individual);
    }

    /// Add an already-normalized concept assertion; returns whether it is new
    pub fn add_concept(&mut self, concept: Concept, individual: Individual) -> bool {
        debug_assert!(concept.is_nnf());
        self.labels.entry(individual).or_default().insert(concept)
    }

    /// Assert r(from, to); returns whether the edge is new
    pub fn add_role(&mut self, role: Role, from: Individual, to: Individual) -> bool {
        self.touch(&from);
        self.touch(&to);
        self.successors
            .entry(from)
            .or_default()
            .entry(role)
            .or_default()
            .insert(to)
    }

    /// Assert lhs != rhs, symmetrically
    ///
    /// Asserting an individual distinct from itself is representable and is
    /// reported by `self_distinct`, which the clash check consults.
    pub fn add_distinct(&mut self, lhs: Individual, rhs: Individual) -> bool {
        self.touch(&lhs);
        self.touch(&rhs);
        let fresh = self
            .distinct
            .entry(lhs.clone())
            .or_default()
            .insert(rhs.clone());
        self.distinct.entry(rhs).or_default().insert(lhs);
        fresh
    }

    pub fn has_concept(&self, individual: &Individual, concept: &Concept) -> bool {
        self.labels
            .get(individual)
            .is_some_and(|set| set.contains(concept))
    }

    pub fn labels(&self, individual: &Individual) -> Option<&IndexSet<Concept>> {
        self.labels.get(individual)
    }

    pub fn are_distinct(&self, lhs: &Individual, rhs: &Individual) -> bool {
        self.distinct
            .get(lhs)
            .is_some_and(|mates| mates.contains(rhs))
    }

    /// Whether some individual is asserted distinct from itself
    pub fn self_distinct(&self) -> Option<&Individual> {
        self.distinct
            .iter()
            .find(|(individual, mates)| mates.contains(*individual))
            .map(|(individual, _)| individual)
    }

    /// Successors of `individual` under `role` whose labels contain `filler`
    /// (every successor qualifies when the filler is Top)
    pub fn qualified_successors(
        &self,
        individual: &Individual,
        role: &Role,
        filler: &Concept,
    ) -> Vec<Individual> {
        self.successors_iter(individual, role)
            .filter(|succ| *filler == Concept::Top || self.has_concept(succ, filler))
            .cloned()
            .collect()
    }

    pub fn successors_iter<'a>(
        &'a self,
        individual: &Individual,
        role: &Role,
    ) -> impl Iterator<Item = &'a Individual> + 'a {
        self.successors
            .get(individual)
            .and_then(|by_role| by_role.get(role))
            .into_iter()
            .flatten()
    }

    /// Every individual known to the store, in first-seen order
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.labels.keys()
    }

    pub fn named_individuals(&self) -> impl Iterator<Item = &Individual> {
        self.labels.keys().filter(|i| !i.is_anonymous())
    }

    /// Atomic concept names occurring in any concept assertion
    pub fn atomic_names(&self, out: &mut IndexSet<Name>) {
        for concepts in self.labels.values() {
            for concept in concepts {
                concept.atomic_names(out);
            }
        }
    }

    pub fn generator(&self, individual: &Individual) -> Option<&Generator> {
        self.generators.get(individual)
    }

    /// Create a fresh anonymous individual generated by `concept` at `parent`
    pub fn fresh_anonymous(&mut self, parent: Individual, concept: Concept) -> Individual {
        let individual = Individual::Anonymous(self.next_anonymous);
        self.next_anonymous += 1;
        self.touch(&individual);
        self.generators
            .insert(individual.clone(), Generator { parent, concept });
        individual
    }

    /// Merge `source` into `target`: every assertion mentioning `source` is
    /// rewritten onto `target` and `source` disappears from the store.
    ///
    /// The caller picks the orientation (named individuals take precedence
    /// over anonymous ones). If the two were asserted distinct, the rewrite
    /// leaves `target` distinct from itself and the next clash check ends
    /// the branch.
    pub fn merge(&mut self, source: &Individual, target: &Individual) {
        if source == target {
            return;
        }
        self.touch(target);

        // Concept labels
        if let Some(moved) = self.labels.shift_remove(source) {
            self.labels.entry(target.clone()).or_default().extend(moved);
        }

        // Outgoing edges
        if let Some(moved) = self.successors.shift_remove(source) {
            let merged = self.successors.entry(target.clone()).or_default();
            for (role, targets) in moved {
                merged.entry(role).or_default().extend(targets);
            }
        }

        // Incoming edges
        for by_role in self.successors.values_mut() {
            for targets in by_role.values_mut() {
                if targets.shift_remove(source) {
                    targets.insert(target.clone());
                }
            }
        }

        // Inequality mates transfer; source != target becomes target != target
        if let Some(mates) = self.distinct.shift_remove(source) {
            for mate in mates {
                let mate = if mate == *source { target.clone() } else { mate };
                if let Some(set) = self.distinct.get_mut(&mate) {
                    set.shift_remove(source);
                }
                self.add_distinct(mate, target.clone());
            }
        }

        // Generator provenance: the merged individual's own entry goes away,
        // children it generated are re-parented
        self.generators.shift_remove(source);
        for generator in self.generators.values_mut() {
            if generator.parent == *source {
                generator.parent = target.clone();
            }
        }
    }

    /// Flat view of all assertions, for display and containment checks
    pub fn assertions(&self) -> Vec<Assertion> {
        let mut out = Vec::new();
        for (individual, concepts) in &self.labels {
            for concept in concepts {
                out.push(Assertion::Concept(concept.clone(), individual.clone()));
            }
        }
        for (from, by_role) in &self.successors {
            for (role, targets) in by_role {
                for to in targets {
                    out.push(Assertion::Role(role.clone(), from.clone(), to.clone()));
                }
            }
        }
        for (lhs, mates) in &self.distinct {
            for rhs in mates {
                // one direction per symmetric pair
                if lhs <= rhs {
                    out.push(Assertion::Distinct(lhs.clone(), rhs.clone()));
                }
            }
        }
        out
    }

    pub fn contains(&self, assertion: &Assertion) -> bool {
        match assertion {
            Assertion::Concept(concept, individual) => self.has_concept(individual, concept),
            Assertion::Role(role, from, to) => {
                self.successors_iter(from, role).any(|succ| succ == to)
            }
            Assertion::Distinct(lhs, rhs) => self.are_distinct(lhs, rhs),
        }
    }

    /// Whether every assertion of `other` is present here
    pub fn contains_all(&self, other: &Abox) -> bool {
        other.assertions().iter().all(|a| self.contains(a))
    }

    pub fn assertion_count(&self) -> usize {
        self.assertions().len()
    }

    pub fn individual_count(&self) -> usize {
        self.labels.len()
    }
}

impl fmt::Display for Abox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for assertion in self.assertions() {
            writeln!(f, "{}", assertion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Individual {
        Individual::named(name)
    }

    #[test]
    fn test_inequality_is_symmetric() {
        let mut abox = Abox::new();
        abox.add_distinct(named("a"), named("b"));
        assert!(abox.are_distinct(&named("a"), &named("b")));
        assert!(abox.are_distinct(&named("b"), &named("a")));
        assert!(abox.self_distinct().is_none());
    }

    #[test]
    fn test_successor_index() {
        let mut abox = Abox::new();
        let role = Role::new("hasChild");
        abox.add_role(role.clone(), named("mary"), named("tom"));
        abox.add_role(role.clone(), named("mary"), named("ann"));
        let succs: Vec<_> = abox.successors_iter(&named("mary"), &role).collect();
        assert_eq!(succs, vec![&named("tom"), &named("ann")]);
    }

    #[test]
    fn test_qualified_successors_with_top() {
        let mut abox = Abox::new();
        let role = Role::new("r");
        abox.add_role(role.clone(), named("a"), named("b"));
        abox.add_role(role.clone(), named("a"), named("c"));
        abox.assert_concept(Concept::named("C"), named("b"));

        let with_c = abox.qualified_successors(&named("a"), &role, &Concept::named("C"));
        assert_eq!(with_c, vec![named("b")]);

        let all = abox.qualified_successors(&named("a"), &role, &Concept::Top);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_merge_rewrites_all_assertions() {
        let mut abox = Abox::new();
        let role = Role::new("r");
        abox.assert_concept(Concept::named("C"), named("b"));
        abox.add_role(role.clone(), named("a"), named("b"));
        abox.add_role(role.clone(), named("b"), named("c"));
        abox.add_distinct(named("b"), named("d"));

        abox.merge(&named("b"), &named("a"));

        assert!(abox.has_concept(&named("a"), &Concept::named("C")));
        assert!(abox.successors_iter(&named("a"), &role).any(|s| s == &named("a")));
        assert!(abox.successors_iter(&named("a"), &role).any(|s| s == &named("c")));
        assert!(abox.are_distinct(&named("a"), &named("d")));
        assert!(!abox.individuals().any(|i| i == &named("b")));
    }

    #[test]
    fn test_merge_of_distinct_pair_leaves_self_inequality() {
        let mut abox = Abox::new();
        abox.add_distinct(named("a"), named("b"));
        abox.merge(&named("b"), &named("a"));
        assert_eq!(abox.self_distinct(), Some(&named("a")));
    }

    #[test]
    fn test_merge_reparents_generated_children() {
        let mut abox = Abox::new();
        let concept = Concept::some_values(Role::new("r"), Concept::named("C"));
        let anon = abox.fresh_anonymous(named("a"), concept.clone());
        abox.merge(&named("a"), &named("b"));
        assert_eq!(abox.generator(&anon).map(|g| &g.parent), Some(&named("b")));
        assert_eq!(abox.generator(&anon).map(|g| &g.concept), Some(&concept));
    }

    #[test]
    fn test_anonymous_individuals_are_unique() {
        let mut abox = Abox::new();
        let first = abox.fresh_anonymous(named("a"), Concept::named("C"));
        let second = abox.fresh_anonymous(named("a"), Concept::named("C"));
        assert_ne!(first, second);
    }
}
