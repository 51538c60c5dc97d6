//! ALCQ reasoning operations
//!
//! The public decision surface over the tableau engine: ABox consistency,
//! the model-enumerating `with_t` variants, and subsumption by reduction
//! to inconsistency.

pub mod tableaux;

pub use tableaux::{ReasoningConfig, SearchResult, TableauxEngine};

use crate::abox::{Abox, Individual};
use crate::concept::Concept;
use crate::error::DlResult;
use crate::symbol::Name;
use crate::tbox::TBox;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, info};

/// Reserved individual introduced by `premise_subsumes`
const PREMISE_INDIVIDUAL: &str = "_premise";

/// A subsumption premise: does every instance of `subsumee` necessarily
/// fall under `subsumer`?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Premise {
    subsumee: Concept,
    subsumer: Concept,
}

impl Premise {
    pub fn new(subsumee: Concept, subsumer: Concept) -> Self {
        Premise { subsumee, subsumer }
    }

    pub fn subsumee(&self) -> &Concept {
        &self.subsumee
    }

    pub fn subsumer(&self) -> &Concept {
        &self.subsumer
    }
}

/// Decide consistency of `abox` under `tbox`.
///
/// Returns `(true, Some(model))` with a clash-free saturated extension of
/// the input, or `(false, None)` when every branch clashes.
pub fn abox_consistent(abox: &Abox, tbox: &TBox) -> DlResult<(bool, Option<Abox>)> {
    abox_consistent_with_config(abox, tbox, &ReasoningConfig::default())
}

/// `abox_consistent` with explicit search budgets
pub fn abox_consistent_with_config(
    abox: &Abox,
    tbox: &TBox,
    config: &ReasoningConfig,
) -> DlResult<(bool, Option<Abox>)> {
    info!(
        "consistency check: {} assertions, {} definitions",
        abox.assertion_count(),
        tbox.len()
    );
    let engine = TableauxEngine::with_config(tbox, config.clone());
    let result = engine.run(abox.clone(), false)?;
    debug!("visited {} branches", result.branches_visited);
    let model = result.models.into_iter().next();
    Ok((model.is_some(), model))
}

/// Consistency with the tautology-choice rule: every atomic concept of the
/// problem signature is decided positively or negatively for every
/// individual, so the returned models are total on the signature.
///
/// Explores exhaustively and returns all models found.
pub fn abox_consistent_with_t(abox: &Abox, tbox: &TBox) -> DlResult<(bool, Vec<Abox>)> {
    let atoms = problem_signature(abox, tbox);
    info!(
        "consistency check with choice over {} signature atoms",
        atoms.len()
    );
    let engine = TableauxEngine::new(tbox).with_choice_atoms(atoms);
    let result = engine.run(abox.clone(), true)?;
    debug!(
        "visited {} branches, {} models",
        result.branches_visited,
        result.models.len()
    );
    let consistent = result.is_consistent();
    Ok((consistent, result.models))
}

/// `abox_consistent_with_t` under the unique-name assumption: all named
/// individuals are additionally asserted pairwise distinct.
pub fn abox_consistent_with_obj_and_t(abox: &Abox, tbox: &TBox) -> DlResult<(bool, Vec<Abox>)> {
    let mut extended = abox.clone();
    let named: Vec<Individual> = extended.named_individuals().cloned().collect();
    for (first, second) in named.iter().tuple_combinations() {
        extended.add_distinct(first.clone(), second.clone());
    }
    abox_consistent_with_t(&extended, tbox)
}

/// Decide a subsumption premise by refutation.
///
/// A fresh individual is asserted to be an instance of the subsumee and of
/// the negated subsumer; the premise holds iff that extension is
/// inconsistent. Returns the terminal branch states explored along the
/// way together with the verdict.
pub fn premise_subsumes(
    abox: &Abox,
    tbox: &TBox,
    premise: &Premise,
) -> DlResult<(Vec<Abox>, bool)> {
    info!(
        "subsumption check: {} against {}",
        premise.subsumee(),
        premise.subsumer()
    );
    let witness = Individual::named(PREMISE_INDIVIDUAL);
    let mut extended = abox.clone();
    extended.assert_concept(premise.subsumee().clone(), witness.clone());
    extended.assert_concept(
        Concept::complement(premise.subsumer().clone()),
        witness,
    );

    let engine = TableauxEngine::new(tbox);
    let result = engine.run(extended, false)?;
    let subsumed = result.models.is_empty();
    debug!(
        "visited {} branches, subsumption {}",
        result.branches_visited,
        if subsumed { "holds" } else { "fails" }
    );
    Ok((result.explored, subsumed))
}

/// Atomic concept names occurring anywhere in the problem
fn problem_signature(abox: &Abox, tbox: &TBox) -> IndexSet<Name> {
    let mut atoms = IndexSet::new();
    abox.atomic_names(&mut atoms);
    tbox.atomic_names(&mut atoms);
    atoms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::Role;

    #[test]
    fn test_trivial_consistency() {
        let mut abox = Abox::new();
        abox.assert_concept(Concept::named("Person"), Individual::named("tom"));
        let (consistent, model) = abox_consistent(&abox, &TBox::new()).unwrap();
        assert!(consistent);
        assert!(model.unwrap().contains_all(&abox));
    }

    #[test]
    fn test_trivial_inconsistency() {
        let mut abox = Abox::new();
        abox.assert_concept(Concept::named("A"), Individual::named("x"));
        abox.assert_concept(Concept::complement(Concept::named("A")), Individual::named("x"));
        let (consistent, model) = abox_consistent(&abox, &TBox::new()).unwrap();
        assert!(!consistent);
        assert!(model.is_none());
    }

    #[test]
    fn test_with_t_decides_every_atom() {
        let mut abox = Abox::new();
        abox.assert_concept(Concept::named("A"), Individual::named("x"));
        let mut tbox = TBox::new();
        tbox.define("B", Concept::named("A"));

        let (consistent, models) = abox_consistent_with_t(&abox, &tbox).unwrap();
        assert!(consistent);
        for model in &models {
            for atom in ["A", "B"] {
                let positive = Concept::named(atom);
                let negative = Concept::complement(Concept::named(atom));
                assert!(
                    model.has_concept(&Individual::named("x"), &positive)
                        || model.has_concept(&Individual::named("x"), &negative)
                );
            }
        }
    }

    #[test]
    fn test_with_obj_and_t_applies_unique_names() {
        let mut abox = Abox::new();
        let role = Role::new("r");
        abox.add_role(role.clone(), Individual::named("x"), Individual::named("a"));
        abox.add_role(role.clone(), Individual::named("x"), Individual::named("b"));
        abox.assert_concept(
            Concept::max_cardinality(1, role, Concept::Top),
            Individual::named("x"),
        );

        // without unique names the two successors merge
        let (consistent, _) = abox_consistent(&abox, &TBox::new()).unwrap();
        assert!(consistent);

        // under unique names they cannot
        let (consistent, _) = abox_consistent_with_obj_and_t(&abox, &TBox::new()).unwrap();
        assert!(!consistent);
    }

    #[test]
    fn test_premise_subsumes_reduction() {
        let tbox = TBox::new();
        let premise = Premise::new(
            Concept::intersection(Concept::named("A"), Concept::named("B")),
            Concept::named("A"),
        );
        let (explored, subsumed) = premise_subsumes(&Abox::new(), &tbox, &premise).unwrap();
        assert!(subsumed);
        assert!(!explored.is_empty());

        let premise = Premise::new(Concept::named("A"), Concept::named("B"));
        let (_, subsumed) = premise_subsumes(&Abox::new(), &tbox, &premise).unwrap();
        assert!(!subsumed);
    }
}
