//! Completion rules of the ALCQ tableau
//!
//! Rules are scanned in a fixed priority order: deterministic extensions
//! (conjunction, lazy unfolding, universal propagation) before generative
//! rules (existential, at-least) before branching rules (disjunction,
//! at-most merging, and the tautology-choice rule of the `with_t`
//! variants). Any fair strategy is correct; this order keeps the
//! branching factor down.
//!
//! A rule only fires when its pattern is present and not already
//! satisfied, so rule application is idempotent and saturation is a
//! fixpoint. Generative rules and unfolding additionally respect subset
//! blocking.

use super::blocking::is_blocked;
use crate::abox::{Abox, Individual};
use crate::concept::{Concept, Role};
use crate::symbol::Name;
use crate::tbox::TBox;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, trace};
use smallvec::SmallVec;

/// Result of one scan over the completion rules
#[derive(Debug)]
pub enum RuleOutcome {
    /// A deterministic rule extended the current state in place
    Applied,
    /// A branching rule replaced the current state with alternatives,
    /// ordered first-try-first
    Branched(Vec<Abox>),
    /// No rule is applicable: the state is saturated
    Saturated,
}

/// A deterministic or branching step selected by the priority scan
enum Action {
    /// Add concept assertions (conjunction, unfolding, universal)
    Extend {
        rule: &'static str,
        additions: Vec<(Concept, Individual)>,
    },
    /// Create fresh role successors (existential, at-least)
    Generate {
        rule: &'static str,
        parent: Individual,
        role: Role,
        filler: Concept,
        count: u32,
        distinct_from: Vec<Individual>,
        generator: Concept,
    },
    /// Branch on a disjunction
    Split {
        individual: Individual,
        lhs: Concept,
        rhs: Concept,
    },
    /// Branch on merge choices for an at-most violation
    Merge {
        pairs: Vec<(Individual, Individual)>,
    },
    /// Branch on A(o) / (not A)(o) for an undecided signature atom
    Decide { individual: Individual, atom: Name },
}

/// Scan for the highest-priority applicable rule and apply it.
///
/// `choice_atoms` enables the tautology-choice rule over the given
/// signature (the `with_t` reasoning variants).
pub fn apply_next(
    abox: &mut Abox,
    tbox: &TBox,
    choice_atoms: Option<&IndexSet<Name>>,
) -> RuleOutcome {
    let Some(action) = find_action(abox, tbox, choice_atoms) else {
        return RuleOutcome::Saturated;
    };

    match action {
        Action::Extend { rule, additions } => {
            for (concept, individual) in additions {
                trace!("{}: adding {}[{}]", rule, concept, individual);
                abox.add_concept(concept, individual);
            }
            RuleOutcome::Applied
        }
        Action::Generate {
            rule,
            parent,
            role,
            filler,
            count,
            distinct_from,
            generator,
        } => {
            debug!(
                "{}: creating {} {}-successor(s) of {}",
                rule, count, role, parent
            );
            let mut fresh: SmallVec<[Individual; 4]> = SmallVec::new();
            for _ in 0..count {
                let successor = abox.fresh_anonymous(parent.clone(), generator.clone());
                abox.add_role(role.clone(), parent.clone(), successor.clone());
                if filler != Concept::Top {
                    abox.add_concept(filler.clone(), successor.clone());
                }
                for earlier in fresh.iter().chain(distinct_from.iter()) {
                    abox.add_distinct(successor.clone(), earlier.clone());
                }
                fresh.push(successor);
            }
            RuleOutcome::Applied
        }
        Action::Split {
            individual,
            lhs,
            rhs,
        } => {
            debug!("disjunction: branching on (or {} {})[{}]", lhs, rhs, individual);
            let mut left = abox.clone();
            left.add_concept(lhs, individual.clone());
            let mut right = abox.clone();
            right.add_concept(rhs, individual);
            RuleOutcome::Branched(vec![left, right])
        }
        Action::Merge { pairs } => {
            debug!("at-most: branching on {} merge candidate(s)", pairs.len());
            let branches = pairs
                .into_iter()
                .map(|(source, target)| {
                    let mut merged = abox.clone();
                    trace!("at-most: merging {} into {}", source, target);
                    merged.merge(&source, &target);
                    merged
                })
                .collect();
            RuleOutcome::Branched(branches)
        }
        Action::Decide { individual, atom } => {
            trace!("choice: deciding {} for {}", atom, individual);
            let positive = Concept::Named(atom);
            let negative = positive.negation_nnf();
            let mut yes = abox.clone();
            yes.add_concept(positive, individual.clone());
            let mut no = abox.clone();
            no.add_concept(negative, individual);
            RuleOutcome::Branched(vec![yes, no])
        }
    }
}

fn find_action(
    abox: &Abox,
    tbox: &TBox,
    choice_atoms: Option<&IndexSet<Name>>,
) -> Option<Action> {
    find_conjunction(abox)
        .or_else(|| find_unfold(abox, tbox))
        .or_else(|| find_universal(abox))
        .or_else(|| find_existential(abox))
        .or_else(|| find_at_least(abox))
        .or_else(|| find_disjunction(abox))
        .or_else(|| find_at_most(abox))
        .or_else(|| choice_atoms.and_then(|atoms| find_choice(abox, atoms)))
}

fn find_conjunction(abox: &Abox) -> Option<Action> {
    for individual in abox.individuals() {
        for concept in abox.labels(individual)? {
            if let Concept::Intersection(lhs, rhs) = concept {
                if !abox.has_concept(individual, lhs) || !abox.has_concept(individual, rhs) {
                    return Some(Action::Extend {
                        rule: "conjunction",
                        additions: vec![
                            ((**lhs).clone(), individual.clone()),
                            ((**rhs).clone(), individual.clone()),
                        ],
                    });
                }
            }
        }
    }
    None
}

fn find_unfold(abox: &Abox, tbox: &TBox) -> Option<Action> {
    if tbox.is_empty() {
        return None;
    }
    for individual in abox.individuals() {
        if is_blocked(abox, individual) {
            continue;
        }
        for concept in abox.labels(individual)? {
            let unfolded = match concept {
                Concept::Named(name) => tbox.unfold(name),
                Concept::Complement(inner) => match &**inner {
                    Concept::Named(name) => tbox.unfold_negation(name),
                    _ => None,
                },
                _ => None,
            };
            if let Some(definition) = unfolded {
                if !abox.has_concept(individual, definition) {
                    return Some(Action::Extend {
                        rule: "unfold",
                        additions: vec![(definition.clone(), individual.clone())],
                    });
                }
            }
        }
    }
    None
}

fn find_universal(abox: &Abox) -> Option<Action> {
    for individual in abox.individuals() {
        for concept in abox.labels(individual)? {
            if let Concept::AllValues(role, filler) = concept {
                let missing: Vec<(Concept, Individual)> = abox
                    .successors_iter(individual, role)
                    .filter(|successor| !abox.has_concept(successor, filler))
                    .map(|successor| ((**filler).clone(), successor.clone()))
                    .collect();
                if !missing.is_empty() {
                    return Some(Action::Extend {
                        rule: "universal",
                        additions: missing,
                    });
                }
            }
        }
    }
    None
}

fn find_existential(abox: &Abox) -> Option<Action> {
    for individual in abox.individuals() {
        if is_blocked(abox, individual) {
            continue;
        }
        for concept in abox.labels(individual)? {
            if let Concept::SomeValues(role, filler) = concept {
                let satisfied = abox.successors_iter(individual, role).any(|successor| {
                    **filler == Concept::Top || abox.has_concept(successor, filler)
                });
                if !satisfied {
                    return Some(Action::Generate {
                        rule: "existential",
                        parent: individual.clone(),
                        role: role.clone(),
                        filler: (**filler).clone(),
                        count: 1,
                        distinct_from: Vec::new(),
                        generator: concept.clone(),
                    });
                }
            }
        }
    }
    None
}

fn find_at_least(abox: &Abox) -> Option<Action> {
    for individual in abox.individuals() {
        if is_blocked(abox, individual) {
            continue;
        }
        for concept in abox.labels(individual)? {
            if let Concept::MinCardinality(n, role, filler) = concept {
                let qualified = abox.qualified_successors(individual, role, filler);
                let distinguished = max_pairwise_distinct(abox, &qualified);
                if (distinguished.len() as u32) < *n {
                    return Some(Action::Generate {
                        rule: "at-least",
                        parent: individual.clone(),
                        role: role.clone(),
                        filler: (**filler).clone(),
                        count: n - distinguished.len() as u32,
                        distinct_from: distinguished,
                        generator: concept.clone(),
                    });
                }
            }
        }
    }
    None
}

fn find_disjunction(abox: &Abox) -> Option<Action> {
    for individual in abox.individuals() {
        for concept in abox.labels(individual)? {
            if let Concept::Union(lhs, rhs) = concept {
                if !abox.has_concept(individual, lhs) && !abox.has_concept(individual, rhs) {
                    return Some(Action::Split {
                        individual: individual.clone(),
                        lhs: (**lhs).clone(),
                        rhs: (**rhs).clone(),
                    });
                }
            }
        }
    }
    None
}

fn find_at_most(abox: &Abox) -> Option<Action> {
    for individual in abox.individuals() {
        for concept in abox.labels(individual)? {
            if let Concept::MaxCardinality(n, role, filler) = concept {
                let qualified = abox.qualified_successors(individual, role, filler);
                if qualified.len() as u32 <= *n {
                    continue;
                }
                let pairs: Vec<(Individual, Individual)> = qualified
                    .iter()
                    .tuple_combinations()
                    .filter(|(first, second)| !abox.are_distinct(first, second))
                    .map(|(first, second)| orient_merge(first, second))
                    .collect();
                if !pairs.is_empty() {
                    return Some(Action::Merge { pairs });
                }
            }
        }
    }
    None
}

fn find_choice(abox: &Abox, atoms: &IndexSet<Name>) -> Option<Action> {
    for individual in abox.individuals() {
        for atom in atoms {
            let positive = Concept::Named(atom.clone());
            let negative = positive.negation_nnf();
            if !abox.has_concept(individual, &positive) && !abox.has_concept(individual, &negative)
            {
                return Some(Action::Decide {
                    individual: individual.clone(),
                    atom: atom.clone(),
                });
            }
        }
    }
    None
}

/// Merge orientation: named individuals take precedence, so an anonymous
/// individual is always the one merged away
fn orient_merge(first: &Individual, second: &Individual) -> (Individual, Individual) {
    if first.is_anonymous() || !second.is_anonymous() {
        (first.clone(), second.clone())
    } else {
        (second.clone(), first.clone())
    }
}

/// A maximum-size subset of `candidates` that is pairwise asserted
/// distinct. Exact subset enumeration, largest size first; candidate sets
/// are small in practice.
fn max_pairwise_distinct(abox: &Abox, candidates: &[Individual]) -> Vec<Individual> {
    for size in (2..=candidates.len()).rev() {
        for subset in candidates.iter().combinations(size) {
            let all_distinct = subset
                .iter()
                .tuple_combinations()
                .all(|(first, second)| abox.are_distinct(first, second));
            if all_distinct {
                return subset.into_iter().cloned().collect();
            }
        }
    }
    candidates.first().cloned().into_iter().collect()
}

/// Whether `candidates` contains `size` members that are pairwise asserted
/// distinct
fn has_pairwise_distinct(abox: &Abox, candidates: &[Individual], size: usize) -> bool {
    if size <= 1 {
        return candidates.len() >= size;
    }
    candidates.iter().combinations(size).any(|subset| {
        subset
            .iter()
            .tuple_combinations()
            .all(|(first, second)| abox.are_distinct(first, second))
    })
}

/// Detect a clash in the current state; returns a description for tracing
pub fn detect_clash(abox: &Abox) -> Option<String> {
    if let Some(individual) = abox.self_distinct() {
        return Some(format!("{} != {}", individual, individual));
    }

    for individual in abox.individuals() {
        let labels = abox.labels(individual)?;
        for concept in labels {
            match concept {
                Concept::Bottom => {
                    return Some(format!("Bot[{}]", individual));
                }
                Concept::Complement(inner) => {
                    if labels.contains(&**inner) {
                        return Some(format!("{}[{}] and (not {})[{}]", inner, individual, inner, individual));
                    }
                }
                Concept::MaxCardinality(n, role, filler) => {
                    let qualified = abox.qualified_successors(individual, role, filler);
                    if qualified.len() as u32 > *n
                        && has_pairwise_distinct(abox, &qualified, *n as usize + 1)
                    {
                        return Some(format!(
                            "{} has more than {} distinct {}-successors",
                            individual, n, role
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    None
}
