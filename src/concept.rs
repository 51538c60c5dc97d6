//! Concept expressions of the description logic ALCQ
//!
//! Defines the sealed variant tree for concept expressions together with
//! negation normal form (NNF) rewriting. Every concept that enters the
//! ABox is normalized first; rule application and clash detection rely on
//! structural equality over normalized concepts.

use crate::symbol::Name;
use indexmap::IndexSet;
use std::fmt;

/// An uninterpreted role (binary relation); equality is by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Role(Name);

impl Role {
    pub fn new<N: Into<Name>>(name: N) -> Self {
        Role(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concept expression in ALCQ
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Concept {
    /// The top concept, satisfied by every individual
    Top,
    /// The bottom concept; asserting it of any individual is a clash
    Bottom,
    /// Named atomic concept
    Named(Name),
    /// Complement (not C)
    Complement(Box<Concept>),
    /// Binary conjunction (C and D); n-ary forms decompose into this
    Intersection(Box<Concept>, Box<Concept>),
    /// Binary disjunction (C or D)
    Union(Box<Concept>, Box<Concept>),
    /// Implication (C implies D); sugar for (not C or D), removed by NNF
    Implication(Box<Concept>, Box<Concept>),
    /// Existential restriction (exists r C)
    SomeValues(Role, Box<Concept>),
    /// Universal restriction (all r C)
    AllValues(Role, Box<Concept>),
    /// Qualified at-least restriction (>= n r C)
    MinCardinality(u32, Role, Box<Concept>),
    /// Qualified at-most restriction (<= n r C)
    MaxCardinality(u32, Role, Box<Concept>),
}

impl Concept {
    pub fn named<N: Into<Name>>(name: N) -> Self {
        Concept::Named(name.into())
    }

    pub fn complement(inner: Concept) -> Self {
        Concept::Complement(Box::new(inner))
    }

    pub fn intersection(lhs: Concept, rhs: Concept) -> Self {
        Concept::Intersection(Box::new(lhs), Box::new(rhs))
    }

    pub fn union(lhs: Concept, rhs: Concept) -> Self {
        Concept::Union(Box::new(lhs), Box::new(rhs))
    }

    pub fn implication(lhs: Concept, rhs: Concept) -> Self {
        Concept::Implication(Box::new(lhs), Box::new(rhs))
    }

    pub fn some_values(role: Role, filler: Concept) -> Self {
        Concept::SomeValues(role, Box::new(filler))
    }

    pub fn all_values(role: Role, filler: Concept) -> Self {
        Concept::AllValues(role, Box::new(filler))
    }

    pub fn min_cardinality(n: u32, role: Role, filler: Concept) -> Self {
        Concept::MinCardinality(n, role, Box::new(filler))
    }

    pub fn max_cardinality(n: u32, role: Role, filler: Concept) -> Self {
        Concept::MaxCardinality(n, role, Box::new(filler))
    }

    /// Fold an n-ary conjunction into right-nested binary nodes
    pub fn intersection_of<I: IntoIterator<Item = Concept>>(operands: I) -> Self {
        Self::fold_binary(operands, Concept::intersection, Concept::Top)
    }

    /// Fold an n-ary disjunction into right-nested binary nodes
    pub fn union_of<I: IntoIterator<Item = Concept>>(operands: I) -> Self {
        Self::fold_binary(operands, Concept::union, Concept::Bottom)
    }

    fn fold_binary<I, F>(operands: I, combine: F, empty: Concept) -> Concept
    where
        I: IntoIterator<Item = Concept>,
        F: Fn(Concept, Concept) -> Concept,
    {
        let mut operands: Vec<Concept> = operands.into_iter().collect();
        let Some(mut acc) = operands.pop() else {
            return empty;
        };
        while let Some(next) = operands.pop() {
            acc = combine(next, acc);
        }
        acc
    }

    /// Rewrite into negation normal form
    ///
    /// In NNF, complements apply only to named atomic concepts and
    /// implication has been eliminated. `nnf` is idempotent.
    pub fn nnf(&self) -> Concept {
        match self {
            Concept::Top | Concept::Bottom | Concept::Named(_) => self.clone(),
            Concept::Complement(inner) => inner.negation_nnf(),
            Concept::Intersection(lhs, rhs) => Concept::intersection(lhs.nnf(), rhs.nnf()),
            Concept::Union(lhs, rhs) => Concept::union(lhs.nnf(), rhs.nnf()),
            Concept::Implication(lhs, rhs) => Concept::union(lhs.negation_nnf(), rhs.nnf()),
            Concept::SomeValues(role, filler) => Concept::some_values(role.clone(), filler.nnf()),
            Concept::AllValues(role, filler) => Concept::all_values(role.clone(), filler.nnf()),
            Concept::MinCardinality(n, role, filler) => {
                Concept::min_cardinality(*n, role.clone(), filler.nnf())
            }
            Concept::MaxCardinality(n, role, filler) => {
                Concept::max_cardinality(*n, role.clone(), filler.nnf())
            }
        }
    }

    /// The NNF of the complement of this concept
    pub fn negation_nnf(&self) -> Concept {
        match self {
            Concept::Top => Concept::Bottom,
            Concept::Bottom => Concept::Top,
            Concept::Named(_) => Concept::complement(self.clone()),
            Concept::Complement(inner) => inner.nnf(),
            Concept::Intersection(lhs, rhs) => {
                Concept::union(lhs.negation_nnf(), rhs.negation_nnf())
            }
            Concept::Union(lhs, rhs) => {
                Concept::intersection(lhs.negation_nnf(), rhs.negation_nnf())
            }
            // not (C implies D) == C and (not D)
            Concept::Implication(lhs, rhs) => {
                Concept::intersection(lhs.nnf(), rhs.negation_nnf())
            }
            Concept::SomeValues(role, filler) => {
                Concept::all_values(role.clone(), filler.negation_nnf())
            }
            Concept::AllValues(role, filler) => {
                Concept::some_values(role.clone(), filler.negation_nnf())
            }
            // not (>= 0 r C) is unsatisfiable
            Concept::MinCardinality(0, _, _) => Concept::Bottom,
            Concept::MinCardinality(n, role, filler) => {
                Concept::max_cardinality(n - 1, role.clone(), filler.nnf())
            }
            Concept::MaxCardinality(n, role, filler) => {
                Concept::min_cardinality(n + 1, role.clone(), filler.nnf())
            }
        }
    }

    /// Whether complements apply only to named concepts and no implication remains
    pub fn is_nnf(&self) -> bool {
        match self {
            Concept::Top | Concept::Bottom | Concept::Named(_) => true,
            Concept::Complement(inner) => matches!(**inner, Concept::Named(_)),
            Concept::Implication(_, _) => false,
            Concept::Intersection(lhs, rhs) | Concept::Union(lhs, rhs) => {
                lhs.is_nnf() && rhs.is_nnf()
            }
            Concept::SomeValues(_, filler) | Concept::AllValues(_, filler) => filler.is_nnf(),
            Concept::MinCardinality(_, _, filler) | Concept::MaxCardinality(_, _, filler) => {
                filler.is_nnf()
            }
        }
    }

    /// Collect the atomic concept names occurring in this expression
    pub fn atomic_names(&self, out: &mut IndexSet<Name>) {
        match self {
            Concept::Top | Concept::Bottom => {}
            Concept::Named(name) => {
                out.insert(name.clone());
            }
            Concept::Complement(inner) => inner.atomic_names(out),
            Concept::Intersection(lhs, rhs)
            | Concept::Union(lhs, rhs)
            | Concept::Implication(lhs, rhs) => {
                lhs.atomic_names(out);
                rhs.atomic_names(out);
            }
            Concept::SomeValues(_, filler)
            | Concept::AllValues(_, filler)
            | Concept::MinCardinality(_, _, filler)
            | Concept::MaxCardinality(_, _, filler) => filler.atomic_names(out),
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concept::Top => write!(f, "T"),
            Concept::Bottom => write!(f, "Bot"),
            Concept::Named(name) => write!(f, "{}", name),
            Concept::Complement(inner) => write!(f, "(not {})", inner),
            Concept::Intersection(lhs, rhs) => write!(f, "(and {} {})", lhs, rhs),
            Concept::Union(lhs, rhs) => write!(f, "(or {} {})", lhs, rhs),
            Concept::Implication(lhs, rhs) => write!(f, "(implies {} {})", lhs, rhs),
            Concept::SomeValues(role, filler) => write!(f, "(exists {} {})", role, filler),
            Concept::AllValues(role, filler) => write!(f, "(all {} {})", role, filler),
            Concept::MinCardinality(n, role, filler) => {
                write!(f, "(>= {} (rule {} {}))", n, role, filler)
            }
            Concept::MaxCardinality(n, role, filler) => {
                write!(f, "(<= {} (rule {} {}))", n, role, filler)
            }
        }
    }
}
