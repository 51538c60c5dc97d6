//! Tableau search driver
//!
//! Drives the completion rules to saturation over an explicit stack of
//! alternative ABox states. Entering a branch clones the pre-branch
//! state; abandoning a branch is dropping its clone, which restores the
//! previous state atomically. Exhausting the stack without finding a
//! clash-free saturated state is a refutation.

use super::expansion::{apply_next, detect_clash, RuleOutcome};
use crate::abox::Abox;
use crate::error::{DlError, DlResult};
use crate::symbol::Name;
use crate::tbox::TBox;
use indexmap::IndexSet;
use log::{debug, trace};

/// Safety valves for the tableau search
///
/// These bound resource use, not semantics: blocking already guarantees
/// termination, and the defaults are far beyond what well-formed inputs
/// reach. Exceeding a budget is reported as an error, never as a verdict.
#[derive(Debug, Clone)]
pub struct ReasoningConfig {
    /// Maximum number of branch states taken off the stack
    pub max_branches: usize,
    /// Maximum number of individuals in any single branch state
    pub max_individuals: usize,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        ReasoningConfig {
            max_branches: 100_000,
            max_individuals: 10_000,
        }
    }
}

/// Outcome of a tableau search
#[derive(Debug, Default)]
pub struct SearchResult {
    /// Clash-free saturated states, each a model witness
    pub models: Vec<Abox>,
    /// Every terminal state explored, clashed or saturated
    pub explored: Vec<Abox>,
    /// Number of branch states visited
    pub branches_visited: usize,
}

impl SearchResult {
    pub fn is_consistent(&self) -> bool {
        !self.models.is_empty()
    }
}

/// How a branch state left the saturation loop
enum Terminal {
    /// Clash detected; the branch is abandoned
    Clashed(Abox),
    /// Replaced by alternatives already on the stack
    Suspended,
    /// Clash-free and closed under all rules: a model witness
    Saturated(Abox),
}

/// The tableau engine: saturation with backtracking over one TBox
pub struct TableauxEngine<'a> {
    tbox: &'a TBox,
    config: ReasoningConfig,
    /// Signature atoms for the tautology-choice rule; `None` disables it
    choice_atoms: Option<IndexSet<Name>>,
}

impl<'a> TableauxEngine<'a> {
    pub fn new(tbox: &'a TBox) -> Self {
        Self::with_config(tbox, ReasoningConfig::default())
    }

    pub fn with_config(tbox: &'a TBox, config: ReasoningConfig) -> Self {
        TableauxEngine {
            tbox,
            config,
            choice_atoms: None,
        }
    }

    /// Enable the tautology-choice rule over `atoms`
    pub fn with_choice_atoms(mut self, atoms: IndexSet<Name>) -> Self {
        self.choice_atoms = Some(atoms);
        self
    }

    /// Run the search. In first-model mode the search returns as soon as
    /// one clash-free saturated state is found; in exhaustive mode every
    /// alternative is explored and all models are collected.
    pub fn run(&self, initial: Abox, exhaustive: bool) -> DlResult<SearchResult> {
        let mut result = SearchResult::default();
        let mut stack: Vec<Abox> = vec![initial];

        while let Some(mut state) = stack.pop() {
            result.branches_visited += 1;
            if result.branches_visited > self.config.max_branches {
                return Err(DlError::SearchLimitExceeded(format!(
                    "more than {} branches",
                    self.config.max_branches
                )));
            }

            let terminal = loop {
                if let Some(clash) = detect_clash(&state) {
                    debug!("clash: {}", clash);
                    break Terminal::Clashed(state);
                }
                if state.individual_count() > self.config.max_individuals {
                    return Err(DlError::SearchLimitExceeded(format!(
                        "more than {} individuals in one branch",
                        self.config.max_individuals
                    )));
                }

                match apply_next(&mut state, self.tbox, self.choice_atoms.as_ref()) {
                    RuleOutcome::Applied => {}
                    RuleOutcome::Branched(alternatives) => {
                        trace!("pushing {} alternatives", alternatives.len());
                        // reversed so the first alternative is tried first
                        stack.extend(alternatives.into_iter().rev());
                        break Terminal::Suspended;
                    }
                    RuleOutcome::Saturated => break Terminal::Saturated(state),
                }
            };

            match terminal {
                Terminal::Clashed(state) => result.explored.push(state),
                Terminal::Suspended => {}
                Terminal::Saturated(state) => {
                    debug!(
                        "saturated clash-free state with {} individuals",
                        state.individual_count()
                    );
                    result.models.push(state.clone());
                    result.explored.push(state);
                    if !exhaustive {
                        return Ok(result);
                    }
                }
            }
        }

        Ok(result)
    }
}
