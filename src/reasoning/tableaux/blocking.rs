//! Subset blocking for termination on cyclic TBoxes
//!
//! An anonymous individual is blocked when some ancestor along its
//! generator chain carries a superset of its concept labels. Blocked
//! individuals do not fire the generative rules (exists, at-least) or
//! lazy unfolding, so successor chains stay finite.
//!
//! The check runs against the *current* label sets on every firing
//! attempt: additions to either side may establish or break a block, and
//! a stale verdict is never cached.

use crate::abox::{Abox, Individual};
use smallvec::SmallVec;

/// Whether `individual` is blocked by an ancestor on its generator chain.
/// Named individuals are never blocked.
pub fn is_blocked(abox: &Abox, individual: &Individual) -> bool {
    if !individual.is_anonymous() {
        return false;
    }
    let Some(labels) = abox.labels(individual) else {
        return false;
    };

    // Merges can re-parent generators, so guard against revisiting
    let mut visited: SmallVec<[Individual; 8]> = SmallVec::new();
    let mut current = individual;

    while let Some(generator) = abox.generator(current) {
        let ancestor = &generator.parent;
        if visited.contains(ancestor) {
            break;
        }
        visited.push(ancestor.clone());

        if let Some(ancestor_labels) = abox.labels(ancestor) {
            if labels.is_subset(ancestor_labels) {
                return true;
            }
        }
        current = ancestor;
    }

    false
}
