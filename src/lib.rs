//! # ALCQ Reasoner
//!
//! A tableau-based decision procedure for the description logic ALCQ
//! (attributive language with complements and qualified number
//! restrictions), implemented in Rust.
//!
//! ## Features
//!
//! - **ABox consistency checking** with model witnesses
//! - **Subsumption** by reduction to inconsistency
//! - **Qualified number restrictions** with and without the unique-name
//!   assumption
//! - **Lazy TBox unfolding** with subset blocking, so cyclic definition
//!   sets terminate
//! - **Text surface** for concepts, ABoxes, TBoxes, and premises
//!
//! ## Quick Start
//!
//! ```rust
//! use alcq_reasoner::{abox_consistent, parse_abox, parse_tbox};
//!
//! let tbox = parse_tbox(
//!     "Woman == (and Person Female)\n\
//!      Mother == (and Woman (exists hasChild Person))",
//! )?;
//! let abox = parse_abox(
//!     "hasChild[mary, tom]\n\
//!      Person[tom]\n\
//!      Mother[mary]",
//! )?;
//!
//! let (consistent, model) = abox_consistent(&abox, &tbox)?;
//! assert!(consistent);
//! assert!(model.is_some());
//! # Ok::<(), alcq_reasoner::DlError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`concept`] - Concept expressions and negation normal form
//! - [`tbox`] - Named concept definitions with lazy unfolding
//! - [`abox`] - Individuals, assertions, and the indexed assertional store
//! - [`parser`] - Prefix-form text surface with fail-fast validation
//! - [`reasoning`] - Consistency and subsumption over the tableau engine
//! - [`symbol`] - Interned names
//! - [`error`] - Error handling
//!
//! Clashes are ordinary control flow inside the search; the only error
//! outcomes are malformed input and exhausted search budgets.

/// Error types and result alias
pub mod error;

/// Interned symbolic names
pub mod symbol;

/// Concept expressions of ALCQ and NNF rewriting
pub mod concept;

/// Terminological knowledge: concept definitions
pub mod tbox;

/// Assertional knowledge: individuals, assertions, the ABox store
pub mod abox;

/// Text surface for concepts, ABoxes, TBoxes, and premises
pub mod parser;

/// Reasoning operations and the tableau engine
pub mod reasoning;

pub use abox::{Abox, Assertion, Generator, Individual};
pub use concept::{Concept, Role};
pub use error::{DlError, DlResult};
pub use parser::{parse_abox, parse_concept, parse_premise, parse_tbox};
pub use reasoning::{
    abox_consistent, abox_consistent_with_config, abox_consistent_with_obj_and_t,
    abox_consistent_with_t, premise_subsumes, Premise, ReasoningConfig, SearchResult,
    TableauxEngine,
};
pub use symbol::Name;
pub use tbox::TBox;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
