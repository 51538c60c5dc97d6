//! Interned names for concepts, roles, and individuals
//!
//! Every symbolic name in the reasoner (atomic concept names, role names,
//! named individuals) is an interned `Name`: a shared `Arc<str>` with a
//! precomputed hash. Interning makes the structural equality checks that
//! dominate rule application cheap, and keeps cloned ABox snapshots small.

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

/// Global intern table sharing one `Arc<str>` per distinct spelling
static NAME_TABLE: Lazy<Mutex<HashMap<String, Arc<str>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn shared_str(text: &str) -> Arc<str> {
    let mut table = match NAME_TABLE.lock() {
        Ok(table) => table,
        // A poisoned table still holds valid interned strings
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(existing) = table.get(text) {
        return existing.clone();
    }
    let shared: Arc<str> = Arc::from(text);
    table.insert(text.to_string(), shared.clone());
    shared
}

/// An interned symbolic name
///
/// Equality and ordering are by spelling; the hash is computed once at
/// creation so `Name` keys are cheap in the hot successor / label maps.
#[derive(Debug, Clone, Eq, PartialOrd, Ord)]
pub struct Name {
    text: Arc<str>,
    hash: u64,
}

impl Name {
    pub fn new<S: AsRef<str>>(text: S) -> Self {
        let text = shared_str(text.as_ref());
        let hash = {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            text.hash(&mut hasher);
            hasher.finish()
        };
        Name { text, hash }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.text == other.text
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::new(s)
    }
}
