use crate::prelude::*;

/// One dependency entry from an environment file, e.g. `numpy==1.24 # pinned`.
///
/// Conda specifiers put the version constraint after the first `=` (covering
/// `=`, `==`, `>=`, ... all start the constraint at the first `=` for our
/// purposes) and an optional trailing comment after `#`. We derive the two
/// forms the rest of the pipeline needs up front: the canonical package name
/// (constraint and comment stripped) and the bare specifier (only the comment
/// stripped -- what gets written back into the manifest, so stale selector
/// comments never pile up).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepSpec {
    as_given: String,
    name: String,
    bare: String,
}

impl DepSpec {
    pub fn as_given(&self) -> &str {
        &self.as_given
    }

    /// Canonical package name: text before the first `=`, then before the
    /// first `#`, trimmed. Idempotent: extracting from a canonical name
    /// yields it unchanged.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The specifier with any trailing comment removed, constraint kept.
    pub fn bare(&self) -> &str {
        &self.bare
    }
}

impl From<&str> for DepSpec {
    fn from(as_given: &str) -> DepSpec {
        let before_eq = match as_given.split_once('=') {
            Some((left, _)) => left,
            None => as_given,
        };
        let name = match before_eq.split_once('#') {
            Some((left, _)) => left,
            None => before_eq,
        }
        .trim()
        .to_owned();
        let bare = match as_given.split_once('#') {
            Some((left, _)) => left,
            None => as_given,
        }
        .trim()
        .to_owned();
        DepSpec {
            as_given: as_given.to_owned(),
            name,
            bare,
        }
    }
}

impl Display for DepSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_given)
    }
}
