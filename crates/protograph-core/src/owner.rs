//! Resolution of state owners.
//!
//! A state's `Owner` column names either a declared entity, the built-in `ARM`
//! sentinel, or something unknown. [`OwnerRef`] makes that three-way split
//! explicit so validation and coloring handle every case.

use std::fmt;

/// Owner name that is always valid, whether or not an entity declares it.
pub const ARM_SENTINEL: &str = "ARM";

/// What a state's owner refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerRef<'a> {
    /// A declared entity id.
    Entity(&'a str),
    /// The `ARM` sentinel, not declared as an entity.
    ArmSentinel,
    /// Neither a declared entity nor the sentinel. Includes the empty owner.
    Unresolved(&'a str),
}

impl<'a> OwnerRef<'a> {
    /// Classify `owner` given a predicate telling whether an id is a declared
    /// entity. Declared entities take precedence over the sentinel, so an
    /// entity literally named `ARM` resolves to [`OwnerRef::Entity`].
    pub fn resolve(owner: &'a str, is_entity: impl Fn(&str) -> bool) -> Self {
        if !owner.is_empty() && is_entity(owner) {
            OwnerRef::Entity(owner)
        } else if owner == ARM_SENTINEL {
            OwnerRef::ArmSentinel
        } else {
            OwnerRef::Unresolved(owner)
        }
    }

    /// The owner name as written in the document.
    pub fn name(&self) -> &'a str {
        match self {
            OwnerRef::Entity(id) | OwnerRef::Unresolved(id) => id,
            OwnerRef::ArmSentinel => ARM_SENTINEL,
        }
    }
}

impl fmt::Display for OwnerRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
