//! Memoization slots and the tri-state enablement verdict.
//!
//! Every resolver on [`NatlinkStatus`](crate::NatlinkStatus) stores its
//! outcome in a [`CacheSlot`]. The slot separates "never probed" from
//! "probed and found nothing", which a plain `Option` cannot.

use std::path::PathBuf;

use serde::{Serialize, Serializer};

/// Cached outcome of a single resolver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CacheSlot<T> {
    /// Not probed yet (or explicitly invalidated).
    #[default]
    Unresolved,
    /// Probed and validated at the moment of the check.
    Resolved(T),
    /// Probed, and resolution definitively failed or found nothing.
    Invalid,
}

/// A path resolved by one of the status resolvers.
pub type ResolvedPath = CacheSlot<PathBuf>;

impl<T> CacheSlot<T> {
    /// `true` once a resolver has run to completion, successfully or not.
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Resolved(value) => Some(value),
            _ => None,
        }
    }

    /// Forget the cached outcome so the next call re-probes.
    pub fn invalidate(&mut self) {
        *self = Self::Unresolved;
    }
}

impl<T: Clone> CacheSlot<T> {
    pub fn cloned(&self) -> Option<T> {
        self.as_option().cloned()
    }
}

impl<T> From<Option<T>> for CacheSlot<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Invalid, Self::Resolved)
    }
}

/// Whether the host integration or one of its subsystems is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    /// Every required path and flag validated.
    Enabled,
    /// Cleanly determined to be inactive.
    Disabled,
    /// Contradictory configuration was found.
    ErrorState,
}

impl Enablement {
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    pub const fn from_bool(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::ErrorState => "error",
        }
    }
}

impl std::fmt::Display for Enablement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Serialized as `true`, `false`, or `null` for the error state.
impl Serialize for Enablement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Enabled => serializer.serialize_bool(true),
            Self::Disabled => serializer.serialize_bool(false),
            Self::ErrorState => serializer.serialize_none(),
        }
    }
}
