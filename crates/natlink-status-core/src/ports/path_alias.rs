//! Path alias expansion port.

/// Expands `~` and `%NAME%` tokens against a small set of well-known roots.
///
/// This is not full environment-variable semantics: unknown tokens are left
/// in place so the resulting path simply fails validation.
pub trait PathAliasExpander {
    fn expand(&self, spec: &str) -> String;
}
