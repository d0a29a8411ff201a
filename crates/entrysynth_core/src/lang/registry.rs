//! Shareable metadata for `entrysynth_core::lang` registries.
//!
//! Every registry in this crate is a `const` table of [`LangItemInfo`] entries keyed by a stable id. This submodule
//! provides the small metadata types reused across all of them.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling and diagnostics; the synthesizer only ever asks for spellings.

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use entrysynth_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Shared metadata shape for registry items.
///
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
/// - lifecycle (`stability`)
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub stability: Stability,
}

impl<Id> LangItemInfo<Id> {
    /// Whether `name` is the canonical spelling or one of the aliases of this item.
    pub fn matches(&self, name: &str) -> bool {
        self.canonical == name || self.aliases.contains(&name)
    }
}

/// Build a stable, alias-free registry entry.
pub(crate) const fn stable<Id>(id: Id, canonical: &'static str, description: &'static str) -> LangItemInfo<Id> {
    LangItemInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_checks_canonical_and_aliases() {
        let info = LangItemInfo {
            id: 0u8,
            canonical: "GetAwaiter",
            aliases: &["get_awaiter"],
            description: "test",
            stability: Stability::Draft,
        };
        assert!(info.matches("GetAwaiter"));
        assert!(info.matches("get_awaiter"));
        assert!(!info.matches("GetResult"));
    }
}
