//! Tag aliases
//!
//! An alias is a shorthand token that expands to one or more literal tags
//! while the edited document is parsed. Aliases come from the `[aliases]`
//! table of the config file:
//!
//! ```toml
//! [aliases]
//! p = "project, urgent"
//! ```
//!
//! Expansion is a single pass: the expansion of an alias is never expanded
//! again, so aliases cannot chain or loop.

use std::collections::{BTreeMap, HashMap};

/// Alias name -> ordered expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap(BTreeMap<String, Vec<String>>);

impl AliasMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from config entries whose values are comma-separated expansions.
    ///
    /// Expansion entries are trimmed and empty ones dropped; an alias left with
    /// no entries is ignored.
    #[must_use]
    pub fn from_config(entries: &HashMap<String, String>) -> Self {
        let mut map = Self::new();
        for (alias, expansion) in entries {
            map.insert(alias, expansion.split(','));
        }
        map
    }

    /// Add or replace an alias
    pub fn insert<I, S>(&mut self, alias: &str, expansion: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let expansion: Vec<String> = expansion
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if expansion.is_empty() {
            tracing::warn!(alias, "ignoring alias with empty expansion");
            return;
        }
        self.0.insert(alias.to_string(), expansion);
    }

    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&[String]> {
        self.0.get(alias).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Expand one token: its alias expansion if `token` is an alias (exact,
/// case-sensitive match), otherwise the token itself.
#[must_use]
pub fn expand(token: &str, aliases: &AliasMap) -> Vec<String> {
    aliases
        .get(token)
        .map_or_else(|| vec![token.to_string()], <[String]>::to_vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> AliasMap {
        let mut entries = HashMap::new();
        entries.insert("p".to_string(), "project, urgent".to_string());
        entries.insert("loop".to_string(), "p, loop".to_string());
        entries.insert("blank".to_string(), " , ".to_string());
        AliasMap::from_config(&entries)
    }

    #[test]
    fn test_expand_known_alias() {
        assert_eq!(expand("p", &aliases()), vec!["project", "urgent"]);
    }

    #[test]
    fn test_unknown_token_passes_through() {
        assert_eq!(expand("work", &aliases()), vec!["work"]);
    }

    #[test]
    fn test_alias_match_is_case_sensitive() {
        assert_eq!(expand("P", &aliases()), vec!["P"]);
    }

    #[test]
    fn test_expansion_is_not_recursive() {
        assert_eq!(expand("loop", &aliases()), vec!["p", "loop"]);
    }

    #[test]
    fn test_empty_expansion_ignored() {
        let map = aliases();
        assert!(map.get("blank").is_none());
        assert_eq!(map.len(), 2);
    }
}
