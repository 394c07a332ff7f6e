//! Key allow-list filter

use crate::index::reverse::ReverseIndex;
use crate::index::types::{KeyPath, Universe};
use std::collections::BTreeSet;

/// Allow-list of substrings. Empty means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFilter {
    patterns: Vec<String>,
}

impl KeyFilter {
    /// Build from patterns, dropping empty ones (an empty pattern would
    /// match every key)
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated pattern list, trimming each pattern
    pub fn parse(text: &str) -> Self {
        Self::new(text.split(',').map(str::trim))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_active(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Case-sensitive, unanchored containment of any pattern
    pub fn retains(&self, key: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| key.contains(p.as_str()))
    }
}

/// Recompute the searchable universe from the unfiltered derivations.
///
/// Values whose every key is filtered out disappear from both the value
/// list and the reverse index.
pub fn apply_filter(all_keys: &[KeyPath], index: &ReverseIndex, filter: &KeyFilter) -> Universe {
    let keys: BTreeSet<&KeyPath> = all_keys.iter().filter(|k| filter.retains(k)).collect();

    if !filter.is_active() {
        return Universe {
            keys: keys.into_iter().cloned().collect(),
            values: index.sorted_values(),
            reverse: index.clone(),
        };
    }

    let mut reverse = ReverseIndex::new();
    for (value, value_keys) in index.iter() {
        let surviving: BTreeSet<KeyPath> = value_keys
            .iter()
            .filter(|k| keys.contains(k))
            .cloned()
            .collect();
        if !surviving.is_empty() {
            reverse.insert_set(value.clone(), surviving);
        }
    }

    Universe {
        keys: keys.into_iter().cloned().collect(),
        values: reverse.sorted_values(),
        reverse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::index::types::Corpus;
    use serde_json::json;

    fn corpus() -> Corpus {
        Corpus::build(&Document::from_json_value(json!({
            "user": {"name": "Alice", "tags": ["admin", "vip"], "nickname": "admin"},
            "group": {"name": "staff"}
        })))
    }

    #[test]
    fn test_parse_patterns() {
        let filter = KeyFilter::parse(" tags, name ,,");
        assert_eq!(filter.patterns(), &["tags".to_string(), "name".to_string()]);
        assert!(!KeyFilter::parse("  ").is_active());
    }

    #[test]
    fn test_unfiltered_universe() {
        let u = corpus().universe(&KeyFilter::default());
        assert_eq!(
            u.keys,
            vec!["group", "group.name", "user", "user.name", "user.nickname", "user.tags"]
        );
        assert_eq!(u.values, vec!["Alice", "admin", "staff", "vip"]);
        assert_eq!(u.reverse.len(), 4);
    }

    #[test]
    fn test_filter_on_tags() {
        let u = corpus().universe(&KeyFilter::new(["tags"]));
        assert_eq!(u.keys, vec!["user.tags"]);
        assert_eq!(u.values, vec!["admin", "vip"]);
        // "admin" also lived under user.nickname, which is gone
        let admin: Vec<_> = u.reverse.get("admin").unwrap().iter().cloned().collect();
        assert_eq!(admin, vec!["user.tags"]);
        assert!(u.reverse.get("Alice").is_none());
    }

    #[test]
    fn test_filter_is_case_sensitive_substring() {
        let c = corpus();
        assert!(c.universe(&KeyFilter::new(["NAME"])).keys.is_empty());
        assert_eq!(
            c.universe(&KeyFilter::new(["ame"])).keys,
            vec!["group.name", "user.name", "user.nickname"]
        );
    }

    #[test]
    fn test_no_matching_keys_is_empty_not_error() {
        let u = corpus().universe(&KeyFilter::new(["zzz"]));
        assert!(u.is_empty());
        assert!(u.reverse.is_empty());
    }

    #[test]
    fn test_filter_idempotent_and_clear_restores() {
        let c = corpus();
        let filter = KeyFilter::new(["name", "tags"]);
        let once = c.universe(&filter);
        let twice = c.universe(&filter);
        assert_eq!(once, twice);

        let cleared = c.universe(&KeyFilter::default());
        assert_eq!(cleared, apply_filter(&c.all_keys, &c.value_index, &KeyFilter::new(Vec::<String>::new())));
        assert_eq!(cleared.values.len(), 4);
    }

    #[test]
    fn test_reverse_keys_stay_inside_universe() {
        let c = corpus();
        for filter in [KeyFilter::default(), KeyFilter::new(["user"]), KeyFilter::new(["name"])] {
            let u = c.universe(&filter);
            for key in u.reverse.key_union() {
                assert!(u.contains_key(&key), "{} escaped filter {:?}", key, filter);
            }
        }
    }
}
