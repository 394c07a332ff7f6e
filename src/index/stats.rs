use rustc_hash::FxHashMap;

/// Number of bars shown per histogram
pub const HISTOGRAM_ENTRIES: usize = 20;

/// Count occurrences and return the `limit` most common, highest first.
/// Equal counts keep first-seen order.
pub fn most_common<'a, I>(items: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut order: Vec<&'a String> = Vec::new();
    let mut counts: FxHashMap<&'a String, usize> = FxHashMap::default();

    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|item| (item.clone(), counts[item]))
        .collect();
    // Stable sort keeps first-seen order among ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_most_common_orders_by_count() {
        let items = strings(&["a.b", "c", "a.b", "d", "c", "a.b"]);
        assert_eq!(
            most_common(&items, 10),
            vec![("a.b".to_string(), 3), ("c".to_string(), 2), ("d".to_string(), 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let items = strings(&["z", "y", "x", "y", "z", "x"]);
        let ranked: Vec<_> = most_common(&items, 10).into_iter().map(|(k, _)| k).collect();
        assert_eq!(ranked, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_limit_and_empty() {
        let items = strings(&["a", "b", "c"]);
        assert_eq!(most_common(&items, 2).len(), 2);
        assert!(most_common(&Vec::<String>::new(), 20).is_empty());
    }
}
