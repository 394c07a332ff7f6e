//! Fuzzy string similarity.
//!
//! All scores are in `[0, 100]`. [`ratio`] is the normalized indel
//! similarity `2 * lcs / (len_a + len_b)`; the others build on it.
//! [`wratio`] picks the best of the whole-string, partial-window and
//! token-based comparisons, scaled by how different the lengths are.
//!
//! Comparison is per `char` and case-sensitive.

use std::collections::BTreeSet;

/// Scale applied to token-based sub-scores
const UNBASE_SCALE: f64 = 0.95;

/// Length ratio at or above which partial matches count for much less
const LONG_PARTIAL_RATIO: f64 = 8.0;

/// Length ratio below which partial matching is skipped entirely
const PARTIAL_THRESHOLD: f64 = 1.5;

/// Length of the longest common subsequence
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // Two rows over the shorter side
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for &oc in outer {
        for (j, &ic) in inner.iter().enumerate() {
            curr[j + 1] = if oc == ic {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[inner.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Whole-string similarity
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against every same-length window
/// of the longer one, including windows clipped at either end.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() == b.len() {
        return partial_ratio_chars(&a, &b).max(partial_ratio_chars(&b, &a));
    }
    if a.len() < b.len() {
        partial_ratio_chars(&a, &b)
    } else {
        partial_ratio_chars(&b, &a)
    }
}

fn partial_ratio_chars(short: &[char], long: &[char]) -> f64 {
    let m = short.len();
    let n = long.len();
    let mut best: f64 = 0.0;

    let windows = (1..m)
        .map(|end| &long[..end])
        .chain((0..=n - m).map(|start| &long[start..start + m]))
        .chain((n - m + 1..n).map(|start| &long[start..]));

    for window in windows {
        // A window sharing no character with `short` scores zero
        if !window.iter().any(|c| short.contains(c)) {
            continue;
        }
        best = best.max(ratio_chars(short, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_set(s: &str) -> BTreeSet<&str> {
    s.split_whitespace().collect()
}

fn join(tokens: &[&str]) -> String {
    tokens.join(" ")
}

/// [`ratio`] after sorting whitespace-separated tokens
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let (a, b) = (sorted_tokens(a), sorted_tokens(b));
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    ratio(&a, &b)
}

/// Compares the shared tokens against each side's shared-plus-unique
/// tokens. A string whose tokens are all contained in the other scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let (ta, tb) = (token_set(a), token_set(b));
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let common: Vec<&str> = ta.intersection(&tb).copied().collect();
    let only_a: Vec<&str> = ta.difference(&tb).copied().collect();
    let only_b: Vec<&str> = tb.difference(&ta).copied().collect();

    if !common.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let sect = join(&common);
    let with_sect = |rest: &[&str]| {
        if sect.is_empty() {
            join(rest)
        } else {
            format!("{} {}", sect, join(rest))
        }
    };
    let combined_a = with_sect(&only_a);
    let combined_b = with_sect(&only_b);

    let mut best = ratio(&combined_a, &combined_b);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_a))
            .max(ratio(&sect, &combined_b));
    }
    best
}

/// Partial matching on sorted tokens. Any shared token scores 100.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let (ta, tb) = (token_set(a), token_set(b));
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    if ta.intersection(&tb).next().is_some() {
        return 100.0;
    }
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Weighted ratio: the best applicable sub-score.
///
/// Similar-length strings use the whole-string and token scores. When one
/// string is at least half again as long, partial-window scores join in,
/// discounted further for very long candidates.
pub fn wratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let base = ratio(a, b);

    if len_ratio < PARTIAL_THRESHOLD {
        let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return base.max(token * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < LONG_PARTIAL_RATIO { 0.9 } else { 0.6 };
    let partial = partial_ratio(a, b) * partial_scale;
    let partial_token = partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale;

    base.max(partial).max(partial_token)
}
