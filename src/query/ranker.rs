//! Ranked fuzzy lookup over a candidate list

use crate::query::fuzz::wratio;
use serde::{Deserialize, Serialize};

/// Result limit for a full search
pub const SEARCH_LIMIT: usize = 10;

/// Result limit for completion-as-you-type
pub const COMPLETION_LIMIT: usize = 5;

/// Minimum weighted-ratio score for a candidate to be returned
pub const DEFAULT_MIN_SCORE: f64 = 60.0;

/// Tunables for a ranking call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankOptions {
    pub limit: usize,
    pub min_score: f64,
    /// Lowercase query and candidates before scoring
    pub fold_case: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: SEARCH_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
            fold_case: false,
        }
    }
}

impl RankOptions {
    pub fn with_limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }
}

/// A candidate that cleared the score threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub candidate: String,
    pub score: f64,
    /// Position in the candidate list
    pub index: usize,
}

/// Score `query` against every candidate and keep the best `limit` with
/// score >= `min_score`, highest first. Equal scores keep candidate order.
pub fn rank<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    limit: usize,
    min_score: f64,
) -> Vec<RankedMatch> {
    rank_with(
        query,
        candidates,
        &RankOptions {
            limit,
            min_score,
            fold_case: false,
        },
    )
}

pub fn rank_with<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    options: &RankOptions,
) -> Vec<RankedMatch> {
    if query.is_empty() || candidates.is_empty() || options.limit == 0 {
        return Vec::new();
    }

    let folded_query = options.fold_case.then(|| query.to_lowercase());
    let query = folded_query.as_deref().unwrap_or(query);

    let mut matches: Vec<RankedMatch> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let candidate = candidate.as_ref();
            let score = if options.fold_case {
                wratio(query, &candidate.to_lowercase())
            } else {
                wratio(query, candidate)
            };
            (score >= options.min_score).then(|| RankedMatch {
                candidate: candidate.to_string(),
                score,
                index,
            })
        })
        .collect();

    // Stable sort: ties stay in candidate order
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(options.limit);
    matches
}
