pub mod fuzz;
pub mod ranker;
pub mod resolve;

pub use fuzz::wratio;
pub use ranker::{
    rank, rank_with, RankOptions, RankedMatch, COMPLETION_LIMIT, DEFAULT_MIN_SCORE, SEARCH_LIMIT,
};
pub use resolve::{resolve, resolve_for_display, DisplayKind, Resolved};
