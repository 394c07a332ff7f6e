pub mod filter;
pub mod flatten;
pub mod reverse;
pub mod stats;
pub mod types;

pub use filter::{apply_filter, KeyFilter};
pub use flatten::{flatten_keys, flatten_values, walk, Visit};
pub use reverse::{build_value_index, ReverseIndex};
pub use stats::{most_common, HISTOGRAM_ENTRIES};
pub use types::*;
