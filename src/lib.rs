//! # jsift - fuzzy finder for JSON and CSV documents
//!
//! jsift loads a JSON or CSV file, flattens it into dot-joined key-paths
//! and stringified scalar values, and ranks either set against typed
//! queries with a weighted fuzzy ratio.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`document`] - Loading JSON/CSV into a uniform value tree
//! - [`index`] - Key/value flattening, reverse index and key filter
//! - [`query`] - Fuzzy scoring, ranking and key-path resolution
//! - [`session`] - Loaded document, filter and search mode state
//! - [`output`] - Tables, trees and histograms for the terminal
//! - [`repl`] / `tui` - Line-based and interactive front ends
//! - [`utils`] - Configuration and logging
//!
//! ## Quick Start
//!
//! ```no_run
//! use jsift::session::{SearchHit, Session};
//! use std::path::Path;
//!
//! let mut session = Session::default();
//! session.open(Path::new("data.json")).unwrap();
//!
//! for hit in session.search("nam") {
//!     if let SearchHit::Key { key, score, values, .. } = hit {
//!         println!("{} ({:.1}): {} value(s)", key, score, values.len());
//!     }
//! }
//! ```

pub mod document;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod repl;
pub mod session;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
