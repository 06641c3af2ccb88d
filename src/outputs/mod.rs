//! Output generation for a finished run.
//!
//! # Submodules
//!
//! - [`json`]: writes the assembled feed as a pretty-printed JSON array
//! - [`report`]: summarizes the feed and per-source crawl counts in the log

pub mod json;
pub mod report;
