//! Output generation.
//!
//! # Submodules
//!
//! - [`markdown`]: Converts the category → articles grouping into the Markdown report
//!
//! The report is the only artifact a run produces; it is written to the path
//! given on the command line (default `statsig_blog_summary.md`).

pub mod markdown;
