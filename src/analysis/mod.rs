//! Text analysis over extracted post bodies.
//!
//! # Submodules
//!
//! - [`lines`]: The typed line format shared with the extractor
//! - [`categorize`]: Keyword-based topic labels
//! - [`summarize`]: Extractive summary, key points, data points, examples and takeaways
//!
//! Everything here is pure: identical input always yields identical output.

pub mod categorize;
pub mod lines;
pub mod summarize;
