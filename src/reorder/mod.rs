//! Reorder engine
//!
//! Groups track locations by containing folder, orders the folders and
//! the tracks within them, and flattens the result.

mod engine;
mod options;

pub use engine::{group_by_folder, reorder, Group};
pub use options::ReorderOptions;
