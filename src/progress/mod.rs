mod tracker;

pub use tracker::{ProgressCallback, ProgressTracker};
