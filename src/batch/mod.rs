mod item;
mod orchestrator;
mod summary;

pub use item::{ConversionItem, ConversionStatus};
pub use orchestrator::{BatchOrchestrator, ItemCallback};
pub use summary::{BatchSummary, CancellationFlag};
