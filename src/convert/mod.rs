mod engine;
mod validation;

pub use engine::ConversionEngine;
pub use validation::ValidationReport;
