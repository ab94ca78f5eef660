mod models;
mod parser;
mod detector;
pub mod patterns;
pub mod time;
pub mod srt;
pub mod vtt;
pub mod ass;

pub use models::{SubtitleDocument, SubtitleEntry, SubtitleFormat};
pub use parser::{ParserRegistry, SubtitleParser};
pub use detector::FormatDetector;
pub use srt::SrtParser;
pub use vtt::VttParser;
pub use ass::AssParser;
