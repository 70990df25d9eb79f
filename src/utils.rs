pub mod easing;
pub mod lerp;
pub mod seeker;

pub use easing::Easing;
pub use lerp::{completion_ratio, Lerp};
pub use seeker::{Cursor, Quantify, SeekExtensions};
