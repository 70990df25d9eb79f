pub mod driver;
pub mod palette;
pub mod properties;
pub mod resolver;
pub mod rotation;
pub mod timeline;

pub use driver::*;
pub use palette::{ColorPalette, Rgba};
pub use properties::LightProperties;
pub use resolver::{resolve_boost, resolve_light, resolve_speed, LightContext};
pub use rotation::{RotationResolver, RotationSummary};
pub use timeline::{RebuildSummary, Timeline, TimelineCursors};
