//! Platform abstraction layer
//!
//! The game core only talks to these traits:
//! - Input events (edge-triggered flap/quit)
//! - Frame pacing
//! - Render surface
//!
//! Headless implementations live alongside them for the binary and tests.

pub mod input;
pub mod surface;
pub mod time;

pub use input::{EdgeTrigger, InputEvent, InputSource, Key, RawInput, ScriptedInput};
pub use surface::{HeadlessSurface, RenderSurface};
pub use time::{FixedRate, FramePacer, Unpaced};
