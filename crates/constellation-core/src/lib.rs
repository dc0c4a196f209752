//! Interaction core for the idea constellation: beads floating in a 3D
//! scene, pointer picking, the two-at-a-time linking state machine, and the
//! time-bounded reveal effects. Rendering, DOM overlay hosting, and audio
//! synthesis stay on the host side of the seams defined here.

pub mod audio;
pub mod camera;
pub mod clock;
pub mod config;
pub mod effects;
pub mod links;
pub mod picker;
pub mod registry;
pub mod select;
pub mod session;

pub use audio::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use effects::*;
pub use links::*;
pub use picker::*;
pub use registry::*;
pub use select::*;
pub use session::*;
