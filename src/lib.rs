//! # rainfall
//!
//! Rain falling over the desktop. A borderless, transparent, click-through
//! window covers the screen; drops fall through it and, in fill mode, a wavy
//! body of water rises from the bottom until it reaches the top and the cycle
//! restarts.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rainfall::prelude::*;
//!
//! fn main() -> Result<(), OverlayError> {
//!     rainfall::run(RainConfig::new().with_drop_count(800))
//! }
//! ```
//!
//! ## Layers
//!
//! The simulation is pure and deterministic once seeded:
//!
//! - [`Raindrop`] is a point with a constant velocity.
//! - [`WaveSurface`] is the travelling sinusoid on top of the water.
//! - [`RainSimulator`] owns every drop and the clock, and advances them
//!   one fixed step per [`tick`](RainSimulator::tick).
//! - [`FrameRenderer`] turns a [`RainSnapshot`] into a [`Frame`], a plain
//!   list of [`DrawOp`]s.
//! - [`RainScene`] does both for one frame and restarts the fill cycle once
//!   the drawn water reaches the top.
//!
//! The platform side (overlay window, wgpu surface, fixed-rate loop) lives
//! behind [`run`].
//!
//! ## Headless use
//!
//! ```
//! use rainfall::prelude::*;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let config = RainConfig::new().with_drop_count(100);
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut scene = RainScene::new(&config, Vec2::new(640.0, 480.0), &mut rng)?;
//!
//! let frame = scene.on_frame(Vec2::new(640.0, 480.0));
//! assert_eq!(frame.drop_count(), 100);
//! assert!(frame.water().is_some());
//! # Ok::<(), rainfall::ConfigError>(())
//! ```
//!
//! Constructors validate the configuration, so a scene that was built can
//! always be ticked.

pub mod animation;
pub mod config;
pub mod drop;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod time;
pub mod wave;
pub mod window;

pub use animation::{run, AnimationLoop, FramePacer, LoopState};
pub use config::RainConfig;
pub use drop::Raindrop;
pub use error::{ConfigError, Degradation, GpuError, OverlayError};
pub use geometry::{DropSilhouette, PathSegment, WaterBody};
pub use glam::Vec2;
pub use render::{DrawOp, Frame, FrameRenderer, Rgba};
pub use scene::RainScene;
pub use simulation::{RainSimulator, RainSnapshot, TerminationMode};
pub use time::SimulationClock;
pub use wave::{Waterline, WaveSurface};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use rainfall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::RainConfig;
    pub use crate::drop::Raindrop;
    pub use crate::error::OverlayError;
    pub use crate::render::{DrawOp, Frame, FrameRenderer, Rgba};
    pub use crate::scene::RainScene;
    pub use crate::simulation::{RainSimulator, RainSnapshot, TerminationMode};
    pub use crate::wave::{Waterline, WaveSurface};
    pub use crate::Vec2;
}
