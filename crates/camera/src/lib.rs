//! Cinematic camera pursuit around the journey globe.
//!
//! The camera never snaps: every frame it eases its bearing and distance
//! toward the active waypoint, zooming out while the bearing is still far from
//! the target and settling in once it arrives.

pub mod config;
pub mod controller;
pub mod matrix;
pub mod pursuit;

pub use config::*;
pub use controller::*;
pub use pursuit::*;
