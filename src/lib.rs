//! Sector/portal 2.5D renderer.
//!
//! * [`world`]: sectors, player, geometry kernel
//! * [`mapfile`]: text map format
//! * [`sim`]: movement and wall collision
//! * [`renderer`]: surfaces, portal traversal, playback, map overlay
//! * [`engine`]: the per-frame aggregate the binaries drive

pub mod config;
pub mod engine;
pub mod mapfile;
pub mod renderer;
pub mod sim;
pub mod world;
