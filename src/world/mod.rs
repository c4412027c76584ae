pub mod geometry;
pub mod helpers;
mod player;

pub use geometry::{Edge, Level, Sector, SectorId, rect_sector};
pub use player::{Player, normalize_angle};
