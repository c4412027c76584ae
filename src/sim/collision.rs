//! Wall-slide collision for the player.
//!
//! ✔ same crossing test as the sector-transition code (box + side)
//! ✔ solid edges are a closed opening, portals open `[max floor, min ceil]`
//! ✔ a blocked move slides along the edge by vector projection

use glam::Vec2;

use super::movement::{EYE_HEIGHT, HEAD_MARGIN, KNEE_HEIGHT};
use crate::world::{
    Edge, Level, Player, Sector,
    helpers::{boxes_intersect, point_side},
};

/// What the caller gets back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub delta: Vec2,    // displacement to hand to `move_player`
    pub hit_wall: bool, // at least one edge blocked the original move
}

/* ─────────────────────────  VERTICAL OPENING  ───────────────────────── */

/// Vertical gap through an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Opening {
    pub low: f32,
    pub high: f32,
}

impl Opening {
    /// Nothing fits through a solid wall.
    pub const CLOSED: Self = Self {
        low: f32::INFINITY,
        high: f32::NEG_INFINITY,
    };

    /// Opening from `sector` through `edge` into its neighbor.
    pub fn through(level: &Level, sector: &Sector, edge: &Edge) -> Self {
        match edge.neighbor.and_then(|n| level.sector(n)) {
            Some(back) => Self {
                low: sector.floor.max(back.floor),
                high: sector.ceil.min(back.ceil),
            },
            None => Self::CLOSED,
        }
    }

    /// `true` when an eye at `eye_z` bumps the head on `high` or the shins
    /// on `low`.
    #[inline]
    pub fn blocks(&self, eye_z: f32) -> bool {
        self.high < eye_z + HEAD_MARGIN || self.low > eye_z - EYE_HEIGHT + KNEE_HEIGHT
    }
}

/* ─────────────────────────  SLIDE-MOVE DRIVER  ──────────────────────── */

/// Clip `delta` against the walls of the player's current sector.
///
/// Each blocking edge replaces the displacement with its projection onto
/// the edge direction, then the scan starts over. After as many slides as
/// the sector has edges, a move that still crosses a wall is dropped.
pub fn slide_move(level: &Level, player: &Player, delta: Vec2) -> MoveResult {
    let Some(sector) = level.sector(player.sector()) else {
        return MoveResult {
            delta,
            hit_wall: false,
        };
    };

    let from = player.xy();
    let eye_z = player.pos().z;
    let blocking = |d: Vec2| {
        let to = from + d;
        sector.edges().find(|e| {
            boxes_intersect(from, to, e.a, e.b)
                && point_side(to, e.a, e.b) < 0.0
                && Opening::through(level, sector, e).blocks(eye_z)
        })
    };

    let mut delta = delta;
    let mut hit_wall = false;
    for _ in 0..sector.vertices.len() {
        let Some(edge) = blocking(delta) else {
            return MoveResult { delta, hit_wall };
        };
        delta = slide_along(delta, edge.b - edge.a);
        hit_wall = true;
    }

    if blocking(delta).is_some() {
        delta = Vec2::ZERO;
    }
    MoveResult { delta, hit_wall }
}

/// Vector projection of `delta` onto `dir`; zero for a degenerate edge.
#[inline]
fn slide_along(delta: Vec2, dir: Vec2) -> Vec2 {
    let len2 = dir.dot(dir);
    if len2 <= f32::EPSILON {
        return Vec2::ZERO;
    }
    dir * (delta.dot(dir) / len2)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
