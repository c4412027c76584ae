use glam::{Vec2, Vec3, vec2};
use std::f32::consts::TAU;

use super::geometry::SectorId;

/// Beyond this magnitude the add/subtract loop would take too many turns
/// (or never finish once `TAU` falls below one ulp), so reduce first.
const MAX_LOOP_ANGLE: f32 = 1.0e4;

/// First-person view-point and kinematic state.
///
/// * Only **yaw** is simulated; there is no pitch.
/// * `pos.z` is the absolute eye altitude, re-derived from the floor of
///   the current sector after every move.
/// * `anglesin`/`anglecos` are caches of `angle`; they are private so no
///   caller can set them out of step with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pos: Vec3,
    velocity: Vec3,
    angle: f32, // radians in [0, 2π), 0 = +X, grows towards +Y
    anglesin: f32,
    anglecos: f32,
    sector: SectorId,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, 0)
    }
}

impl Player {
    /// Create a player standing at `pos` facing `angle`, inside `sector`.
    /// Height stays 0 until the first move settles it onto the floor.
    pub fn new(pos: Vec2, angle: f32, sector: SectorId) -> Self {
        let mut p = Self {
            pos: pos.extend(0.0),
            velocity: Vec3::ZERO,
            angle: 0.0,
            anglesin: 0.0,
            anglecos: 1.0,
            sector,
        };
        p.set_angle(angle);
        p
    }

    /*──────────────────────────── accessors ─────────────────────────*/

    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        self.pos.truncate()
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline(always)]
    pub fn anglesin(&self) -> f32 {
        self.anglesin
    }

    #[inline(always)]
    pub fn anglecos(&self) -> f32 {
        self.anglecos
    }

    #[inline]
    pub fn sector(&self) -> SectorId {
        self.sector
    }

    /// Unit vector pointing where the player looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        vec2(self.anglecos, self.anglesin)
    }

    /*──────────────────────────── mutation ──────────────────────────*/

    /// Set the heading; normalises into `[0, 2π)` and refreshes the caches.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        (self.anglesin, self.anglecos) = self.angle.sin_cos();
    }

    /// Rotate by `delta` radians (positive turns from +X towards +Y).
    #[inline]
    pub fn turn(&mut self, delta: f32) {
        self.set_angle(self.angle + delta);
    }

    pub(crate) fn set_velocity(&mut self, v: Vec3) {
        self.velocity = v;
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.pos.x += delta.x;
        self.pos.y += delta.y;
    }

    pub(crate) fn set_z(&mut self, z: f32) {
        self.pos.z = z;
    }

    pub(crate) fn set_sector(&mut self, sector: SectorId) {
        self.sector = sector;
    }
}

/// Bring `angle` into `[0, 2π)` by repeated addition/subtraction of `2π`.
///
/// Non-finite input maps to 0. Magnitudes above a few thousand radians are
/// reduced with `rem_euclid` first so the loop always terminates.
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = if angle.abs() > MAX_LOOP_ANGLE {
        angle.rem_euclid(TAU)
    } else {
        angle
    };
    while a < 0.0 {
        a += TAU;
    }
    while a >= TAU {
        a -= TAU;
    }
    a
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
