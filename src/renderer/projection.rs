use glam::{Vec2, vec2};

use crate::world::{Player, helpers::intersect};

/// Horizontal field-of-vision scale, as a factor of screen height.
pub const HFOV_FACTOR: f32 = 0.73;
/// Vertical field-of-vision scale, as a factor of screen height.
pub const VFOV_FACTOR: f32 = 0.20;

// Skewed frustum lines an edge behind the viewer is clipped against.
pub const NEAR_Z: f32 = 1e-4;
pub const FAR_Z: f32 = 5.0;
pub const NEAR_SIDE: f32 = 1e-5;
pub const FAR_SIDE: f32 = 20.0;

/// Viewport dimensions plus the perspective scales derived from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
    hfov: f32,
    vfov: f32,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            width,
            height,
            hfov: HFOV_FACTOR * height as f32,
            vfov: VFOV_FACTOR * height as f32,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Screen column of a view-space point `(tx, tz)`; `tz` must be > 0.
    #[inline]
    pub fn column(&self, t: Vec2) -> i32 {
        let offset = (t.x * self.hfov / t.y) as i32; // saturating cast
        (self.width / 2).saturating_sub(offset)
    }

    /// Screen row of a height `rel_z` (relative to the eye) at depth `tz`.
    #[inline]
    pub fn row(&self, rel_z: f32, tz: f32) -> i32 {
        let offset = (rel_z * self.vfov / tz) as i32;
        (self.height / 2).saturating_sub(offset)
    }
}

/// Translate `p` to the player and rotate into view space.
///
/// `x` grows to the viewer's left, `y` is the depth along the heading.
#[inline]
pub fn to_view(player: &Player, p: Vec2) -> Vec2 {
    let d = p - player.xy();
    let (s, c) = (player.anglesin(), player.anglecos());
    vec2(d.x * s - d.y * c, d.x * c + d.y * s)
}

/// Clip a view-space edge that is partly behind the viewer.
///
/// Each endpoint closer than [`NEAR_Z`] is moved to where the edge meets
/// one of the two skewed frustum lines, whichever lies in front. `None`
/// when neither intersection is usable.
pub fn clip_to_frustum(mut t1: Vec2, mut t2: Vec2) -> Option<(Vec2, Vec2)> {
    let left = intersect(t1, t2, vec2(-NEAR_SIDE, NEAR_Z), vec2(-FAR_SIDE, FAR_Z));
    let right = intersect(t1, t2, vec2(NEAR_SIDE, NEAR_Z), vec2(FAR_SIDE, FAR_Z));
    let in_front = left.filter(|p| p.y > 0.0).or(right.filter(|p| p.y > 0.0));

    if t1.y < NEAR_Z {
        t1 = in_front?;
    }
    if t2.y < NEAR_Z {
        t2 = in_front?;
    }
    Some((t1, t2))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn view_axes_at_angle_zero() {
        let p = Player::new(vec2(5.0, 5.0), 0.0, 0);
        // straight ahead
        assert!((to_view(&p, vec2(15.0, 5.0)) - vec2(0.0, 10.0)).length() < 1e-6);
        // -y is to the left when looking along +x
        assert!((to_view(&p, vec2(5.0, 2.0)) - vec2(3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn view_axes_rotated() {
        let p = Player::new(Vec2::ZERO, FRAC_PI_2, 0);
        assert!((to_view(&p, vec2(0.0, 7.0)) - vec2(0.0, 7.0)).length() < 1e-5);
    }

    #[test]
    fn centre_column_and_horizon() {
        let s = Screen::new(608, 480);
        assert_eq!(s.column(vec2(0.0, 3.0)), 304);
        assert_eq!(s.row(0.0, 3.0), 240);
        // left of view maps left of centre, ceilings above the horizon
        assert!(s.column(vec2(1.0, 3.0)) < 304);
        assert!(s.row(5.0, 3.0) < 240);
        assert!(s.row(-5.0, 3.0) > 240);
    }

    #[test]
    fn projection_saturates_near_zero_depth() {
        let s = Screen::new(608, 480);
        assert_eq!(s.column(vec2(1.0, 1e-30)), 304 - i32::MAX);
        assert_eq!(s.column(vec2(-1.0, 1e-30)), i32::MAX);
        assert_eq!(s.row(-10.0, 1e-30), i32::MAX);
    }

    #[test]
    fn clip_moves_behind_endpoint_in_front() {
        // wall at tx = 5 running from behind to in front of the viewer
        let (a, b) = clip_to_frustum(vec2(5.0, -5.0), vec2(5.0, 5.0)).unwrap();
        assert!(a.y > 0.0);
        assert!((a.x - 5.0).abs() < 1e-4);
        assert_eq!(b, vec2(5.0, 5.0));
    }

    #[test]
    fn clip_of_unusable_edge_is_none() {
        // degenerate edge: both lines fail to give a point in front
        assert!(clip_to_frustum(vec2(0.0, -1.0), vec2(0.0, -1.0)).is_none());
    }
}
