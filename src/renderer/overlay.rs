//! Top-down debug map drawn over the 3D view.

use glam::Vec2;

use super::{LINE_HEIGHT, MAGENTA, RED, Rgba, Surface, VERY_DARK_GREY, YELLOW};
use crate::world::{Level, Player};

/// Margin around the map background, in pixels.
const BG_MARGIN: i32 = 5;
const PLAYER_RADIUS: i32 = 4;
const VERTEX_RADIUS: i32 = 2;
/// Length of the heading line, in world units.
const HEADING_LEN: f32 = 1.0;

/// Placement of the overlay on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    /// Pixels per world unit.
    pub scale: f32,
    pub origin: (i32, i32),
    /// Portrait layout: world x runs down, world y runs right.
    pub flipped: bool,
    /// Draw portal edges in the base colour too.
    pub no_red: bool,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            scale: 5.0,
            origin: (10, 10),
            flipped: false,
            no_red: false,
        }
    }
}

impl MapView {
    #[inline]
    pub fn to_screen(&self, p: Vec2) -> (i32, i32) {
        let (a, b) = if self.flipped { (p.y, p.x) } else { (p.x, p.y) };
        (
            self.origin.0.saturating_add((a * self.scale) as i32),
            self.origin.1.saturating_add((b * self.scale) as i32),
        )
    }

    /// Background rectangle `(x, y, w, h)` covering the level plus margin.
    fn background(&self, level: &Level) -> Option<(i32, i32, i32, i32)> {
        let (lo, hi) = level.bounds()?;
        let (ax, ay) = self.to_screen(lo);
        let (bx, by) = self.to_screen(hi);
        let (x0, y0) = (ax.min(bx) - BG_MARGIN, ay.min(by) - BG_MARGIN);
        let (x1, y1) = (ax.max(bx) + BG_MARGIN, ay.max(by) + BG_MARGIN);
        Some((x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }
}

/// Draw every sector outline, the player and their sector's vertices.
///
/// Solid edges use `base`; portal edges are red unless `view.no_red`.
pub fn draw_map<S: Surface + ?Sized>(surface: &mut S, level: &Level, player: &Player, view: &MapView, base: Rgba) {
    if let Some((x, y, w, h)) = view.background(level) {
        surface.fill_rect(x, y, w, h, VERY_DARK_GREY);
    }

    for sector in &level.sectors {
        for edge in sector.edges() {
            let col = if edge.neighbor.is_some() && !view.no_red { RED } else { base };
            let (x0, y0) = view.to_screen(edge.a);
            let (x1, y1) = view.to_screen(edge.b);
            surface.draw_line(x0, y0, x1, y1, col);
        }
    }

    let at = player.xy();
    let (px, py) = view.to_screen(at);
    let (hx, hy) = view.to_screen(at + player.forward() * HEADING_LEN);
    surface.fill_circle(px, py, PLAYER_RADIUS, MAGENTA);
    surface.draw_line(px, py, hx, hy, MAGENTA);

    if let Some(sector) = level.sector(player.sector()) {
        for &v in &sector.vertices {
            let (vx, vy) = view.to_screen(v);
            surface.draw_circle(vx, vy, VERTEX_RADIUS, YELLOW);
        }
    }
}

/// Position, angle and sector as text below the map background.
pub fn draw_stats<S: Surface + ?Sized>(surface: &mut S, level: &Level, player: &Player, view: &MapView, col: Rgba) {
    let top = view
        .background(level)
        .map_or(view.origin.1, |(_, y, _, h)| y + h)
        + BG_MARGIN;
    let pos = player.pos();
    let lines = [
        format!("Position: {:.2}, {:.2}, {:.2}", pos.x, pos.y, pos.z),
        format!("Angle: {:.2}", player.angle()),
        format!("Sector: {}", player.sector()),
    ];
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(view.origin.0, top + i as i32 * LINE_HEIGHT, line, col);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
